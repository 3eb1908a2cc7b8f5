use anyhow::{Context, Result};
use contracts::deployment::SavedConfig;
use contracts::schema::DatabaseConfig;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// Saved configuration row together with its owner
#[derive(Debug, Clone)]
pub struct ConfigRow {
    pub user_id: String,
    pub config: SavedConfig,
}

/// Insert a saved configuration
pub async fn insert(user_id: &str, config: &SavedConfig) -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();
    let config_json = serde_json::to_string(&config.config)
        .context("Failed to serialize configuration")?;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO database_configs (id, user_id, name, config, created_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            config.id.clone().into(),
            user_id.to_string().into(),
            config.name.clone().into(),
            config_json.into(),
            config.created_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert configuration")?;

    Ok(())
}

/// List configurations owned by a user, newest first
pub async fn list_by_user(user_id: &str) -> Result<Vec<SavedConfig>> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, user_id, name, config, created_at FROM database_configs
             WHERE user_id = ? ORDER BY created_at DESC",
            [user_id.into()],
        ))
        .await?;

    let mut configs = Vec::new();
    for row in rows {
        configs.push(row_to_config(&row)?.config);
    }

    Ok(configs)
}

/// Get a configuration by ID regardless of owner
pub async fn get_by_id(id: &str) -> Result<Option<ConfigRow>> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, user_id, name, config, created_at FROM database_configs WHERE id = ?",
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row_to_config(&row)?)),
        None => Ok(None),
    }
}

fn row_to_config(row: &sea_orm::QueryResult) -> Result<ConfigRow> {
    let config_json: String = row.try_get("", "config")?;
    let config: DatabaseConfig = serde_json::from_str(&config_json)
        .context("Failed to deserialize stored configuration")?;

    Ok(ConfigRow {
        user_id: row.try_get("", "user_id")?,
        config: SavedConfig {
            id: row.try_get("", "id")?,
            name: row.try_get("", "name")?,
            config,
            created_at: row.try_get("", "created_at")?,
        },
    })
}
