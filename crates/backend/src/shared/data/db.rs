use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to sqlite and bootstrap the schema. `db_path` defaults to
/// `target/db/app.db`; tests pass a throwaway path.
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("database already initialized"))?;
    Ok(())
}

/// Minimal schema bootstrap; idempotent.
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS database_configs (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            config TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );
        "#,
    ];
    for sql in statements {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

/// Panics when called before `initialize_database`; that is a programming
/// error, not a runtime condition.
pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("database not initialized; call initialize_database() first")
}

#[cfg(test)]
mod tests {
    use contracts::deployment::SaveConfigRequest;
    use contracts::schema::SchemaGraph;
    use contracts::system::auth::RegisterRequest;

    use crate::domain::configs::{self, ConfigError};
    use crate::system::users;

    // The connection is a process-wide singleton, so every database-backed
    // assertion lives in one flow against a scratch sqlite file.
    #[tokio::test]
    async fn registration_login_and_config_flow() {
        let dir = tempfile::tempdir().unwrap();
        let db_file = dir.path().join("app.db");
        super::initialize_database(Some(db_file.to_str().unwrap()))
            .await
            .unwrap();

        let user = users::service::register(RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap();

        let duplicate = users::service::register(RegisterRequest {
            username: "alice".into(),
            email: "other@example.com".into(),
            password: "correct horse".into(),
        })
        .await;
        assert!(duplicate.is_err());

        assert!(users::service::verify_credentials("alice", "correct horse")
            .await
            .unwrap()
            .is_some());
        assert!(users::service::verify_credentials("alice", "wrong password")
            .await
            .unwrap()
            .is_none());

        let mut graph = SchemaGraph::new();
        graph.add_table();
        let saved = configs::service::save(
            &user.id,
            SaveConfigRequest {
                name: "shop".into(),
                config: graph.to_config(),
            },
        )
        .await
        .unwrap();

        let listed = configs::service::list(&user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, saved.id);

        assert!(matches!(
            configs::service::get_owned("someone-else", &saved.id)
                .await
                .unwrap_err(),
            ConfigError::AccessDenied
        ));
        assert!(matches!(
            configs::service::get_owned(&user.id, "missing")
                .await
                .unwrap_err(),
            ConfigError::NotFound
        ));
    }
}
