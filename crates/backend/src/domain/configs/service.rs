use chrono::Utc;
use contracts::deployment::{SaveConfigRequest, SavedConfig};
use contracts::schema::SchemaGraph;

use super::{repository, ConfigError};

/// Validate and persist a configuration for the given user
pub async fn save(user_id: &str, request: SaveConfigRequest) -> Result<SavedConfig, ConfigError> {
    if request.name.trim().is_empty() {
        return Err(ConfigError::Invalid("Configuration name cannot be empty".into()));
    }

    // Hydrating through the graph enforces structural invariants before storage
    SchemaGraph::from_config(request.config.clone())
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;

    let saved = SavedConfig {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name,
        config: request.config,
        created_at: Utc::now().to_rfc3339(),
    };

    repository::insert(user_id, &saved).await?;

    Ok(saved)
}

/// List configurations owned by the given user
pub async fn list(user_id: &str) -> Result<Vec<SavedConfig>, ConfigError> {
    Ok(repository::list_by_user(user_id).await?)
}

/// Fetch a configuration, enforcing ownership
pub async fn get_owned(user_id: &str, config_id: &str) -> Result<SavedConfig, ConfigError> {
    let row = repository::get_by_id(config_id)
        .await?
        .ok_or(ConfigError::NotFound)?;

    if row.user_id != user_id {
        return Err(ConfigError::AccessDenied);
    }

    Ok(row.config)
}
