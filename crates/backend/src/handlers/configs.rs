use axum::{extract::Json, http::StatusCode};
use contracts::deployment::{SaveConfigRequest, SavedConfig};

use crate::domain::configs::{service, ConfigError};
use crate::system::auth::extractor::CurrentUser;

/// Save a named schema configuration for the current user
pub async fn save(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<SaveConfigRequest>,
) -> Result<Json<SavedConfig>, (StatusCode, String)> {
    let saved = service::save(&claims.sub, request)
        .await
        .map_err(map_config_error)?;

    Ok(Json(saved))
}

/// List configurations saved by the current user
pub async fn list(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<SavedConfig>>, (StatusCode, String)> {
    let configs = service::list(&claims.sub).await.map_err(map_config_error)?;
    Ok(Json(configs))
}

pub(crate) fn map_config_error(err: ConfigError) -> (StatusCode, String) {
    let status = match &err {
        ConfigError::NotFound => StatusCode::NOT_FOUND,
        ConfigError::AccessDenied => StatusCode::FORBIDDEN,
        ConfigError::Invalid(_) => StatusCode::BAD_REQUEST,
        ConfigError::Internal(e) => {
            tracing::error!("Configuration storage error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}
