use axum::{extract::Json, http::StatusCode};
use contracts::deployment::{DeploymentRequest, DeploymentStatus};

use super::configs::map_config_error;
use crate::domain::deploy::{service, DeployError};
use crate::system::auth::extractor::CurrentUser;

/// Deploy a saved configuration to a remote server
pub async fn deploy(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<DeploymentRequest>,
) -> Result<Json<DeploymentStatus>, (StatusCode, String)> {
    let status = service::deploy(&claims.sub, request).await.map_err(|err| {
        match err {
            DeployError::Config(e) => map_config_error(e),
            DeployError::Connection(_) | DeployError::Command { .. } => {
                tracing::error!("Deployment failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    })?;

    Ok(Json(status))
}
