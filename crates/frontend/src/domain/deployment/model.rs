use contracts::deployment::{DeploymentRequest, DeploymentStatus, SavedConfig};

use crate::system::auth::api::{fetch_with_auth, post_with_auth};

/// List configurations available for deployment
pub async fn fetch_configs() -> Result<Vec<SavedConfig>, String> {
    fetch_with_auth("/api/database/configs").await
}

/// Submit a deployment to the backend
pub async fn deploy(request: &DeploymentRequest) -> Result<DeploymentStatus, String> {
    post_with_auth("/api/database/deploy", request).await
}
