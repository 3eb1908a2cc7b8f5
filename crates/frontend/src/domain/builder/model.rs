use contracts::deployment::{SaveConfigRequest, SavedConfig};

use crate::system::auth::api::{fetch_with_auth, post_with_auth};

/// Save the current schema under a name
pub async fn save_config(request: &SaveConfigRequest) -> Result<SavedConfig, String> {
    post_with_auth("/api/database/config", request).await
}

/// List configurations saved by the current user
pub async fn fetch_configs() -> Result<Vec<SavedConfig>, String> {
    fetch_with_auth("/api/database/configs").await
}
