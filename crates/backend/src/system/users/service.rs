use anyhow::Result;
use chrono::Utc;
use contracts::system::auth::RegisterRequest;

use super::{repository, UserRecord};
use crate::system::auth::password;

/// Register a new user account
pub async fn register(request: RegisterRequest) -> Result<UserRecord> {
    // Validate username
    if request.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }

    // Check if username already exists
    if repository::get_by_username(&request.username).await?.is_some() {
        return Err(anyhow::anyhow!("Username already exists"));
    }

    // Basic email validation
    if !request.email.contains('@') {
        return Err(anyhow::anyhow!("Invalid email format"));
    }

    // Validate password strength
    password::validate_password_strength(&request.password)?;

    // Hash password
    let password_hash = password::hash_password(&request.password)?;

    let user = UserRecord {
        id: uuid::Uuid::new_v4().to_string(),
        username: request.username,
        email: request.email,
        created_at: Utc::now().to_rfc3339(),
    };

    repository::create_with_password(&user, &password_hash).await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_by_id(id: &str) -> Result<Option<UserRecord>> {
    repository::get_by_id(id).await
}

/// Verify user credentials (for login)
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<UserRecord>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &password_hash)? {
        return Ok(None);
    }

    Ok(Some(user))
}
