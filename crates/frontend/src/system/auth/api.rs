use contracts::system::auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use gloo_net::http::Request;

use super::storage;
use crate::shared::api_utils::api_base;

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<AuthResponse, String> {
    let request = LoginRequest { username, password };

    let response = Request::post(&format!("{}/api/auth/login", api_base()))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Login failed: {}", response.status()));
    }

    response
        .json::<AuthResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Register a new account
pub async fn register(
    username: String,
    email: String,
    password: String,
) -> Result<AuthResponse, String> {
    let request = RegisterRequest {
        username,
        email,
        password,
    };

    let response = Request::post(&format!("{}/api/auth/register", api_base()))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Registration failed: {}", response.status()));
    }

    response
        .json::<AuthResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Tell the server we are leaving. The token itself is client-held.
pub async fn logout() {
    let _ = Request::post(&format!("{}/api/auth/logout", api_base()))
        .send()
        .await;
}

/// Get current user info
pub async fn get_current_user(token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&format!("{}/api/auth/me", api_base()))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if response.status() == 401 {
        storage::clear_token();
        return Err("Session expired".to_string());
    }
    if !response.ok() {
        return Err(format!("Get current user failed: {}", response.status()));
    }

    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Authenticated GET returning deserialized JSON. A 401 clears the stored
/// token so the app falls back to the login page.
pub async fn fetch_with_auth<T>(path: &str) -> Result<T, String>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let token = storage::get_token().ok_or("Not authenticated")?;

    let response = Request::get(&format!("{}{}", api_base(), path))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if response.status() == 401 {
        storage::clear_token();
        return Err("Session expired".to_string());
    }
    if !response.ok() {
        return Err(format!("Request failed: {}", response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Authenticated POST with a JSON body, returning deserialized JSON.
pub async fn post_with_auth<B, T>(path: &str, body: &B) -> Result<T, String>
where
    B: serde::Serialize,
    T: for<'de> serde::Deserialize<'de>,
{
    let token = storage::get_token().ok_or("Not authenticated")?;

    let response = Request::post(&format!("{}{}", api_base(), path))
        .header("Authorization", &format!("Bearer {}", token))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if response.status() == 401 {
        storage::clear_token();
        return Err("Session expired".to_string());
    }
    if !response.ok() {
        let detail = response.text().await.unwrap_or_default();
        if detail.is_empty() {
            return Err(format!("Request failed: {}", response.status()));
        }
        return Err(detail);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
