use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};

use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, users::service as user_service};

/// Login handler
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<AuthResponse>, StatusCode> {
    // Verify credentials
    let user = user_service::verify_credentials(&request.username, &request.password)
        .await
        .map_err(|e| {
            tracing::error!("Credential check failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = jwt::generate_token(&user.id, &user.username)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let response = AuthResponse {
        token,
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    };

    Ok(Json(response))
}

/// Register handler
pub async fn register(
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, StatusCode> {
    let user = user_service::register(request).await.map_err(|e| {
        tracing::warn!("Registration rejected: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let token = jwt::generate_token(&user.id, &user.username)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let response = AuthResponse {
        token,
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    };

    Ok(Json(response))
}

/// Logout handler. Tokens are stateless, so the client just drops its copy.
pub async fn logout() -> StatusCode {
    StatusCode::OK
}

/// Get current user handler (protected by middleware)
pub async fn current_user(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<UserInfo>, StatusCode> {
    let user = user_service::get_by_id(&claims.sub)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}
