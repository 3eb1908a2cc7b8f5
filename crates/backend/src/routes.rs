use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Auth routes (public)
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route("/api/auth/register", post(system::handlers::auth::register))
        .route("/api/auth/logout", post(system::handlers::auth::logout))
        // Auth routes (protected)
        .route(
            "/api/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // Schema configuration routes (protected)
        .route(
            "/api/database/config",
            post(handlers::configs::save)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/database/configs",
            get(handlers::configs::list)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // Deployment route (protected)
        .route(
            "/api/database/deploy",
            post(handlers::deploy::deploy)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
}
