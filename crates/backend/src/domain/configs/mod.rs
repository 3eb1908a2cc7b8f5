pub mod repository;
pub mod service;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,
    #[error("Configuration belongs to another user")]
    AccessDenied,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
