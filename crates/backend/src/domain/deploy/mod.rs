pub mod commands;
pub mod service;

use thiserror::Error;

use crate::domain::configs::ConfigError;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("SSH connection failed: {0}")]
    Connection(String),
    #[error("Remote command exited with status {status}: {command}")]
    Command { command: String, status: i32 },
}
