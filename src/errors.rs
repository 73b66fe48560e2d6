// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Command string is empty")]
    EmptyCommand,

    #[error("Notification delivery failed: {0}")]
    Notification(#[from] reqwest::Error),

    #[error("Webhook rejected notification with HTTP status {0}")]
    WebhookStatus(u16),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RunwatchError>;
