// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodehookError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("start hook exited with status {0}")]
    HookFailed(i32),

    #[error("start hook could not be started: {0}")]
    HookSpawn(#[source] std::io::Error),

    #[error("management context is unavailable")]
    ManagementUnavailable,

    #[error("connect command '{cmd}' exited with status {code}")]
    ConnectCommandFailed { cmd: String, code: i32 },

    #[error("operation interrupted")]
    Interrupted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, NodehookError>;
