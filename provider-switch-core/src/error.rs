use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigurationMissing(PathBuf),

    #[error("{key} is missing or empty in {}", .path.display())]
    SecretMissing { key: String, path: PathBuf },

    #[error("Invalid settings document {}: {reason}", .path.display())]
    InvalidSettings { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Secrets file error: {0}")]
    Secrets(#[from] dotenvy::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
