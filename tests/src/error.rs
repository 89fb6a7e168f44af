//! Structured error types for the harness

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("crypto operation failed: {0}")]
    Crypto(#[from] pqe_api::Error),

    #[error("invalid test vector {label}: {reason}")]
    InvalidVector { label: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
