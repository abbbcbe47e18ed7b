//! Error type for settings and profile I/O.
//!
//! The assignment state machine itself never fails; only loading and saving
//! files can.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to encode TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

pub type Result<T> = std::result::Result<T, Error>;
