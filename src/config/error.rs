use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read settings stream: {0}")]
    StreamRead(#[source] std::io::Error),

    #[error("failed to parse settings file '{path}': {detail}")]
    ParseError { path: PathBuf, detail: String },

    #[error("failed to parse settings stream: {0}")]
    ParseStream(String),

    #[error("unsupported value for setting '{0}' (nested arrays and tables are not allowed)")]
    UnsupportedValue(String),

    #[error("settings resource not found: {0}")]
    ResourceNotFound(String),

    #[error("unable to create the directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{0}' exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
