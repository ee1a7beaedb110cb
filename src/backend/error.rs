//! Errors returned across the backend boundary.
//!
//! The panels only ever show these as text.

use std::path::PathBuf;

pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Invalid(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Network error: {0}")]
    Http(String),

    #[error("{0}")]
    Process(String),

    #[error("Background task failed: {0}")]
    Join(String),
}

impl BackendError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BackendError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ureq::Error> for BackendError {
    fn from(err: ureq::Error) -> Self {
        BackendError::Http(err.to_string())
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(err: tokio::task::JoinError) -> Self {
        BackendError::Join(err.to_string())
    }
}
