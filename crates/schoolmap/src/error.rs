use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    /// A queued write failed. Shared because coalesced saves report the same outcome.
    #[error("Persist error: {0}")]
    Persist(Arc<DirectoryError>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<confique::Error> for DirectoryError {
    fn from(err: confique::Error) -> Self {
        DirectoryError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
