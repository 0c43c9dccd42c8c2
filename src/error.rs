use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitlineError>;

#[derive(Error, Debug)]
pub enum GitlineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}
