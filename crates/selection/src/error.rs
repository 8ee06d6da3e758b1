use thiserror::Error;

/// Result type for selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The expiry timer needs a Tokio runtime to run on
    #[error("No Tokio runtime available: {0}")]
    NoRuntime(String),
}
