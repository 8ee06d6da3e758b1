use thiserror::Error;

/// Result type for feedback operations
pub type Result<T> = std::result::Result<T, FeedbackError>;

/// Errors raised at the edges of the feedback engine.
///
/// The transitions themselves are total; these cover configuration,
/// snapshot loading, and parsing of external input.
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A snapshot breaks the aggregate invariants
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Article ID unusable as a storage key
    #[error("Invalid article id: {0:?}")]
    InvalidArticleId(String),

    /// Feedback kind outside the fixed set
    #[error("Unknown feedback kind: {0:?}")]
    UnknownKind(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot (de)serialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl FeedbackError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invariant violation error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
