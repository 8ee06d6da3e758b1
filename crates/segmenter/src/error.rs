use thiserror::Error;

/// Result type for segmenter operations
pub type Result<T> = std::result::Result<T, SegmenterError>;

/// Errors that can occur while building a segmenter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmenterError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SegmenterError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
