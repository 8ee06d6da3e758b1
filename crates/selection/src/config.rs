use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for selection highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// How long a selected paragraph stays highlighted
    pub highlight_ms: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { highlight_ms: 3_000 }
    }
}

impl SelectionConfig {
    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.highlight_ms == 0 {
            return Err("highlight_ms must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_three_seconds() {
        let config = SelectionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.highlight_duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(SelectionConfig { highlight_ms: 0 }.validate().is_err());
    }
}
