use anyhow::{anyhow, Context, Result};
use margin_feedback::HeatmapConfig;
use margin_segmenter::SegmenterConfig;
use margin_selection::SelectionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration as read from a TOML file.
///
/// Every section is optional; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub segmenter: SegmenterConfig,
    pub heatmap: HeatmapConfig,
    pub selection: SelectionConfig,
}

impl EngineConfig {
    /// Load from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.segmenter
            .validate()
            .map_err(|e| anyhow!("[segmenter] {e}"))?;
        self.heatmap.validate().map_err(|e| anyhow!("[heatmap] {e}"))?;
        self.selection
            .validate()
            .map_err(|e| anyhow!("[selection] {e}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [heatmap]
            tiers = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.heatmap.tiers, 7);
        assert_eq!(config.heatmap.top_n, 5);
        assert_eq!(config.segmenter, SegmenterConfig::default());
        assert_eq!(config.selection.highlight_ms, 3_000);
    }

    #[test]
    fn test_invalid_section_named_in_error() {
        let config: EngineConfig = toml::from_str("[selection]\nhighlight_ms = 0\n").unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.starts_with("[selection]"), "{err}");
    }

    #[test]
    fn test_default_roundtrips_through_toml() {
        let rendered = toml::to_string_pretty(&EngineConfig::default()).unwrap();
        let parsed: EngineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, EngineConfig::default());
    }
}
