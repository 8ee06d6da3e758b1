use serde::{Deserialize, Serialize};

/// Configuration for paragraph segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Marker that opens and closes a fenced code block
    pub fence_marker: String,

    /// Number of fence delimiter lines at which the whole document is kept
    /// as a single atomic segment
    pub atomic_fence_threshold: usize,

    /// A fence tagged with a recognized language keeps the whole document
    /// as a single atomic segment
    pub atomic_on_language_fence: bool,

    /// Fence languages that count as recognized
    /// (empty = every known language)
    pub atomic_languages: Vec<String>,

    /// Treat content starting with `<` as pre-rendered HTML
    pub sniff_html: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            fence_marker: "```".to_string(),
            atomic_fence_threshold: 3,
            atomic_on_language_fence: true,
            atomic_languages: vec![],
            sniff_html: true,
        }
    }
}

impl SegmenterConfig {
    /// Config that always splits per paragraph: no whole-document fallback
    /// for fenced code, only fence atomicity.
    pub fn fine_grained() -> Self {
        Self {
            atomic_fence_threshold: usize::MAX,
            atomic_on_language_fence: false,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fence_marker.trim().is_empty() {
            return Err("fence_marker must not be empty".to_string());
        }

        if self.fence_marker.trim() != self.fence_marker {
            return Err(format!(
                "fence_marker ({:?}) must not carry surrounding whitespace",
                self.fence_marker
            ));
        }

        if self.atomic_fence_threshold == 0 {
            return Err("atomic_fence_threshold must be > 0".to_string());
        }

        Ok(())
    }
}
