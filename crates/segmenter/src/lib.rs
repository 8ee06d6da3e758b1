//! # Margin Segmenter
//!
//! Splits article content into stable, addressable paragraph units that
//! reader feedback can attach to.
//!
//! ## Philosophy
//!
//! Segments must survive re-renders, so the segmenter:
//! - Derives every paragraph ID from its ordinal (`p-0`, `p-1`, ...)
//! - Never splits a fenced code block, whatever blank lines it contains
//! - Emits each heading as its own unit
//! - Leaves HTML to the renderer and keeps it as a single unit
//!
//! ## Architecture
//!
//! ```text
//! Raw Content
//!     │
//!     ├──> Sniffing
//!     │    ├─> HTML (starts with `<`)          → one document segment
//!     │    └─> many fences / language fences   → one document segment
//!     │
//!     └──> Line Scan (in_code_fence flag)
//!          ├─> fence line  → toggle, append
//!          ├─> blank line  → flush paragraph
//!          ├─> heading     → flush, emit heading
//!          └─> other       → append
//! ```
//!
//! ## Example
//!
//! ```rust
//! use margin_segmenter::segment;
//!
//! let segments = segment("# Title\n\nPara A\n\nPara B");
//! let ids: Vec<_> = segments.iter().map(|s| s.paragraph_id.as_str()).collect();
//! assert_eq!(ids, ["p-0", "p-1", "p-2"]);
//! ```

mod config;
mod error;
mod fence;
mod segmenter;
mod types;

pub use config::SegmenterConfig;
pub use error::{Result, SegmenterError};
pub use fence::FenceLanguage;
pub use segmenter::Segmenter;
pub use types::{paragraph_id, ParagraphSegment, SegmentKind};

/// Segment content with the default configuration
pub fn segment(content: &str) -> Vec<ParagraphSegment> {
    Segmenter::default().segment(content)
}
