//! # Margin Feedback
//!
//! Per-paragraph reader feedback: typed reactions attached to paragraph
//! segments, aggregated into a hotness signal and projected into a heatmap.
//!
//! ## Architecture
//!
//! ```text
//! FeedbackSource ──load──> ArticleAggregate
//!                               │
//!      FeedbackEvent ──submit──>│  (pure reducer, upsert, +1 per event)
//!                               │
//!                               └──> HeatmapProjector
//!                                      ├─ distribution by kind
//!                                      ├─ top N hot paragraphs
//!                                      └─ heat tiers [0, K-1]
//! ```
//!
//! Invariants kept by every transition:
//! - `paragraph.hotness == Σ record.count`
//! - `total_feedbacks == Σ paragraph.hotness`
//!
//! ## Example
//!
//! ```rust
//! use margin_feedback::{project, submit_feedback, ArticleAggregate, FeedbackEvent, FeedbackKind};
//!
//! let state = ArticleAggregate::empty("hello-world");
//! let state = submit_feedback(state, &FeedbackEvent::new(FeedbackKind::Confused, "p-1"));
//! let state = submit_feedback(state, &FeedbackEvent::new(FeedbackKind::Inspired, "p-1"));
//!
//! let heatmap = project(&state, 5);
//! assert_eq!(heatmap.hot_paragraphs[0].hotness, 2);
//! ```

mod aggregator;
mod error;
mod heatmap;
mod session;
mod snippet;
mod source;
mod types;

pub use aggregator::submit_feedback;
pub use error::{FeedbackError, Result};
pub use heatmap::{
    distribution, heat_tier, project, Heatmap, HeatmapConfig, HeatmapProjector, HotParagraph,
    KindCount, ParagraphTier,
};
pub use session::ArticleSession;
pub use snippet::{truncate_snippet, MAX_SNIPPET_CHARS};
pub use source::{EmptyFeedbackSource, FeedbackSource, InMemoryFeedbackSource, JsonFileStore};
pub use types::{
    now_unix_ms, record_id, ArticleAggregate, FeedbackEvent, FeedbackKind, FeedbackRecord,
    ParagraphAggregate,
};
