//! # Margin Selection
//!
//! Resolves a heatmap selection back to a rendered paragraph: scroll it into
//! view and highlight it for a fixed window.
//!
//! ```text
//! heatmap click ──select(p-n)──> SelectionCoordinator
//!                                   ├─ de-highlight previous, abort its timer
//!                                   ├─ locator.scroll_into_view(p-n)
//!                                   ├─ locator.set_highlighted(p-n, true)
//!                                   └─ arm expiry timer (default 3000 ms)
//! ```
//!
//! Rendering stays outside: the renderer implements [`ParagraphLocator`].
//! A paragraph the locator cannot find turns the selection into a no-op.

mod config;
mod coordinator;
mod error;
mod locator;

pub use config::SelectionConfig;
pub use coordinator::{HighlightState, Selection, SelectionCoordinator};
pub use error::{Result, SelectionError};
pub use locator::{HeadlessLocator, ParagraphLocator};
