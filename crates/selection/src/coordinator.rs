use crate::config::SelectionConfig;
use crate::error::{Result, SelectionError};
use crate::locator::ParagraphLocator;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

/// Highlight state of a single paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightState {
    Normal,
    Highlighted,
}

/// Outcome of selecting a paragraph from the heatmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Paragraph the renderer scrolled to
    pub scroll_target: String,
    /// When the highlight expires
    pub highlight_until: Instant,
}

struct ActiveHighlight {
    paragraph_id: String,
    until: Instant,
    generation: u64,
    expiry: JoinHandle<()>,
}

#[derive(Default)]
struct SelectionState {
    active: Option<ActiveHighlight>,
    generation: u64,
}

fn lock(state: &Mutex<SelectionState>) -> MutexGuard<'_, SelectionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Maps heatmap selections to a scroll target plus a timed, exclusive
/// highlight.
///
/// At most one paragraph is highlighted. Selecting another paragraph
/// de-highlights the current one at once and cancels its expiry timer
/// before arming a new one.
pub struct SelectionCoordinator<L: ParagraphLocator> {
    locator: Arc<L>,
    highlight_for: Duration,
    runtime: Handle,
    state: Arc<Mutex<SelectionState>>,
}

impl<L: ParagraphLocator> SelectionCoordinator<L> {
    /// Create a coordinator that runs its timer on the current Tokio runtime
    pub fn new(locator: L, config: SelectionConfig) -> Result<Self> {
        let runtime =
            Handle::try_current().map_err(|e| SelectionError::NoRuntime(e.to_string()))?;
        Self::with_handle(locator, config, runtime)
    }

    /// Create a coordinator that runs its timer on the given runtime
    pub fn with_handle(locator: L, config: SelectionConfig, runtime: Handle) -> Result<Self> {
        config.validate().map_err(SelectionError::InvalidConfig)?;
        Ok(Self {
            locator: Arc::new(locator),
            highlight_for: config.highlight_duration(),
            runtime,
            state: Arc::new(Mutex::new(SelectionState::default())),
        })
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Scroll to and highlight a paragraph.
    ///
    /// Returns `None` without touching any state when the locator has no
    /// node for `paragraph_id`.
    pub fn select(&self, paragraph_id: &str) -> Option<Selection> {
        if !self.locator.contains(paragraph_id) {
            log::warn!("No rendered paragraph for {paragraph_id}; selection ignored");
            return None;
        }

        let mut state = lock(&self.state);
        if let Some(previous) = state.active.take() {
            previous.expiry.abort();
            if previous.paragraph_id != paragraph_id {
                self.locator.set_highlighted(&previous.paragraph_id, false);
            }
        }

        state.generation += 1;
        let generation = state.generation;
        let until = Instant::now() + self.highlight_for;

        self.locator.scroll_into_view(paragraph_id);
        self.locator.set_highlighted(paragraph_id, true);

        let expiry = self.arm_expiry(paragraph_id.to_string(), generation, until);
        state.active = Some(ActiveHighlight {
            paragraph_id: paragraph_id.to_string(),
            until,
            generation,
            expiry,
        });

        log::debug!("Highlighted {paragraph_id} (generation {generation})");
        Some(Selection {
            scroll_target: paragraph_id.to_string(),
            highlight_until: until,
        })
    }

    /// Drop the current highlight, if any, and cancel its timer
    pub fn clear(&self) {
        let mut state = lock(&self.state);
        if let Some(active) = state.active.take() {
            active.expiry.abort();
            self.locator.set_highlighted(&active.paragraph_id, false);
        }
    }

    /// Paragraph currently highlighted
    pub fn highlighted(&self) -> Option<String> {
        lock(&self.state)
            .active
            .as_ref()
            .map(|a| a.paragraph_id.clone())
    }

    /// Expiry of the current highlight
    pub fn highlight_until(&self) -> Option<Instant> {
        lock(&self.state).active.as_ref().map(|a| a.until)
    }

    pub fn state_of(&self, paragraph_id: &str) -> HighlightState {
        match lock(&self.state).active.as_ref() {
            Some(active) if active.paragraph_id == paragraph_id => HighlightState::Highlighted,
            _ => HighlightState::Normal,
        }
    }

    fn arm_expiry(&self, paragraph_id: String, generation: u64, until: Instant) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let locator = Arc::clone(&self.locator);

        self.runtime.spawn(async move {
            tokio::time::sleep_until(until).await;

            // An aborted timer may already be past its sleep; the generation
            // tells it whether it still owns the highlight.
            let mut state = lock(&state);
            let owns_highlight = state
                .active
                .as_ref()
                .is_some_and(|a| a.generation == generation);
            if owns_highlight {
                state.active = None;
                locator.set_highlighted(&paragraph_id, false);
                log::debug!("Highlight on {paragraph_id} expired");
            }
        })
    }
}

impl<L: ParagraphLocator> Drop for SelectionCoordinator<L> {
    fn drop(&mut self) {
        self.clear();
    }
}
