use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Finds the rendered node for a paragraph.
///
/// Implemented by the renderer, which tags each paragraph's root node with
/// its paragraph ID. Calls happen while the coordinator holds its state
/// lock, so implementations must not call back into the coordinator.
pub trait ParagraphLocator: Send + Sync + 'static {
    /// Whether a rendered node exists for this paragraph
    fn contains(&self, paragraph_id: &str) -> bool;

    /// Bring the paragraph into view
    fn scroll_into_view(&self, paragraph_id: &str);

    /// Toggle the highlight styling of the paragraph
    fn set_highlighted(&self, paragraph_id: &str, highlighted: bool);
}

/// In-memory locator for headless use: tracks which known paragraphs are
/// highlighted and the scroll history.
#[derive(Debug, Default)]
pub struct HeadlessLocator {
    inner: Mutex<HeadlessState>,
}

#[derive(Debug, Default)]
struct HeadlessState {
    highlighted: HashMap<String, bool>,
    scrolls: Vec<String>,
}

impl HeadlessLocator {
    /// Locator that knows the given paragraph IDs
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let highlighted = ids.into_iter().map(|id| (id.into(), false)).collect();
        Self {
            inner: Mutex::new(HeadlessState {
                highlighted,
                scrolls: Vec::new(),
            }),
        }
    }

    pub fn is_highlighted(&self, paragraph_id: &str) -> bool {
        self.lock()
            .highlighted
            .get(paragraph_id)
            .copied()
            .unwrap_or(false)
    }

    /// Paragraph IDs currently highlighted, sorted
    pub fn highlighted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .lock()
            .highlighted
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Every scroll request, oldest first
    pub fn scrolls(&self) -> Vec<String> {
        self.lock().scrolls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ParagraphLocator for HeadlessLocator {
    fn contains(&self, paragraph_id: &str) -> bool {
        self.lock().highlighted.contains_key(paragraph_id)
    }

    fn scroll_into_view(&self, paragraph_id: &str) {
        self.lock().scrolls.push(paragraph_id.to_string());
    }

    fn set_highlighted(&self, paragraph_id: &str, highlighted: bool) {
        if let Some(flag) = self.lock().highlighted.get_mut(paragraph_id) {
            *flag = highlighted;
        }
    }
}
