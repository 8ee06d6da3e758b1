//! Feedback aggregation as a pure reducer.
//!
//! ```text
//! (ArticleAggregate, FeedbackEvent) ──submit_feedback──> ArticleAggregate
//! ```
//!
//! Submissions are never rejected. A paragraph ID the state has not seen
//! yet (for example after the content changed) gets a fresh aggregate.
//! There is no decrement: a reaction cannot be retracted here.

use crate::snippet::truncate_snippet;
use crate::types::{ArticleAggregate, FeedbackEvent, FeedbackRecord, ParagraphAggregate};

/// Apply one feedback event and return the new state
#[must_use]
pub fn submit_feedback(mut state: ArticleAggregate, event: &FeedbackEvent) -> ArticleAggregate {
    state.submit(event);
    state
}

impl ArticleAggregate {
    /// Apply one feedback event in place
    pub fn submit(&mut self, event: &FeedbackEvent) {
        let paragraph = match self
            .paragraphs
            .iter()
            .position(|p| p.paragraph_id == event.paragraph_id)
        {
            Some(idx) => &mut self.paragraphs[idx],
            None => {
                log::debug!(
                    "First feedback for paragraph {} in article {}",
                    event.paragraph_id,
                    self.article_id
                );
                self.paragraphs
                    .push(ParagraphAggregate::new(event.paragraph_id.clone()));
                let last = self.paragraphs.len() - 1;
                &mut self.paragraphs[last]
            }
        };

        paragraph.record_event(event);
        self.total_feedbacks = self.total_feedbacks.saturating_add(1);
    }

    /// Apply a sequence of events, one increment each
    pub fn submit_all<'a>(&mut self, events: impl IntoIterator<Item = &'a FeedbackEvent>) {
        for event in events {
            self.submit(event);
        }
    }
}

impl ParagraphAggregate {
    fn record_event(&mut self, event: &FeedbackEvent) {
        match self.records.iter_mut().find(|r| r.kind == event.kind) {
            Some(record) => {
                record.count = record.count.saturating_add(1);
                record.timestamp = event.timestamp;
                if record.text_snippet.is_empty() && !event.text_snippet.is_empty() {
                    record.text_snippet = truncate_snippet(&event.text_snippet);
                }
            }
            None => self.records.push(FeedbackRecord::first(event)),
        }

        self.hotness = self
            .records
            .iter()
            .fold(0u64, |sum, r| sum.saturating_add(r.count));
    }
}
