use crate::error::Result;
use crate::heatmap::{Heatmap, HeatmapProjector};
use crate::source::FeedbackSource;
use crate::types::{ArticleAggregate, FeedbackEvent, FeedbackKind};
use margin_segmenter::{ParagraphSegment, Segmenter};

/// Feedback context of one article view.
///
/// Owns the segments produced for the loaded content and the aggregate they
/// collect. Sessions never share state, so any number can run side by side.
#[derive(Debug, Clone)]
pub struct ArticleSession {
    segments: Vec<ParagraphSegment>,
    aggregate: ArticleAggregate,
}

impl ArticleSession {
    /// Segment `content` and load the article's stored feedback
    pub fn open(
        article_id: &str,
        content: &str,
        segmenter: &Segmenter,
        source: &dyn FeedbackSource,
    ) -> Result<Self> {
        let segments = segmenter.segment(content);
        let aggregate = source.load_initial_feedback(article_id)?;

        log::debug!(
            "Opened session for {article_id}: {} segments, {} stored feedbacks",
            segments.len(),
            aggregate.total_feedbacks
        );

        Ok(Self {
            segments,
            aggregate,
        })
    }

    pub fn article_id(&self) -> &str {
        &self.aggregate.article_id
    }

    pub fn segments(&self) -> &[ParagraphSegment] {
        &self.segments
    }

    pub fn segment(&self, paragraph_id: &str) -> Option<&ParagraphSegment> {
        self.segments
            .iter()
            .find(|s| s.paragraph_id == paragraph_id)
    }

    pub fn aggregate(&self) -> &ArticleAggregate {
        &self.aggregate
    }

    pub fn into_aggregate(self) -> ArticleAggregate {
        self.aggregate
    }

    /// Record a reaction on a paragraph, taking the snippet from its segment.
    /// IDs without a segment are still accepted, with an empty snippet.
    pub fn submit(&mut self, kind: FeedbackKind, paragraph_id: &str) -> &ArticleAggregate {
        self.submit_event(FeedbackEvent::new(kind, paragraph_id))
    }

    /// Record a prepared event; a missing snippet is filled from the segment
    pub fn submit_event(&mut self, mut event: FeedbackEvent) -> &ArticleAggregate {
        if event.text_snippet.is_empty() {
            match self.segment(&event.paragraph_id) {
                Some(segment) => event.text_snippet = segment.raw_text.clone(),
                None => log::debug!(
                    "Feedback for {} has no matching segment",
                    event.paragraph_id
                ),
            }
        }
        self.aggregate.submit(&event);
        &self.aggregate
    }

    pub fn heatmap(&self, projector: &HeatmapProjector) -> Heatmap {
        projector.project(&self.aggregate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{EmptyFeedbackSource, InMemoryFeedbackSource};
    use pretty_assertions::assert_eq;

    const POST: &str = "# Title\n\nPara A\n\nPara B";

    #[test]
    fn test_submit_uses_segment_snippet() {
        let mut session =
            ArticleSession::open("post", POST, &Segmenter::default(), &EmptyFeedbackSource)
                .unwrap();
        session.submit(FeedbackKind::Agree, "p-1");

        let record = &session.aggregate().paragraph("p-1").unwrap().records[0];
        assert_eq!(record.text_snippet, "Para A");
        assert_eq!(session.article_id(), "post");
    }

    #[test]
    fn test_unknown_paragraph_accepted() {
        let mut session =
            ArticleSession::open("post", POST, &Segmenter::default(), &EmptyFeedbackSource)
                .unwrap();
        let state = session.submit(FeedbackKind::Love, "p-42");
        assert_eq!(state.total_feedbacks, 1);
        assert_eq!(state.paragraph("p-42").unwrap().records[0].text_snippet, "");
    }

    #[test]
    fn test_resumes_from_source() {
        let mut stored = ArticleAggregate::empty("post");
        stored.submit(&FeedbackEvent::new(FeedbackKind::Thinking, "p-2").at(1));
        let mut source = InMemoryFeedbackSource::new();
        source.insert(stored).unwrap();

        let mut session =
            ArticleSession::open("post", POST, &Segmenter::default(), &source).unwrap();
        session.submit(FeedbackKind::Thinking, "p-2");

        let heatmap = session.heatmap(&HeatmapProjector::default());
        assert_eq!(heatmap.hot_paragraphs[0].paragraph_id, "p-2");
        assert_eq!(heatmap.hot_paragraphs[0].hotness, 2);
        assert!(session.aggregate().verify().is_ok());
    }

    #[test]
    fn test_sessions_are_independent() {
        let segmenter = Segmenter::default();
        let mut a = ArticleSession::open("a", POST, &segmenter, &EmptyFeedbackSource).unwrap();
        let b = ArticleSession::open("b", POST, &segmenter, &EmptyFeedbackSource).unwrap();
        a.submit(FeedbackKind::Agree, "p-0");
        assert_eq!(a.aggregate().total_feedbacks, 1);
        assert_eq!(b.aggregate().total_feedbacks, 0);
    }
}
