//! Initial-feedback sources.
//!
//! Persistence lives outside the engine; a session only asks a
//! [`FeedbackSource`] for the snapshot it starts from. [`JsonFileStore`] is a
//! file-backed reference implementation used by the CLI.

use crate::error::{FeedbackError, Result};
use crate::types::ArticleAggregate;
use std::collections::HashMap;
use std::path::PathBuf;

/// Supplies the feedback an article view starts from
pub trait FeedbackSource {
    fn load_initial_feedback(&self, article_id: &str) -> Result<ArticleAggregate>;
}

/// Source with no stored feedback
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFeedbackSource;

impl FeedbackSource for EmptyFeedbackSource {
    fn load_initial_feedback(&self, article_id: &str) -> Result<ArticleAggregate> {
        Ok(ArticleAggregate::empty(article_id))
    }
}

/// Snapshots held in memory, keyed by article ID
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackSource {
    snapshots: HashMap<String, ArticleAggregate>,
}

impl InMemoryFeedbackSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a snapshot, replacing any previous one for the same article
    pub fn insert(&mut self, snapshot: ArticleAggregate) -> Result<()> {
        snapshot.verify()?;
        self.snapshots
            .insert(snapshot.article_id.clone(), snapshot);
        Ok(())
    }
}

impl FeedbackSource for InMemoryFeedbackSource {
    fn load_initial_feedback(&self, article_id: &str) -> Result<ArticleAggregate> {
        Ok(self
            .snapshots
            .get(article_id)
            .cloned()
            .unwrap_or_else(|| ArticleAggregate::empty(article_id)))
    }
}

/// One JSON snapshot per article under a directory (`<dir>/<article_id>.json`)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot file for an article
    pub fn path_for(&self, article_id: &str) -> Result<PathBuf> {
        validate_article_id(article_id)?;
        Ok(self.dir.join(format!("{article_id}.json")))
    }

    /// Write a snapshot (temp file + rename)
    pub fn save(&self, snapshot: &ArticleAggregate) -> Result<PathBuf> {
        snapshot.verify()?;
        let path = self.path_for(&snapshot.article_id)?;
        std::fs::create_dir_all(&self.dir)?;

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &path)?;

        log::debug!(
            "Saved feedback for {} ({} total) to {}",
            snapshot.article_id,
            snapshot.total_feedbacks,
            path.display()
        );
        Ok(path)
    }
}

impl FeedbackSource for JsonFileStore {
    fn load_initial_feedback(&self, article_id: &str) -> Result<ArticleAggregate> {
        let path = self.path_for(article_id)?;
        if !path.exists() {
            log::debug!("No stored feedback for {article_id}; starting empty");
            return Ok(ArticleAggregate::empty(article_id));
        }

        let bytes = std::fs::read(&path)?;
        let snapshot: ArticleAggregate = serde_json::from_slice(&bytes)?;
        if snapshot.article_id != article_id {
            return Err(FeedbackError::invariant(format!(
                "{} holds feedback for article {:?}",
                path.display(),
                snapshot.article_id
            )));
        }
        snapshot.verify()?;
        Ok(snapshot)
    }
}

fn validate_article_id(article_id: &str) -> Result<()> {
    let bad = article_id.is_empty()
        || article_id == "."
        || article_id.contains("..")
        || article_id.contains(['/', '\\', '\0']);
    if bad {
        return Err(FeedbackError::InvalidArticleId(article_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeedbackEvent, FeedbackKind};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample(article_id: &str) -> ArticleAggregate {
        let mut state = ArticleAggregate::empty(article_id);
        state.submit(&FeedbackEvent::new(FeedbackKind::Love, "p-1").at(5));
        state.submit(&FeedbackEvent::new(FeedbackKind::Love, "p-1").at(6));
        state
    }

    #[test]
    fn test_empty_source() {
        let state = EmptyFeedbackSource.load_initial_feedback("post").unwrap();
        assert_eq!(state, ArticleAggregate::empty("post"));
    }

    #[test]
    fn test_in_memory_source() {
        let mut source = InMemoryFeedbackSource::new();
        source.insert(sample("post")).unwrap();
        assert_eq!(source.load_initial_feedback("post").unwrap().total_feedbacks, 2);
        assert_eq!(source.load_initial_feedback("other").unwrap().total_feedbacks, 0);

        let mut broken = sample("broken");
        broken.total_feedbacks = 9;
        assert!(source.insert(broken).is_err());
    }

    #[test]
    fn test_file_store_save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("feedback"));

        assert_eq!(
            store.load_initial_feedback("post").unwrap(),
            ArticleAggregate::empty("post")
        );

        let path = store.save(&sample("post")).unwrap();
        assert!(path.ends_with("post.json"));
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load_initial_feedback("post").unwrap(), sample("post"));
    }

    #[test]
    fn test_file_store_rejects_bad_snapshots() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        std::fs::write(dir.path().join("garbled.json"), b"{not json").unwrap();
        assert!(matches!(
            store.load_initial_feedback("garbled"),
            Err(FeedbackError::JsonError(_))
        ));

        let mut inconsistent = sample("inconsistent");
        inconsistent.total_feedbacks = 7;
        std::fs::write(
            dir.path().join("inconsistent.json"),
            serde_json::to_vec(&inconsistent).unwrap(),
        )
        .unwrap();
        assert!(matches!(
            store.load_initial_feedback("inconsistent"),
            Err(FeedbackError::InvariantViolation(_))
        ));

        std::fs::write(
            dir.path().join("renamed.json"),
            serde_json::to_vec(&sample("original")).unwrap(),
        )
        .unwrap();
        assert!(store.load_initial_feedback("renamed").is_err());
    }

    #[test]
    fn test_file_store_rejects_overflowing_counts() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        // u64::MAX + 2 wraps to 1, matching the declared totals
        let snapshot = serde_json::json!({
            "articleId": "post",
            "totalFeedbacks": 1,
            "paragraphs": [{
                "paragraphId": "p-0",
                "hotness": 1,
                "records": [
                    {"id": "p-0:love", "kind": "love", "count": u64::MAX,
                     "paragraphId": "p-0", "textSnippet": "", "timestamp": 0},
                    {"id": "p-0:agree", "kind": "agree", "count": 2,
                     "paragraphId": "p-0", "textSnippet": "", "timestamp": 0}
                ]
            }]
        });
        std::fs::write(
            dir.path().join("post.json"),
            serde_json::to_vec(&snapshot).unwrap(),
        )
        .unwrap();

        let err = store.load_initial_feedback("post").unwrap_err();
        assert!(matches!(err, FeedbackError::InvariantViolation(_)));
        assert!(err.to_string().contains("overflows u64"), "{err}");
    }

    #[test]
    fn test_article_id_validation() {
        let store = JsonFileStore::new("/tmp/unused");
        for bad in ["", ".", "../etc", "a/b", "a\\b"] {
            assert!(matches!(
                store.path_for(bad),
                Err(FeedbackError::InvalidArticleId(_))
            ));
        }
        assert!(store.path_for("2024-10-hello-world").is_ok());
    }
}
