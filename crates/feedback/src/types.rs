use crate::error::{FeedbackError, Result};
use crate::snippet::truncate_snippet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Reaction a reader can attach to a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Thinking,
    Inspired,
    Confused,
    Agree,
    Disagree,
    Love,
}

impl FeedbackKind {
    /// Every kind, in declaration order
    pub const ALL: [FeedbackKind; 6] = [
        Self::Thinking,
        Self::Inspired,
        Self::Confused,
        Self::Agree,
        Self::Disagree,
        Self::Love,
    ];

    /// Get kind name as string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thinking => "thinking",
            Self::Inspired => "inspired",
            Self::Confused => "confused",
            Self::Agree => "agree",
            Self::Disagree => "disagree",
            Self::Love => "love",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FeedbackError::UnknownKind(s.to_string()))
    }
}

/// Aggregated count of one reaction kind on one paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Deterministic ID (`<paragraphId>:<kind>`)
    pub id: String,
    pub kind: FeedbackKind,
    /// Always >= 1
    pub count: u64,
    pub paragraph_id: String,
    /// At most 100 chars of the paragraph text
    pub text_snippet: String,
    /// Last time this record was touched (unix ms)
    pub timestamp: u64,
}

impl FeedbackRecord {
    /// Create the first record for a `(paragraph, kind)` pair
    #[must_use]
    pub fn first(event: &FeedbackEvent) -> Self {
        Self {
            id: record_id(&event.paragraph_id, event.kind),
            kind: event.kind,
            count: 1,
            paragraph_id: event.paragraph_id.clone(),
            text_snippet: truncate_snippet(&event.text_snippet),
            timestamp: event.timestamp,
        }
    }
}

/// Record ID for a `(paragraph, kind)` pair
#[must_use]
pub fn record_id(paragraph_id: &str, kind: FeedbackKind) -> String {
    format!("{paragraph_id}:{kind}")
}

/// All feedback attached to one paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphAggregate {
    pub paragraph_id: String,
    /// At most one record per kind, in insertion order
    pub records: Vec<FeedbackRecord>,
    /// Sum of record counts
    pub hotness: u64,
}

impl ParagraphAggregate {
    #[must_use]
    pub fn new(paragraph_id: impl Into<String>) -> Self {
        Self {
            paragraph_id: paragraph_id.into(),
            records: Vec::new(),
            hotness: 0,
        }
    }

    /// Get the record for a kind, if any
    pub fn record(&self, kind: FeedbackKind) -> Option<&FeedbackRecord> {
        self.records.iter().find(|r| r.kind == kind)
    }

    /// Most frequent record; ties go to the earliest inserted
    pub fn top_record(&self) -> Option<&FeedbackRecord> {
        self.records
            .iter()
            .fold(None, |best: Option<&FeedbackRecord>, record| match best {
                Some(b) if b.count >= record.count => Some(b),
                _ => Some(record),
            })
    }

    /// Sum of record counts, `None` on overflow
    fn recount(&self) -> Option<u64> {
        self.records
            .iter()
            .try_fold(0u64, |sum, r| sum.checked_add(r.count))
    }
}

/// Feedback state of one article view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAggregate {
    pub article_id: String,
    pub total_feedbacks: u64,
    #[serde(default)]
    pub paragraphs: Vec<ParagraphAggregate>,
}

impl ArticleAggregate {
    /// Create an aggregate with no feedback
    #[must_use]
    pub fn empty(article_id: impl Into<String>) -> Self {
        Self {
            article_id: article_id.into(),
            total_feedbacks: 0,
            paragraphs: Vec::new(),
        }
    }

    /// Get the aggregate for a paragraph, if it has received feedback
    pub fn paragraph(&self, paragraph_id: &str) -> Option<&ParagraphAggregate> {
        self.paragraphs
            .iter()
            .find(|p| p.paragraph_id == paragraph_id)
    }

    /// Hotness of a paragraph (0 when unseen)
    pub fn hotness_of(&self, paragraph_id: &str) -> u64 {
        self.paragraph(paragraph_id).map_or(0, |p| p.hotness)
    }

    /// Check every aggregate invariant, reporting the first violation.
    pub fn verify(&self) -> Result<()> {
        let mut seen_paragraphs = HashSet::new();
        let mut hotness_sum = 0u64;

        for paragraph in &self.paragraphs {
            if !seen_paragraphs.insert(paragraph.paragraph_id.as_str()) {
                return Err(FeedbackError::invariant(format!(
                    "paragraph {} appears more than once",
                    paragraph.paragraph_id
                )));
            }

            let mut seen_kinds = HashSet::new();
            for record in &paragraph.records {
                if !seen_kinds.insert(record.kind) {
                    return Err(FeedbackError::invariant(format!(
                        "paragraph {} has more than one {} record",
                        paragraph.paragraph_id, record.kind
                    )));
                }
                if record.count == 0 {
                    return Err(FeedbackError::invariant(format!(
                        "record {} has count 0",
                        record.id
                    )));
                }
                if record.paragraph_id != paragraph.paragraph_id {
                    return Err(FeedbackError::invariant(format!(
                        "record {} filed under paragraph {}",
                        record.id, paragraph.paragraph_id
                    )));
                }
            }

            let recount = paragraph.recount().ok_or_else(|| {
                FeedbackError::invariant(format!(
                    "paragraph {} record sum overflows u64",
                    paragraph.paragraph_id
                ))
            })?;
            if paragraph.hotness != recount {
                return Err(FeedbackError::invariant(format!(
                    "paragraph {} hotness {} != record sum {}",
                    paragraph.paragraph_id, paragraph.hotness, recount
                )));
            }
            hotness_sum = hotness_sum
                .checked_add(recount)
                .ok_or_else(|| FeedbackError::invariant("article hotness sum overflows u64"))?;
        }

        if hotness_sum != self.total_feedbacks {
            return Err(FeedbackError::invariant(format!(
                "total_feedbacks {} != hotness sum {}",
                self.total_feedbacks, hotness_sum
            )));
        }

        Ok(())
    }
}

/// A single reader reaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEvent {
    pub kind: FeedbackKind,
    pub paragraph_id: String,
    #[serde(default)]
    pub text_snippet: String,
    /// Submission time (unix ms); stamped on creation when absent
    #[serde(default = "now_unix_ms")]
    pub timestamp: u64,
}

impl FeedbackEvent {
    /// Create an event stamped with the current time
    pub fn new(kind: FeedbackKind, paragraph_id: impl Into<String>) -> Self {
        Self {
            kind,
            paragraph_id: paragraph_id.into(),
            text_snippet: String::new(),
            timestamp: now_unix_ms(),
        }
    }

    /// Builder: set text snippet
    #[must_use]
    pub fn snippet(mut self, text: impl Into<String>) -> Self {
        self.text_snippet = text.into();
        self
    }

    /// Builder: set timestamp
    #[must_use]
    pub const fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
