use serde::{Deserialize, Serialize};

/// An addressable paragraph unit of article content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphSegment {
    /// Stable ID derived from the ordinal (`p-<n>`)
    pub paragraph_id: String,

    /// Position in the segment list (0-indexed)
    pub ordinal_index: usize,

    /// The segment text, lines joined with `\n`
    pub raw_text: String,

    /// True when the segment must never be split further
    pub is_atomic: bool,

    /// Structural kind of this segment
    pub kind: SegmentKind,

    /// Start line in the source content (1-indexed)
    pub start_line: usize,

    /// End line in the source content (1-indexed, inclusive)
    pub end_line: usize,
}

impl ParagraphSegment {
    /// Create a new segment; the paragraph ID is derived from the ordinal
    #[must_use]
    pub fn new(
        ordinal_index: usize,
        raw_text: String,
        kind: SegmentKind,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        Self {
            paragraph_id: paragraph_id(ordinal_index),
            ordinal_index,
            raw_text,
            is_atomic: kind.is_atomic(),
            kind,
            start_line,
            end_line,
        }
    }

    /// Get the number of source lines in this segment
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Check if segment covers a specific source line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// Derive the paragraph ID for an ordinal position
#[must_use]
pub fn paragraph_id(ordinal_index: usize) -> String {
    format!("p-{ordinal_index}")
}

/// Structural kind of a paragraph segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// A single heading line
    Heading,
    /// Blank-line-delimited prose
    Prose,
    /// A block containing at least one code fence
    Code,
    /// The whole document kept as one unit
    Document,
}

impl SegmentKind {
    /// Check if segments of this kind are atomic
    #[must_use]
    pub const fn is_atomic(self) -> bool {
        !matches!(self, Self::Prose)
    }

    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Prose => "prose",
            Self::Code => "code",
            Self::Document => "document",
        }
    }
}
