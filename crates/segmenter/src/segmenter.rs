use crate::config::SegmenterConfig;
use crate::error::{Result, SegmenterError};
use crate::fence::FenceLanguage;
use crate::types::{ParagraphSegment, SegmentKind};

/// Main segmenter interface for splitting article content
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

/// Why a document was kept as one atomic segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WholeDocumentReason {
    Html,
    FenceCount(usize),
    LanguageFence(FenceLanguage),
}

impl std::fmt::Display for WholeDocumentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => f.write_str("html content"),
            Self::FenceCount(n) => write!(f, "{n} fence delimiters"),
            Self::LanguageFence(language) => write!(f, "{} fence", language.as_str()),
        }
    }
}

impl Segmenter {
    /// Create a new segmenter with configuration
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        config.validate().map_err(SegmenterError::invalid_config)?;
        Ok(Self { config })
    }

    /// Segment content into ordered paragraph units.
    ///
    /// The result depends only on `content` and the configuration, so the
    /// same text always yields the same paragraph IDs.
    pub fn segment(&self, content: &str) -> Vec<ParagraphSegment> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        if let Some(reason) = self.whole_document_reason(content) {
            log::debug!("Keeping document as a single segment: {reason}");
            return whole_document(content).into_iter().collect();
        }

        self.split_paragraphs(content)
    }

    fn is_fence(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.config.fence_marker.as_str())
    }

    /// Whole-document fallback trades feedback granularity for never cutting
    /// a highlighted multi-block example apart.
    fn whole_document_reason(&self, content: &str) -> Option<WholeDocumentReason> {
        if self.config.sniff_html && content.trim_start().starts_with('<') {
            return Some(WholeDocumentReason::Html);
        }

        let mut fences = 0usize;
        for line in content.lines().filter(|line| self.is_fence(line)) {
            fences += 1;

            if self.config.atomic_on_language_fence {
                if let Some(language) =
                    FenceLanguage::from_fence_line(line, &self.config.fence_marker)
                {
                    if self.is_atomic_language(language) {
                        return Some(WholeDocumentReason::LanguageFence(language));
                    }
                }
            }
        }

        if fences >= self.config.atomic_fence_threshold {
            return Some(WholeDocumentReason::FenceCount(fences));
        }

        None
    }

    fn is_atomic_language(&self, language: FenceLanguage) -> bool {
        if !language.is_recognized() {
            return false;
        }

        self.config.atomic_languages.is_empty()
            || self
                .config
                .atomic_languages
                .iter()
                .any(|name| FenceLanguage::from_tag(name) == language)
    }

    fn split_paragraphs(&self, content: &str) -> Vec<ParagraphSegment> {
        let mut segments = Vec::new();
        let mut pending = Accumulator::default();
        let mut in_code_fence = false;

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;

            if self.is_fence(line) {
                in_code_fence = !in_code_fence;
                pending.push(line_no, line);
                pending.has_fence = true;
            } else if in_code_fence {
                pending.push(line_no, line);
            } else if line.trim().is_empty() {
                pending.flush_into(&mut segments);
            } else if line.trim_start().starts_with('#') {
                pending.flush_into(&mut segments);
                segments.push(ParagraphSegment::new(
                    segments.len(),
                    line.to_string(),
                    SegmentKind::Heading,
                    line_no,
                    line_no,
                ));
            } else {
                pending.push(line_no, line);
            }
        }

        if in_code_fence {
            log::debug!("Unterminated code fence; trailing content kept in one segment");
        }
        pending.flush_into(&mut segments);

        segments
    }
}

/// Lines collected for the segment currently being built
#[derive(Debug, Default)]
struct Accumulator<'a> {
    lines: Vec<&'a str>,
    start_line: usize,
    end_line: usize,
    has_fence: bool,
}

impl<'a> Accumulator<'a> {
    fn push(&mut self, line_no: usize, line: &'a str) {
        if self.lines.is_empty() {
            self.start_line = line_no;
        }
        self.end_line = line_no;
        self.lines.push(line);
    }

    fn flush_into(&mut self, segments: &mut Vec<ParagraphSegment>) {
        if self.lines.is_empty() {
            return;
        }

        let kind = if self.has_fence {
            SegmentKind::Code
        } else {
            SegmentKind::Prose
        };
        segments.push(ParagraphSegment::new(
            segments.len(),
            self.lines.join("\n"),
            kind,
            self.start_line,
            self.end_line,
        ));
        *self = Self::default();
    }
}

/// The whole document as one atomic segment, without leading or trailing
/// blank lines
fn whole_document(content: &str) -> Option<ParagraphSegment> {
    let lines: Vec<&str> = content.lines().collect();
    let first = lines.iter().position(|line| !line.trim().is_empty())?;
    let last = lines.iter().rposition(|line| !line.trim().is_empty())?;

    Some(ParagraphSegment::new(
        0,
        lines[first..=last].join("\n"),
        SegmentKind::Document,
        first + 1,
        last + 1,
    ))
}
