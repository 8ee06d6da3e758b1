use unicode_segmentation::UnicodeSegmentation;

/// Maximum snippet length in chars
pub const MAX_SNIPPET_CHARS: usize = 100;

/// Truncate text to at most [`MAX_SNIPPET_CHARS`] chars without splitting a
/// grapheme cluster. Whitespace runs are collapsed first so that a paragraph
/// spanning several lines reads as one line.
pub fn truncate_snippet(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_SNIPPET_CHARS {
        return collapsed;
    }

    let mut out = String::new();
    let mut chars = 0usize;
    for grapheme in collapsed.graphemes(true) {
        let len = grapheme.chars().count();
        if chars + len > MAX_SNIPPET_CHARS {
            break;
        }
        chars += len;
        out.push_str(grapheme);
    }
    out
}
