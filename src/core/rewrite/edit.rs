//! Text splicing.
//!
//! Edits replace byte ranges of the original text. Everything outside an
//! edited range is copied through untouched.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// Apply `edits` to `text`.
///
/// Edits are applied in offset order; an edit overlapping an earlier one is
/// dropped. A replaced range that spanned line breaks is followed by the
/// same number of line breaks, so every later line keeps its number.
pub fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| (edit.start, edit.end));

    let mut out = String::with_capacity(text.len() + edits.len() * 48);
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor || edit.end > text.len() || edit.start > edit.end {
            continue;
        }
        out.push_str(&text[cursor..edit.start]);
        out.push_str(&edit.replacement);

        let replaced_breaks = text[edit.start..edit.end].matches('\n').count();
        let added_breaks = edit.replacement.matches('\n').count();
        for _ in added_breaks..replaced_breaks {
            out.push('\n');
        }
        cursor = edit.end;
    }
    out.push_str(&text[cursor..]);
    out
}
