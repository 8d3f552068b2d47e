//! Substitution engine: literal, single-occurrence rewrites of a text buffer.

use serde::Serialize;
use std::ops::Range;

/// Replace the first literal occurrence of `original` in `buffer`.
///
/// Returns `buffer` unchanged when `original` does not occur or is empty.
/// Later occurrences are never touched.
pub fn replace(buffer: &str, original: &str, replacement: &str) -> String {
    try_replace(buffer, original, replacement).unwrap_or_else(|| buffer.to_string())
}

/// Like [`replace`], but yields `None` when there was nothing to replace.
pub fn try_replace(buffer: &str, original: &str, replacement: &str) -> Option<String> {
    if original.is_empty() {
        return None;
    }
    let start = buffer.find(original)?;
    let end = start + original.len();

    let mut out = String::with_capacity(buffer.len() - original.len() + replacement.len());
    out.push_str(&buffer[..start]);
    out.push_str(replacement);
    out.push_str(&buffer[end..]);
    Some(out)
}

/// Where a clause sits in an editing buffer, for selection and scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClauseLocation {
    /// Byte offsets into the buffer.
    pub start: usize,
    pub end: usize,
    /// Character offsets, for surfaces that address text by character.
    pub char_start: usize,
    pub char_end: usize,
    /// `char_start` over the buffer's length in characters, the vertical
    /// position to scroll the surface to.
    pub scroll_fraction: f64,
}

impl ClauseLocation {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Find the first occurrence of `clause` in `buffer`.
pub fn locate_in_buffer(buffer: &str, clause: &str) -> Option<ClauseLocation> {
    if clause.is_empty() {
        return None;
    }
    let start = buffer.find(clause)?;
    let end = start + clause.len();
    let char_start = buffer[..start].chars().count();
    let char_end = char_start + clause.chars().count();

    #[allow(clippy::cast_precision_loss)]
    let scroll_fraction = char_start as f64 / buffer.chars().count() as f64;

    Some(ClauseLocation {
        start,
        end,
        char_start,
        char_end,
        scroll_fraction,
    })
}
