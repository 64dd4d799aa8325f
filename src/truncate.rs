//! Shared truncation policy for long text, code, and JSON payloads.
//!
//! Every renderer bounds what it shows inline with the same rule; only the
//! numeric limit differs by content class.

/// Marker appended to truncated content. Never counts toward the limit.
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Display limit for pretty-printed JSON payloads.
pub const JSON_LIMIT: usize = 500;
/// Display limit for body text, tool output, and code snippets.
pub const TEXT_LIMIT: usize = 1000;
/// Display limit for raw process stdout/stderr, which runs long.
pub const OUTPUT_LIMIT: usize = 2000;

/// Bound `text` to `limit` characters, appending [`TRUNCATION_MARKER`] when
/// content was cut.
///
/// Counts characters rather than bytes, so multibyte input never splits a
/// code point.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
    }
}
