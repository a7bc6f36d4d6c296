//! Derivation of the cached answer preview.

/// Number of answer characters kept in a preview.
pub const PREVIEW_CHARS: usize = 200;

/// Suffix appended to every preview.
pub const PREVIEW_SUFFIX: &str = "...";

/// Derive the list-view preview of an answer.
///
/// Newlines become spaces, the first [`PREVIEW_CHARS`] characters are kept
/// and [`PREVIEW_SUFFIX`] is appended unconditionally. Counting is by
/// Unicode scalar value so multi-byte text is never split mid-character.
#[must_use]
pub fn answer_preview(answer: &str) -> String {
    let mut out: String = answer
        .chars()
        .take(PREVIEW_CHARS)
        .map(|ch| if ch == '\n' { ' ' } else { ch })
        .collect();
    out.push_str(PREVIEW_SUFFIX);
    out
}
