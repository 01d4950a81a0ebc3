use crate::utf8::{codepoint_len, codepoint_substring};

/// U+2026 HORIZONTAL ELLIPSIS.
pub const ELLIPSIS: &str = "\u{2026}";

/// Longest codepoint prefix of `text` which, followed by [`ELLIPSIS`], fits in
/// `max_width` once measured by `width_of` (rounded up to whole pixels).
///
/// Candidates shrink one codepoint at a time. When nothing fits, the result
/// is a lone ellipsis.
pub fn ellipsize_line(text: &str, max_width: f32, mut width_of: impl FnMut(&str) -> f32) -> String {
    let bytes = text.as_bytes();
    for keep in (1..=codepoint_len(bytes)).rev() {
        let mut candidate = codepoint_substring(bytes, 0, keep);
        candidate.push_str(ELLIPSIS);
        if width_of(&candidate).ceil() <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}
