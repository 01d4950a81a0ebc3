//! Codepoint-aware helpers over raw bytes.
//!
//! Decoding stops at the first ill-formed sequence or at the first control
//! character (anything below U+0020). Everything after that point is treated
//! as absent by both helpers.

/// The longest well-formed UTF-8 prefix of `bytes`.
fn well_formed(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

fn codepoints(bytes: &[u8]) -> impl Iterator<Item = (usize, char)> + '_ {
    well_formed(bytes)
        .char_indices()
        .take_while(|(_, c)| *c >= ' ')
}

/// Number of codepoints before the truncation boundary.
pub fn codepoint_len(bytes: &[u8]) -> usize {
    codepoints(bytes).count()
}

/// `len` codepoints starting at codepoint index `start`, clipped to the
/// truncation boundary.
pub fn codepoint_substring(bytes: &[u8], start: usize, len: usize) -> String {
    codepoints(bytes).skip(start).take(len).map(|(_, c)| c).collect()
}

/// The text before the truncation boundary, borrowed.
pub fn decodable_prefix(bytes: &[u8]) -> &str {
    let s = well_formed(bytes);
    let end = s
        .char_indices()
        .find(|(_, c)| *c < ' ')
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..end]
}
