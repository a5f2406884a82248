//! Text normalization passes.
//!
//! Two distinct normalizations are used by the scorer and must not be
//! conflated:
//!
//! - [`normalize`] — the strong pass used for tokenization: lowercases,
//!   replaces quote/bracket characters with spaces, strips everything that is
//!   not a letter, digit, or whitespace, and collapses runs of whitespace.
//! - [`light_normalize`] — lowercases and collapses whitespace only,
//!   retaining punctuation. Used for direct substring matching, where
//!   punctuation carries signal.
//!
//! Both are pure and total — they never fail.

/// Quote and bracket characters replaced with a space before filtering, so
/// that `"휴가"규정` splits into two words instead of fusing.
const QUOTE_CHARS: &[char] = &[
    '"', '\'', '`', '“', '”', '‘', '’', '「', '」', '『', '』', '(', ')', '[', ']', '{', '}', '<',
    '>', '《', '》',
];

/// Strong normalization: lowercase, quotes/brackets to spaces, drop all
/// non-letter non-digit non-whitespace characters, collapse whitespace, trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut filtered = String::with_capacity(lowered.len());

    for ch in lowered.chars() {
        if QUOTE_CHARS.contains(&ch) {
            filtered.push(' ');
        } else if ch.is_alphanumeric() || ch.is_whitespace() {
            filtered.push(ch);
        }
    }

    collapse_whitespace(&filtered)
}

/// Light normalization: lowercase and collapse whitespace, punctuation kept.
pub fn light_normalize(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
