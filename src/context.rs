//! Bounded context snippet assembly.
//!
//! Takes ranked corpus lines (already filtered to score > 0 and sorted) and
//! joins the top lines into the snippet handed to the prompt builder — or
//! returned directly as the local fallback answer. Two bounds apply: a line
//! cap and a hard character cap with a visible truncation marker. Lines past
//! the cap are dropped silently regardless of score.

/// Marker appended when the snippet is cut at the character bound.
pub const TRUNCATION_MARKER: &str = "\n...";

/// Join the top `max_lines` ranked lines with newlines, trimming each and
/// dropping any that trim to empty. A result longer than `max_chars`
/// characters is cut to exactly `max_chars` and the truncation marker is
/// appended. Character counts are Unicode scalar values, never bytes.
pub fn build_context(ranked: &[String], max_lines: usize, max_chars: usize) -> String {
    let selected: Vec<&str> = ranked
        .iter()
        .take(max_lines)
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    let joined = selected.join("\n");

    if joined.chars().count() > max_chars {
        let cut: String = joined.chars().take(max_chars).collect();
        format!("{}{}", cut, TRUNCATION_MARKER)
    } else {
        joined
    }
}
