//! Line relevance scoring and ranking.
//!
//! Every corpus line is scored independently against the question; a line's
//! score depends only on `(question, line)`, so corpus order never changes an
//! individual score. Two match channels feed the score:
//!
//! 1. **Direct match** — the lightly normalized line contains the lightly
//!    normalized question as a substring (also checked with all whitespace
//!    removed from both sides). Scores [`DIRECT_MATCH_SCORE`].
//! 2. **Token overlap** — the count of distinct question tokens that match a
//!    line token exactly or by substring containment in either direction.
//!
//! Short questions (≤ 4 tokens) match on a single shared token; longer
//! questions need two. The asymmetric threshold and the either-direction
//! substring rule are tuned against false positives on short questions and
//! are load-bearing: changing them silently reorders every ranking.

use crate::normalize::light_normalize;
use crate::token::tokenize;

/// Score assigned when the question appears verbatim inside the line.
pub const DIRECT_MATCH_SCORE: u32 = 3;

/// Question token count above which a single shared token is not enough.
const SINGLE_TOKEN_MATCH_LIMIT: usize = 4;

/// Score one corpus line against a question. Pure and deterministic.
pub fn score(question: &str, line: &str) -> u32 {
    let question_light = light_normalize(question);
    let line_light = light_normalize(line);

    let question_tight = strip_whitespace(&question_light);
    let line_tight = strip_whitespace(&line_light);

    if line_light.contains(&question_light)
        || (!question_tight.is_empty() && line_tight.contains(&question_tight))
    {
        return DIRECT_MATCH_SCORE;
    }

    let question_tokens = tokenize(question);
    let line_tokens = tokenize(line);
    if question_tokens.is_empty() || line_tokens.is_empty() {
        return 0;
    }

    let shared = question_tokens
        .iter()
        .filter(|qt| line_tokens.iter().any(|lt| tokens_overlap(qt, lt)))
        .count() as u32;

    let min_required = if question_tokens.len() <= SINGLE_TOKEN_MATCH_LIMIT {
        1
    } else {
        2
    };

    if shared >= min_required {
        shared
    } else {
        0
    }
}

/// Rank corpus lines: keep score > 0, sort by descending score. The sort is
/// stable, so equal scores keep corpus order.
pub fn rank(question: &str, corpus: &[String]) -> Vec<String> {
    let mut scored: Vec<(u32, &String)> = corpus
        .iter()
        .map(|line| (score(question, line), line))
        .filter(|(s, _)| *s > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, line)| line.clone()).collect()
}

/// Two tokens overlap when they are equal, or when both are at least two
/// characters and one contains the other.
fn tokens_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    a.chars().count() >= 2 && b.chars().count() >= 2 && (a.contains(b) || b.contains(a))
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
