//! Tokenization with Korean grammatical suffix stripping.
//!
//! Korean attaches particles and sentence endings directly to content words
//! (`휴가는`, `신청합니다`), so naive whitespace tokens rarely collide between
//! a question and a guideline line. [`strip_suffix`] reduces each word toward
//! its content stem in three passes: contracted verb-stem spelling is
//! restored first, then one formal sentence ending, then one grammatical
//! particle. A stripped result shorter than two characters falls back to the
//! original word, so short words never collapse to nothing.
//!
//! All lengths here are counted in Unicode scalar values, not bytes.

use std::collections::HashSet;

use crate::normalize::normalize;

/// Contracted verb-stem spellings restored before suffix stripping.
const STEM_CONTRACTIONS: &[(&str, &str)] = &[("돼", "되"), ("해", "하")];

/// Formal sentence-ending suffixes, longest first so compound endings strip
/// before their tails.
const ENDING_SUFFIXES: &[&str] = &[
    "습니까", "습니다", "입니까", "입니다", "합니까", "합니다", "하나요", "인가요", "할까요",
    "나요", "세요", "어요", "아요", "요",
];

/// Grammatical particle suffixes: topic (은/는), subject (이/가), object
/// (을/를), locative (에/에서/에게), instrumental (으로/로), conjunctive
/// (와/과/하고/이나) and common delimiters. Longest first.
const PARTICLE_SUFFIXES: &[&str] = &[
    "에서", "에게", "으로", "부터", "까지", "하고", "이나", "은", "는", "이", "가", "을", "를",
    "에", "와", "과", "로", "도", "의", "만",
];

/// Minimum token length in characters. Single-character remnants carry no
/// matching signal.
const MIN_TOKEN_CHARS: usize = 2;

/// Strip one sentence ending and one particle from a word, after restoring
/// contracted verb-stem spellings. Falls back to the original word when the
/// stripped result is shorter than two characters.
pub fn strip_suffix(word: &str) -> String {
    let mut stem = word.to_string();

    for (contracted, plain) in STEM_CONTRACTIONS {
        if stem.contains(contracted) {
            stem = stem.replace(contracted, plain);
        }
    }

    for suffix in ENDING_SUFFIXES {
        if let Some(shortened) = stem.strip_suffix(suffix) {
            stem = shortened.to_string();
            break;
        }
    }

    for suffix in PARTICLE_SUFFIXES {
        if let Some(shortened) = stem.strip_suffix(suffix) {
            stem = shortened.to_string();
            break;
        }
    }

    if stem.chars().count() >= MIN_TOKEN_CHARS {
        stem
    } else {
        word.to_string()
    }
}

/// Normalize, split into words, strip suffixes, drop words shorter than two
/// characters, and deduplicate preserving first-seen order.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut tokens: Vec<String> = Vec::new();

    for word in normalize(text).split(' ') {
        if word.is_empty() {
            continue;
        }
        let token = strip_suffix(word);
        if token.chars().count() < MIN_TOKEN_CHARS {
            continue;
        }
        if seen.insert(token.clone()) {
            tokens.push(token);
        }
    }

    tokens
}
