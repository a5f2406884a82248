//! Guideline corpus loading.
//!
//! The corpus is a plain text file of guideline statements, one per line.
//! It is read fresh for every question — there is no cache, no index, and
//! the loaded lines are never mutated. File order is the canonical tie-break
//! order for ranking.

use anyhow::{Context, Result};
use std::path::Path;

/// Read the corpus file into trimmed, non-empty lines in file order.
pub fn load_corpus(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;

    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    Ok(lines)
}
