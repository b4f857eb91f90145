//! Sliding-window approximate matching.
//!
//! The haystack is canonicalized and cut into windows of as many words as
//! the canonical needle has. Every window is scored against the needle and
//! kept when its score reaches the threshold. Windows overlap, so one
//! stretch of text can produce several matches.

use crate::index::set::IndexSetError;
use crate::query::scorer::NeedleScorer;
use crate::utils::bigram::CanonicalText;
use serde::{Deserialize, Serialize};

/// A window that met the threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWindow {
    /// Offset of the window's first word in the canonical haystack
    pub start: usize,
    /// Canonical text of the window
    pub text: String,
    /// Similarity to the needle
    pub score: f32,
}

/// Texts of all windows of `haystack` whose similarity to `needle` is at
/// least `threshold`, in order of position.
///
/// The threshold is not validated: `<= 0` keeps every window and `> 1`
/// keeps none.
pub fn find_matches(needle: &str, haystack: &str, threshold: f32) -> Result<Vec<String>, IndexSetError> {
    Ok(find_scored_matches(needle, haystack, threshold)?
        .into_iter()
        .map(|window| window.text)
        .collect())
}

/// Like [`find_matches`], keeping each window's position and score
pub fn find_scored_matches(
    needle: &str,
    haystack: &str,
    threshold: f32,
) -> Result<Vec<ScoredWindow>, IndexSetError> {
    let scorer = NeedleScorer::new(CanonicalText::new(needle))?;
    match_windows(&scorer, &CanonicalText::new(haystack), threshold)
}

/// Score every window of an already canonical haystack.
///
/// An empty needle is matched against single words, scored on its empty
/// bigram set. A haystack with fewer words than the needle has no windows.
pub fn match_windows(
    scorer: &NeedleScorer,
    haystack: &CanonicalText,
    threshold: f32,
) -> Result<Vec<ScoredWindow>, IndexSetError> {
    let width = scorer.needle().word_count().max(1);
    let words: Vec<&str> = haystack.words().collect();

    if words.len() < width {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for (start, window) in words.windows(width).enumerate() {
        let candidate = CanonicalText::from_canonical_words(window);
        let score = scorer.score(&candidate)?;
        if score >= threshold {
            matches.push(ScoredWindow {
                start,
                text: candidate.into_string(),
                score,
            });
        }
    }

    Ok(matches)
}
