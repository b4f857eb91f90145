//! Bigram similarity scoring.
//!
//! Similarity is the Jaccard index of the two strings' bigram sets, so it
//! always falls in `[0, 1]`. Strings without bigrams (fewer than two
//! characters) all compare as identical to each other.

use crate::index::set::IndexSetError;
use crate::utils::bigram::{bigrams_of, BigramSet, CanonicalText};

/// Jaccard similarity of the bigram sets of two canonical strings
pub fn similarity(a: &CanonicalText, b: &CanonicalText) -> Result<f32, IndexSetError> {
    Ok(bigrams_of(a)?.jaccard(&bigrams_of(b)?))
}

/// Scores candidates against one needle whose bigrams are computed once.
///
/// `score(c)` equals `similarity(needle, c)`.
#[derive(Debug, Clone)]
pub struct NeedleScorer {
    needle: CanonicalText,
    bigrams: BigramSet,
}

impl NeedleScorer {
    pub fn new(needle: CanonicalText) -> Result<Self, IndexSetError> {
        let bigrams = bigrams_of(&needle)?;
        Ok(Self { needle, bigrams })
    }

    pub fn needle(&self) -> &CanonicalText {
        &self.needle
    }

    pub fn score(&self, candidate: &CanonicalText) -> Result<f32, IndexSetError> {
        Ok(self.bigrams.jaccard(&bigrams_of(candidate)?))
    }
}
