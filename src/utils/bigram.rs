//! Text canonicalization and bigram indexing.
//!
//! Text is reduced to lowercase ASCII words separated by single spaces.
//! Every adjacent pair of symbols in that text is a [`Bigram`] over the
//! 27-symbol alphabet `' ', 'a'..='z'`, which gives a fixed domain of
//! 729 bigrams that fits comfortably in an [`IndexedSet`].

use crate::index::set::{IndexAssignable, IndexSetError, IndexedSet};
use std::fmt;

/// Number of symbols a bigram can be built from (space + a-z)
pub const ALPHABET_SIZE: usize = 27;

/// Number of distinct bigrams; every [`Bigram::index`] is below this
pub const BIGRAM_DOMAIN: usize = ALPHABET_SIZE * ALPHABET_SIZE;

pub type BigramSet = IndexedSet<Bigram>;

/// Position of a symbol in the sequence `' ', 'a', 'b', ..., 'z'`
#[inline]
fn magnitude(symbol: u8) -> Option<u8> {
    match symbol {
        b' ' => Some(0),
        b'a'..=b'z' => Some(symbol - b'a' + 1),
        _ => None,
    }
}

#[inline]
fn symbol_of(magnitude: u8) -> u8 {
    if magnitude == 0 { b' ' } else { b'a' + magnitude - 1 }
}

/// An ordered pair of alphabet symbols.
///
/// Stored as the two symbol magnitudes, so any value is valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bigram {
    first: u8,
    second: u8,
}

impl Bigram {
    /// Build a bigram from two characters, or `None` if either is not a
    /// space or a lowercase ASCII letter.
    pub fn from_symbols(first: char, second: char) -> Option<Self> {
        if !first.is_ascii() || !second.is_ascii() {
            return None;
        }
        Self::from_bytes(first as u8, second as u8)
    }

    #[inline]
    fn from_bytes(first: u8, second: u8) -> Option<Self> {
        Some(Self {
            first: magnitude(first)?,
            second: magnitude(second)?,
        })
    }

    /// Inverse of [`IndexAssignable::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= BIGRAM_DOMAIN {
            return None;
        }
        Some(Self {
            first: (index / ALPHABET_SIZE) as u8,
            second: (index % ALPHABET_SIZE) as u8,
        })
    }

    pub fn first(&self) -> char {
        symbol_of(self.first) as char
    }

    pub fn second(&self) -> char {
        symbol_of(self.second) as char
    }
}

/// Dense index in `0..BIGRAM_DOMAIN`, ordered `"  ", " a", ..., " z", "a ", "aa", ..., "zz"`
impl IndexAssignable for Bigram {
    #[inline]
    fn index(&self) -> usize {
        self.first as usize * ALPHABET_SIZE + self.second as usize
    }
}

impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first(), self.second())
    }
}

/// Canonicalize text for bigram comparison.
///
/// Lowercases, turns every character outside `a-z` into a word separator,
/// collapses separator runs into one space and trims both ends. The result
/// is a fixed point: canonicalizing it again returns it unchanged.
pub fn canonicalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    // One lowercase char per input char; expansions such as 'İ' -> "i\u{307}" keep only the first
    for c in text.chars().filter_map(|c| c.to_lowercase().next()) {
        if c.is_ascii_lowercase() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Text known to be canonical (see [`canonicalize`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CanonicalText(String);

impl CanonicalText {
    pub fn new(raw: &str) -> Self {
        Self(canonicalize(raw))
    }

    /// Join words that are already canonical, e.g. taken from another
    /// `CanonicalText`.
    pub(crate) fn from_canonical_words(words: &[&str]) -> Self {
        debug_assert!(words.iter().all(|w| !w.is_empty() && w.bytes().all(|b| b.is_ascii_lowercase())));
        Self(words.join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|w| !w.is_empty())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

impl AsRef<str> for CanonicalText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of all overlapping bigrams in `text`.
///
/// The set always spans the full bigram domain. Text shorter than two
/// characters has no bigrams.
pub fn bigrams_of(text: &CanonicalText) -> Result<BigramSet, IndexSetError> {
    let mut set = BigramSet::new(BIGRAM_DOMAIN)?;
    // Canonical text only holds alphabet symbols, so no pair is dropped here
    set.insert_all(
        text.as_str()
            .as_bytes()
            .windows(2)
            .filter_map(|w| Bigram::from_bytes(w[0], w[1])),
    )?;
    Ok(set)
}
