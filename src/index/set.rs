//! Fixed-capacity bit set over any type with a dense integer index.
//!
//! Membership is stored as one bit per possible element, packed into
//! 64-bit words. The set never holds the elements themselves, only their
//! presence bits, so the element type only has to say where its bit lives
//! (see [`IndexAssignable`]).

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{BitAnd, BitOr};
use thiserror::Error;

/// Number of bits per backing word
pub const WORD_BITS: usize = 64;

/// Types storable in an [`IndexedSet`].
///
/// `index` must be pure and injective, and the indices of the whole domain
/// must form the contiguous range `0..N`.
pub trait IndexAssignable {
    fn index(&self) -> usize;
}

impl IndexAssignable for usize {
    #[inline]
    fn index(&self) -> usize {
        *self
    }
}

impl IndexAssignable for u32 {
    #[inline]
    fn index(&self) -> usize {
        *self as usize
    }
}

/// Errors raised by [`IndexedSet`] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSetError {
    #[error("invalid capacity {0}: set must be able to hold at least 1 element")]
    InvalidCapacity(usize),

    /// An element's index does not fit the set. For sets sized to a fixed
    /// domain this means the domain was misconfigured, not bad user input.
    #[error("index {index} out of range for set of capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, IndexSetError>;

/// A bit vector keyed by [`IndexAssignable::index`].
///
/// Capacity is always a whole number of words, at least the capacity
/// requested at construction.
pub struct IndexedSet<T> {
    words: Vec<u64>,
    _marker: PhantomData<fn(&T)>,
}

impl<T> IndexedSet<T> {
    /// Create an empty set able to hold every index below `capacity`,
    /// rounded up to a multiple of [`WORD_BITS`].
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(IndexSetError::InvalidCapacity(capacity));
        }
        Ok(Self::from_words(vec![0u64; capacity.div_ceil(WORD_BITS)]))
    }

    fn from_words(words: Vec<u64>) -> Self {
        Self {
            words,
            _marker: PhantomData,
        }
    }

    /// The number of elements the set can store
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// The number of elements currently stored
    pub fn cardinality(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Iterate over the indices of all members in ascending order
    pub fn indices(&self) -> Indices<'_> {
        Indices {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// New set holding every element of either operand.
    ///
    /// Sized to the larger operand; the shorter operand's missing words
    /// count as zero.
    pub fn union(&self, other: &Self) -> Self {
        let len = self.words.len().max(other.words.len());
        let words = (0..len)
            .map(|i| word_or_zero(&self.words, i) | word_or_zero(&other.words, i))
            .collect();
        Self::from_words(words)
    }

    /// New set holding the elements present in both operands.
    ///
    /// Sized to the smaller operand; words past it cannot hold common members.
    pub fn intersection(&self, other: &Self) -> Self {
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a & b)
            .collect();
        Self::from_words(words)
    }

    /// Jaccard similarity `|A ∩ B| / |A ∪ B|`.
    ///
    /// Two empty sets are identical, so an empty union yields 1.0.
    pub fn jaccard(&self, other: &Self) -> f32 {
        // Same counts as cardinality() of intersection() and union(),
        // without allocating either.
        let len = self.words.len().max(other.words.len());
        let (mut intersection, mut union) = (0u32, 0u32);
        for i in 0..len {
            let a = word_or_zero(&self.words, i);
            let b = word_or_zero(&other.words, i);
            intersection += (a & b).count_ones();
            union += (a | b).count_ones();
        }

        if union == 0 {
            return 1.0;
        }
        intersection as f32 / union as f32
    }
}

impl<T: IndexAssignable> IndexedSet<T> {
    /// Word offset and bit mask for an element, or an error if it does not fit
    #[inline]
    fn locate(&self, element: &T) -> Result<(usize, u64)> {
        let index = element.index();
        let capacity = self.capacity();
        if index >= capacity {
            return Err(IndexSetError::IndexOutOfRange { index, capacity });
        }
        Ok((index / WORD_BITS, 1u64 << (index % WORD_BITS)))
    }

    /// Add an element. Returns true if it was not already present.
    pub fn insert(&mut self, element: &T) -> Result<bool> {
        let (word, bit) = self.locate(element)?;
        let was_set = self.words[word] & bit != 0;
        self.words[word] |= bit;
        Ok(!was_set)
    }

    /// Remove an element. Returns true if it was present.
    pub fn remove(&mut self, element: &T) -> Result<bool> {
        let (word, bit) = self.locate(element)?;
        let was_set = self.words[word] & bit != 0;
        self.words[word] &= !bit;
        Ok(was_set)
    }

    pub fn contains(&self, element: &T) -> Result<bool> {
        let (word, bit) = self.locate(element)?;
        Ok(self.words[word] & bit != 0)
    }

    /// Insert each element in turn, stopping at the first one out of range.
    /// Elements before the failing one stay inserted.
    pub fn insert_all<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        for element in elements {
            self.insert(element.borrow())?;
        }
        Ok(())
    }

    /// Remove each element in turn, stopping at the first one out of range.
    pub fn remove_all<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        for element in elements {
            self.remove(element.borrow())?;
        }
        Ok(())
    }

    /// True if every element is a member. Stops at the first miss.
    pub fn contains_all<I>(&self, elements: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        for element in elements {
            if !self.contains(element.borrow())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// True if any element is a member. Stops at the first hit.
    pub fn contains_any<I>(&self, elements: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        for element in elements {
            if self.contains(element.borrow())? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[inline]
fn word_or_zero(words: &[u64], i: usize) -> u64 {
    words.get(i).copied().unwrap_or(0)
}

// Manual impls: the element type is only a marker and needs none of these.

impl<T> Clone for IndexedSet<T> {
    fn clone(&self) -> Self {
        Self::from_words(self.words.clone())
    }
}

impl<T> PartialEq for IndexedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<T> Eq for IndexedSet<T> {}

impl<T> fmt::Debug for IndexedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedSet")
            .field("capacity", &self.capacity())
            .field("members", &self.indices().collect::<Vec<_>>())
            .finish()
    }
}

/// Renders member indices as `{1, 5, 9}`
impl<T> fmt::Display for IndexedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (n, index) in self.indices().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", index)?;
        }
        f.write_str("}")
    }
}

impl<T> BitOr for &IndexedSet<T> {
    type Output = IndexedSet<T>;

    fn bitor(self, rhs: Self) -> IndexedSet<T> {
        self.union(rhs)
    }
}

impl<T> BitAnd for &IndexedSet<T> {
    type Output = IndexedSet<T>;

    fn bitand(self, rhs: Self) -> IndexedSet<T> {
        self.intersection(rhs)
    }
}

/// Iterator over member indices, see [`IndexedSet::indices`]
pub struct Indices<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for Indices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1; // clear lowest set bit
        Some(self.word_idx * WORD_BITS + bit)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn members(capacity: usize) -> impl Strategy<Value = BTreeSet<usize>> {
        prop::collection::btree_set(0..capacity, 0..64)
    }

    fn build(capacity: usize, members: &BTreeSet<usize>) -> IndexedSet<usize> {
        let mut set = IndexedSet::new(capacity).unwrap();
        set.insert_all(members).unwrap();
        set
    }

    proptest! {
        #[test]
        fn prop_insert_then_remove(index in 0usize..1000) {
            let mut set = IndexedSet::new(1000).unwrap();
            set.insert(&index).unwrap();
            prop_assert!(set.contains(&index).unwrap());
            set.remove(&index).unwrap();
            prop_assert!(!set.contains(&index).unwrap());
        }

        #[test]
        fn prop_cardinality_counts_distinct_members(m in members(500)) {
            let set = build(500, &m);
            prop_assert_eq!(set.cardinality(), m.len());
            prop_assert_eq!(set.indices().collect::<BTreeSet<_>>(), m);
        }

        #[test]
        fn prop_set_algebra(a in members(130), b in members(300)) {
            let sa = build(130, &a);
            let sb = build(300, &b);
            let union = sa.union(&sb);
            let intersection = sa.intersection(&sb);

            for e in 0..union.capacity() {
                let in_a = e < sa.capacity() && sa.contains(&e).unwrap();
                let in_b = e < sb.capacity() && sb.contains(&e).unwrap();
                prop_assert_eq!(union.contains(&e).unwrap(), in_a || in_b);
                if e < intersection.capacity() {
                    prop_assert_eq!(intersection.contains(&e).unwrap(), in_a && in_b);
                }
            }
        }

        #[test]
        fn prop_jaccard_bounds(a in members(200), b in members(200)) {
            let sa = build(200, &a);
            let sb = build(200, &b);
            let j = sa.jaccard(&sb);
            prop_assert!((0.0..=1.0).contains(&j));
            prop_assert_eq!(j, sb.jaccard(&sa));
            prop_assert_eq!(sa.jaccard(&sa), 1.0);
        }
    }
}
