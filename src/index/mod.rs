pub mod set;

pub use set::{IndexAssignable, IndexSetError, IndexedSet, Indices, WORD_BITS};
