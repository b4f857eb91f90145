//! # cgrep - Approximate Phrase Search
//!
//! cgrep finds word sequences that *resemble* a query phrase, even when
//! they are misspelled, differently punctuated, or differently cased.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Fixed-capacity bit sets over densely indexed domains
//! - [`query`] - Similarity scoring, window matching, and directory scanning
//! - [`output`] - Result formatting (plain, colored, JSON)
//! - [`utils`] - Canonicalization and bigrams, file content, configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use cgrep::query::{find_matches, scan_directory};
//! use std::path::Path;
//!
//! // Match against a single string
//! let matches = find_matches("quick brown fox", "The quick brown fox jumps", 0.99).unwrap();
//! assert_eq!(matches, vec!["quick brown fox"]);
//!
//! // Match every file directly inside a directory
//! let results = scan_directory("quick brown fox", Path::new("."), 0.8).unwrap();
//! for (path, matches) in &results {
//!     for m in matches {
//!         println!("[{}] '{}'", path.display(), m);
//!     }
//! }
//! ```
//!
//! ## How matching works
//!
//! 1. **Canonicalization** - text is lowercased and reduced to ASCII words
//!    separated by single spaces
//! 2. **Bigrams** - each adjacent symbol pair maps to one of 729 dense
//!    indices, collected into an [`index::IndexedSet`]
//! 3. **Windows** - the haystack is cut into runs of as many words as the
//!    query, each scored by Jaccard similarity of bigram sets
//!
//! Files are scanned in parallel on a bounded thread pool and their
//! results merged into one map keyed by path.

pub mod index;
pub mod output;
pub mod query;
pub mod utils;
