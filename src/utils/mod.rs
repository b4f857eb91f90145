//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`app_data`] - User configuration file
//! - [`bigram`] - Text canonicalization and bigram extraction
//! - [`content`] - File reading and binary detection
//! - [`progress`] - Progress bar (no-op without the `progress` feature)
//!
//! ## Key Functions
//!
//! ```no_run
//! use cgrep::utils::{bigrams_of, canonicalize, CanonicalText};
//!
//! // Normalize case, punctuation and whitespace
//! assert_eq!(canonicalize("Hello,  World!"), "hello world");
//!
//! // Extract bigrams: "he", "el", "ll", "lo"
//! let bigrams = bigrams_of(&CanonicalText::new("hello")).unwrap();
//! assert_eq!(bigrams.cardinality(), 4);
//! ```

pub mod app_data;
pub mod bigram;
pub mod content;
pub mod progress;

pub use app_data::*;
pub use bigram::*;
pub use content::*;
