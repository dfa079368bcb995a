//! # triespell
//!
//! A trie-backed spelling corrector for Rust.
//!
//! ## Features
//!
//! - Vocabulary normalization and trie indexing
//! - Exact Levenshtein edit distance
//! - Full-trie, length-window and edit-bounded candidate generation
//! - Deterministic word correction (ties go to the lexicographically smallest word)
//! - Whole-document correction, lossy or layout-preserving, sequential or parallel
//!
//! ## Example
//!
//! ```
//! use triespell::prelude::*;
//!
//! let vocabulary = Vocabulary::from_words(["hello", "world"]);
//! let corrector = SpellingCorrector::new(vocabulary);
//! assert_eq!(corrector.correct_text("helo wrold"), "hello world");
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod spelling;
pub mod util;

pub mod prelude {
    pub use crate::analysis::token::Token;
    pub use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer, tokenize};
    pub use crate::error::{Result, SpellError};
    pub use crate::spelling::{
        CandidateGenerator, CandidateStrategy, CorrectorConfig, SpellingCorrector, TrieIndex,
        Vocabulary, VocabularySource,
    };
    pub use crate::util::levenshtein::levenshtein_distance;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
