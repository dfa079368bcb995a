//! Spelling correction over a reference vocabulary.
//!
//! The vocabulary is indexed once in a trie; each out-of-vocabulary word is
//! replaced by the candidate with the smallest edit distance, and whole
//! documents are corrected token by token.

pub mod candidates;
pub mod config;
pub mod corrector;
pub mod trie;
pub mod vocabulary;

// Re-export commonly used types
pub use candidates::{CandidateGenerator, CandidateSet, CandidateStrategy, candidates};
pub use config::CorrectorConfig;
pub use corrector::{
    CorrectorStats, SpellingCorrector, TextCorrection, TokenCorrection, WordCorrection, correct,
    correct_text,
};
pub use trie::{TrieIndex, TrieNode};
pub use vocabulary::{
    FileVocabularySource, ReaderVocabularySource, Vocabulary, VocabularySource, normalize_word,
};
