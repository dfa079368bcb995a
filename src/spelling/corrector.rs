//! Word and text correction over a fixed vocabulary.
//!
//! A [`SpellingCorrector`] is a correction session: it owns the vocabulary and
//! the trie built from it, both immutable after construction, so one session
//! can correct any number of documents (from any number of threads).

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::Result;
use crate::spelling::candidates::{CandidateGenerator, CandidateSet, CandidateStrategy};
use crate::spelling::config::CorrectorConfig;
use crate::spelling::trie::TrieIndex;
use crate::spelling::vocabulary::{Vocabulary, VocabularySource};
use crate::util::levenshtein::{levenshtein_distance, levenshtein_distance_threshold};

/// Outcome of correcting a single word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCorrection {
    /// The word as written.
    pub original: String,
    /// The word to emit: the original, or the chosen vocabulary entry.
    pub corrected: String,
    /// Whether the lowercased word is in the vocabulary.
    pub known: bool,
    /// Edit distance to the chosen candidate, if one was chosen.
    pub distance: Option<usize>,
    /// Number of candidates scored.
    pub candidates_considered: usize,
}

impl WordCorrection {
    fn unchanged(word: &str, known: bool, candidates_considered: usize) -> Self {
        WordCorrection {
            original: word.to_string(),
            corrected: word.to_string(),
            known,
            distance: None,
            candidates_considered,
        }
    }

    /// Whether the emitted word differs from the original.
    pub fn is_changed(&self) -> bool {
        self.original != self.corrected
    }
}

/// A word correction tied to the token it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCorrection {
    /// Position of the token in the text (0-based).
    pub position: usize,
    /// Byte offset where the token starts.
    pub start_offset: usize,
    /// Byte offset where the token ends.
    pub end_offset: usize,
    /// The correction itself.
    #[serde(flatten)]
    pub correction: WordCorrection,
}

/// Corrected text plus per-token diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCorrection {
    /// The corrected document.
    pub text: String,
    /// Number of tokens found.
    pub tokens: usize,
    /// Number of tokens not in the vocabulary.
    pub unknown: usize,
    /// Number of tokens that were replaced.
    pub corrected: usize,
    /// One entry per token, in order.
    pub corrections: Vec<TokenCorrection>,
}

/// Statistics about a correction session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorStats {
    /// Number of vocabulary words.
    pub vocabulary_words: usize,
    /// Number of trie nodes, root included.
    pub trie_nodes: usize,
    /// Candidate strategy in use.
    pub candidate_strategy: CandidateStrategy,
    /// Name of the tokenizer in use.
    pub tokenizer: String,
    /// Whether layout preservation is enabled.
    pub preserve_layout: bool,
}

/// A spelling-correction session over one vocabulary.
pub struct SpellingCorrector {
    vocabulary: Vocabulary,
    trie: TrieIndex,
    generator: CandidateGenerator,
    tokenizer: Arc<dyn Tokenizer>,
    config: CorrectorConfig,
}

impl SpellingCorrector {
    /// Create a session with the default configuration.
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_config(vocabulary, CorrectorConfig::default())
    }

    /// Create a session with a custom configuration.
    ///
    /// The trie is built here, once, and reused by every correction call.
    pub fn with_config(vocabulary: Vocabulary, config: CorrectorConfig) -> Self {
        let start = Instant::now();
        let trie = TrieIndex::build(&vocabulary);
        info!(
            "built trie for {} words ({} nodes) in {:?}",
            trie.len(),
            trie.node_count(),
            start.elapsed()
        );

        SpellingCorrector {
            vocabulary,
            trie,
            generator: CandidateGenerator::new(config.candidate_strategy),
            tokenizer: Arc::new(RegexTokenizer::new()),
            config,
        }
    }

    /// Load the vocabulary from a source and create a session.
    pub fn from_source<V>(source: &V, config: CorrectorConfig) -> Result<Self>
    where
        V: VocabularySource + ?Sized,
    {
        let vocabulary = source.load()?;
        Ok(Self::with_config(vocabulary, config))
    }

    /// Replace the tokenizer used for text correction.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// The session vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The trie built from the vocabulary.
    pub fn trie(&self) -> &TrieIndex {
        &self.trie
    }

    /// The session configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Check whether `word` is in the vocabulary, ignoring case.
    pub fn is_known(&self, word: &str) -> bool {
        self.vocabulary.contains(&word.to_lowercase())
    }

    /// Correct a single word.
    ///
    /// Known words come back unchanged, original casing included. Unknown
    /// words are replaced by the closest candidate, or returned unchanged when
    /// there is none.
    pub fn correct_word(&self, word: &str) -> String {
        self.correct_word_detailed(word).corrected
    }

    /// Correct a single word and report how the decision was made.
    pub fn correct_word_detailed(&self, word: &str) -> WordCorrection {
        self.correct_normalized(word, &word.to_lowercase())
    }

    fn correct_normalized(&self, word: &str, lowered: &str) -> WordCorrection {
        if self.vocabulary.contains(lowered) {
            return WordCorrection::unchanged(word, true, 0);
        }

        let candidates = self.generator.generate(&self.trie, lowered);
        let considered = candidates.len();

        match closest_candidate(word, &candidates) {
            Some((best, distance)) => {
                debug!("{word:?} -> {best:?} (distance {distance}, {considered} candidates)");
                WordCorrection {
                    original: word.to_string(),
                    corrected: best.to_string(),
                    known: false,
                    distance: Some(distance),
                    candidates_considered: considered,
                }
            }
            None => {
                debug!("{word:?} has no candidates, left unchanged");
                WordCorrection::unchanged(word, false, 0)
            }
        }
    }

    /// Tokenize `text` with the session tokenizer.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer.tokenize(text)
    }

    /// Correct the tokens of `text` one by one, in order.
    pub fn correct_tokens<'a>(&'a self, text: &str) -> impl Iterator<Item = TokenCorrection> + 'a {
        self.tokenize(text)
            .into_iter()
            .map(move |token| TokenCorrection {
                position: token.position,
                start_offset: token.start_offset,
                end_offset: token.end_offset,
                correction: self.correct_normalized(&token.text, &token.normalized()),
            })
    }

    /// Correct a whole document.
    ///
    /// By default the corrected tokens are joined with single spaces and all
    /// other characters are dropped. With `preserve_layout` the text between
    /// tokens is kept as is.
    pub fn correct_text(&self, text: &str) -> String {
        let corrections: Vec<TokenCorrection> = self.correct_tokens(text).collect();
        self.render(text, &corrections)
    }

    /// Correct a whole document and report every token decision.
    pub fn correct_text_detailed(&self, text: &str) -> TextCorrection {
        let corrections: Vec<TokenCorrection> = self.correct_tokens(text).collect();
        let unknown = corrections.iter().filter(|c| !c.correction.known).count();
        let corrected = corrections
            .iter()
            .filter(|c| c.correction.is_changed())
            .count();

        TextCorrection {
            text: self.render(text, &corrections),
            tokens: corrections.len(),
            unknown,
            corrected,
            corrections,
        }
    }

    /// Correct independent documents in parallel.
    ///
    /// Runs on the current rayon pool; the output order matches the input.
    pub fn correct_batch<S>(&self, documents: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|document| self.correct_text(document.as_ref()))
            .collect()
    }

    /// Get statistics about the session.
    pub fn stats(&self) -> CorrectorStats {
        CorrectorStats {
            vocabulary_words: self.vocabulary.len(),
            trie_nodes: self.trie.node_count(),
            candidate_strategy: self.config.candidate_strategy,
            tokenizer: self.tokenizer.name().to_string(),
            preserve_layout: self.config.preserve_layout,
        }
    }

    fn render(&self, text: &str, corrections: &[TokenCorrection]) -> String {
        if self.config.preserve_layout {
            if let Some(spliced) = splice_tokens(text, corrections) {
                return spliced;
            }
            warn!(
                "{} tokenizer reported unusable offsets, joining tokens with spaces",
                self.tokenizer.name()
            );
        }

        corrections
            .iter()
            .map(|c| c.correction.corrected.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Correct one word against a vocabulary and its trie, considering the whole
/// trie as candidates.
pub fn correct(word: &str, vocabulary: &Vocabulary, trie: &TrieIndex) -> String {
    if vocabulary.contains(&word.to_lowercase()) {
        return word.to_string();
    }

    let candidates = CandidateGenerator::default().generate(trie, &word.to_lowercase());
    match closest_candidate(word, &candidates) {
        Some((best, _)) => best.to_string(),
        None => word.to_string(),
    }
}

/// Correct a document against a vocabulary with the default configuration.
///
/// Builds a fresh trie on every call; use a [`SpellingCorrector`] to reuse it.
pub fn correct_text(text: &str, vocabulary: &Vocabulary) -> String {
    let trie = TrieIndex::build(vocabulary);
    RegexTokenizer::new()
        .tokenize(text)
        .iter()
        .map(|token| correct(&token.text, vocabulary, &trie))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The candidate closest to `word` as written, with its distance.
///
/// Candidates are visited in ascending order and only a strictly smaller
/// distance replaces the best so far, so ties go to the lexicographically
/// smallest candidate.
fn closest_candidate<'c>(word: &str, candidates: &'c CandidateSet) -> Option<(&'c str, usize)> {
    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        let distance = match best {
            None => Some(levenshtein_distance(word, candidate)),
            // Only a strictly closer candidate can replace the best.
            Some((_, d)) => levenshtein_distance_threshold(word, candidate, d - 1),
        };
        if let Some(distance) = distance {
            best = Some((candidate.as_str(), distance));
            if distance == 0 {
                break;
            }
        }
    }

    best
}

/// Put each corrected token back at its byte offsets in `text`.
///
/// Returns `None` unless the offsets are ordered, non-overlapping, in bounds
/// and on char boundaries.
fn splice_tokens(text: &str, corrections: &[TokenCorrection]) -> Option<String> {
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;

    for correction in corrections {
        let (start, end) = (correction.start_offset, correction.end_offset);
        if start < last_end
            || end < start
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return None;
        }
        output.push_str(&text[last_end..start]);
        output.push_str(&correction.correction.corrected);
        last_end = end;
    }
    output.push_str(&text[last_end..]);

    Some(output)
}
