//! Regex-based tokenizer implementation.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::Token;
use crate::error::{Result, SpellError};

/// Word-boundary pattern: a maximal run of word characters.
pub const WORD_PATTERN: &str = r"\b\w+\b";

lazy_static! {
    static ref WORD_REGEX: Arc<Regex> =
        Arc::new(Regex::new(WORD_PATTERN).expect("word pattern should be valid"));
}

/// A regex-based tokenizer that extracts every match of its pattern as a token.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default word pattern.
    ///
    /// The compiled default pattern is shared between all instances.
    pub fn new() -> Self {
        RegexTokenizer {
            pattern: Arc::clone(&WORD_REGEX),
        }
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SpellError::invalid_argument(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
