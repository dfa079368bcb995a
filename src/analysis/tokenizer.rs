//! Tokenizers that split raw text into word tokens.
//!
//! - [`regex::RegexTokenizer`] - regex-based scanning; the default pattern
//!   `\b\w+\b` extracts maximal runs of Unicode letters, digits and underscore
//!
//! # Examples
//!
//! ```
//! use triespell::analysis::tokenizer::Tokenizer;
//! use triespell::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new();
//! let tokens = tokenizer.tokenize("Hello, wrold!");
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].text, "wrold");
//! ```

use crate::analysis::token::Token;

pub mod regex;

pub use self::regex::RegexTokenizer;

/// Trait for tokenizers that convert text into tokens.
///
/// Tokenization is total: any string is valid input and characters that are
/// not part of a token are simply skipped. Implementations must be
/// `Send + Sync` so a corrector can be shared across threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text, in order of appearance.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Tokenize `text` with the default word-boundary tokenizer.
///
/// ```
/// use triespell::analysis::tokenizer::tokenize;
///
/// let words: Vec<String> = tokenize("Hello, wrold!").into_iter().map(|t| t.text).collect();
/// assert_eq!(words, vec!["Hello", "wrold"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    RegexTokenizer::new().tokenize(text)
}
