//! Text analysis: turning raw documents into word tokens.

pub mod token;
pub mod tokenizer;
