//! Markup tokenizer.
//!
//! A 15-state machine that makes a single left-to-right pass over the source
//! and produces an ordered sequence of [`Token`]s with exact byte offsets.

/// Helper methods for tokenizer state transitions and token emission.
mod helpers;
/// Token types produced by the tokenizer.
pub mod token;
/// Tokenizer state machine implementation.
pub mod core;

pub use self::core::{Tokenizer, TokenizerState};
pub use token::{Token, TokenKind};

use crate::config::TagConfig;

/// Tokenize `source` with the default HTML tag tables.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with(source, &TagConfig::HTML)
}

/// Tokenize `source` with a custom tag vocabulary.
#[must_use]
pub fn tokenize_with(source: &str, config: &TagConfig) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(source, config);
    tokenizer.run();
    tokenizer.into_tokens()
}
