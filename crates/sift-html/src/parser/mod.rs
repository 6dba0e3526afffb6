//! Tree construction.
//!
//! A single pass over the token stream with a stack of open tags. Recovery
//! from malformed markup is structural: unfinished tags are marked
//! [`Body::Unterminated`], stray close tags are dropped, and outer close tags
//! force-close whatever is still open inside them.

mod attributes;
/// Parser state and token handlers.
pub mod core;
/// Concrete syntax tree types.
pub mod node;

pub use self::core::{ParseOptions, Parser};
pub use node::{Attribute, AttributeValue, Body, Close, Node, Quote, Tag, Text};

use crate::config::TagConfig;
use crate::error::ParseError;
use crate::tokenizer::tokenize_with;

/// Tokenize and parse `source` with the default HTML tag tables.
///
/// # Errors
///
/// See [`Parser::run`].
pub fn parse(source: &str, options: ParseOptions) -> Result<Vec<Node>, ParseError> {
    parse_with(source, options, &TagConfig::HTML)
}

/// Tokenize and parse `source` with a custom tag vocabulary.
///
/// # Errors
///
/// See [`Parser::run`].
pub fn parse_with(
    source: &str,
    options: ParseOptions,
    config: &TagConfig,
) -> Result<Vec<Node>, ParseError> {
    let tokens = tokenize_with(source, config);
    Parser::new(source, tokens, options, config).run()
}
