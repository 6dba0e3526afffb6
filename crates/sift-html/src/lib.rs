//! Lenient, position-preserving HTML scanner and parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: a 15-state machine producing [`Token`]s with exact byte
//!   offsets. It never fails.
//! - **Parser**: a stack-based tree builder producing a concrete syntax tree of
//!   [`Node`]s. Every consumed character lands in some node's span, so the
//!   source can be rebuilt from the tree.
//! - **Walker** and **sanitizer** built on the tree.
//!
//! # Not Implemented
//!
//! - Validation of any kind
//! - DOM construction, CSS or script semantics
//! - Entity decoding or whitespace normalization
//!
//! ```
//! use sift_html::{Node, ParseOptions, parse};
//!
//! let nodes = parse("<DIV>hi</DIV>", ParseOptions::default()).unwrap();
//! let Node::Tag(tag) = &nodes[0] else { unreachable!() };
//! assert_eq!(tag.name, "div");
//! assert_eq!(tag.raw_name, "DIV");
//! ```

/// Tag classification tables.
pub mod config;
/// Parser errors.
pub mod error;
/// Tree construction.
pub mod parser;
/// Allow-list re-serialization of parsed markup.
pub mod sanitize;
/// Markup tokenizer.
pub mod tokenizer;
/// Depth-first traversal of the tree.
pub mod walk;

pub use config::TagConfig;
pub use error::ParseError;
pub use parser::{
    Attribute, AttributeValue, Body, Close, Node, ParseOptions, Parser, Quote, Tag, Text, parse,
    parse_with,
};
pub use sanitize::{SafeHtmlOptions, safe_html};
pub use tokenizer::{Token, TokenKind, Tokenizer, TokenizerState, tokenize, tokenize_with};
pub use walk::{Visitor, dump_tree, walk};
