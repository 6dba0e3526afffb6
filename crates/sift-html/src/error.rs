//! Parser errors.

use thiserror::Error;

/// The only way a parse can fail.
///
/// Malformed markup never produces an error: unclosed tags, stray close tags,
/// broken comments and unterminated quotes are all recovered structurally and
/// show up in the shape of the tree. An error here means the token stream
/// handed to the parser broke the tokenizer's contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token kind that cannot appear between nodes.
    #[error("Unexpected token {message} at [{line},{column}]")]
    UnexpectedToken {
        /// Which token was found and what was being parsed.
        message: String,
        /// 1-based line of the token start.
        line: usize,
        /// 1-based column of the token start.
        column: usize,
    },
}
