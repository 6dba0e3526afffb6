use core::fmt;

use serde::Serialize;
use strum_macros::Display;

/// The lexical category of a [`Token`].
///
/// Delimiters are not part of any token: `<` precedes an `OpenTag`, `</`
/// precedes a `CloseTag`, and `>` follows an `OpenTagEnd` or `CloseTag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum TokenKind {
    /// Plain text, comment bodies, and raw-text element content.
    Literal,
    /// A tag name after `<`. Comments open as `!--`, bogus markup as `!`,
    /// processing instructions as the empty name.
    OpenTag,
    /// The end of an open tag, without the `>`. Its value is `""`, `/` for a
    /// self-close, or `--` for a comment.
    OpenTagEnd,
    /// Everything between `</` and `>`.
    CloseTag,
    /// Whitespace between attributes.
    Whitespace,
    /// A single `=` inside an open tag.
    AttrValueEq,
    /// An unquoted attribute name or value.
    AttrValueNq,
    /// A single-quoted attribute name or value, quotes included.
    AttrValueSq,
    /// A double-quoted attribute name or value, quotes included.
    AttrValueDq,
}

/// A typed, offset-tagged lexical unit.
///
/// `start` and `end` are byte offsets into the source; `value` is the source
/// slice, except that tag names which are known standard names are
/// lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// What kind of lexical unit this is.
    pub kind: TokenKind,
    /// The token text.
    pub value: String,
}

impl Token {
    /// Create a token covering `start..end`.
    #[must_use]
    pub fn new(kind: TokenKind, start: usize, end: usize, value: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind,
            value: value.into(),
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty. Only `OpenTag`, `OpenTagEnd` and
    /// `CloseTag` tokens can be.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}..{}] {:?}", self.kind, self.start, self.end, self.value)
    }
}
