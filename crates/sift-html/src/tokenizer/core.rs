use strum_macros::Display;

use super::token::{Token, TokenKind};
use crate::config::TagConfig;

/// The literal matched, case-insensitively, after `<` to open a doctype.
pub(super) const DOCTYPE: &[u8] = b"!doctype";

/// The tokenizer state machine. Each state has exactly one handler.
///
/// Every state remembers where its pending token starts (`section_start`);
/// a handler either keeps scanning, emits the pending token, or moves to
/// another state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Plain text (and raw-text element content).
    Literal,
    /// Just saw `<`; deciding whether it starts markup.
    BeforeOpenTag,
    /// Inside a tag name after `<`.
    OpeningTag,
    /// Inside an open tag, between attributes.
    AfterOpenTag,
    /// Inside an unquoted attribute name or value.
    InValueUnquoted,
    /// Inside a `'…'` attribute value.
    InValueSingleQuoted,
    /// Inside a `"…"` attribute value.
    InValueDoubleQuoted,
    /// Saw `/` inside an open tag; `>` makes it a self-close.
    ClosingOpenTag,
    /// Saw `<!`.
    OpeningSpecial,
    /// Matching `<!doctype`.
    OpeningDoctype,
    /// Saw `<!-`.
    OpeningNormalComment,
    /// Inside `<!-- … -->`.
    InNormalComment,
    /// Inside `<! … >` or `<? … >`.
    InShortComment,
    /// Saw one or more `-` inside a normal comment.
    ClosingNormalComment,
    /// Inside `</ … >`.
    ClosingTag,
}

/// Converts markup into a flat, ordered [`Token`] sequence in a single pass.
///
/// All scanning state lives in this value, so independent inputs can be
/// tokenized concurrently. The tokenizer never fails: in the worst case the
/// whole input becomes one `Literal`.
pub struct Tokenizer<'a> {
    pub(super) state: TokenizerState,
    pub(super) input: &'a str,
    pub(super) config: &'a TagConfig,
    /// Byte offset of the character being handled.
    pub(super) index: usize,
    /// Byte offset where the pending token starts.
    pub(super) section_start: usize,
    pub(super) current_input_character: u8,
    // When true, the next iteration of the main loop handles the same
    // character again. "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    /// Name of the raw-text element whose body is being scanned, if any.
    pub(super) raw_text: Option<&'static str>,
    pub(super) token_stream: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer for `input` using the tag tables in `config`.
    #[must_use]
    pub const fn new(input: &'a str, config: &'a TagConfig) -> Self {
        Tokenizer {
            state: TokenizerState::Literal,
            input,
            config,
            index: 0,
            section_start: 0,
            current_input_character: 0,
            reconsume: false,
            raw_text: None,
            token_stream: Vec::new(),
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after [`Tokenizer::run`] to get the tokens for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// The tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    fn handle_literal_state(&mut self) {
        if self.current_input_character == b'<' {
            self.emit_token(TokenKind::Literal);
            self.switch_to(TokenizerState::BeforeOpenTag);
        }
    }

    fn handle_before_open_tag_state(&mut self) {
        if self.raw_text.is_some() {
            // Only `</` can end a raw-text body.
            if self.current_input_character == b'/' {
                self.switch_to(TokenizerState::ClosingTag);
                self.section_start = self.index + 1;
            } else {
                self.reconsume_in(TokenizerState::Literal);
            }
            return;
        }
        match self.current_input_character {
            // <d
            c if c.is_ascii_alphabetic() => {
                self.switch_to(TokenizerState::OpeningTag);
                self.section_start = self.index;
            }
            // </
            b'/' => {
                self.switch_to(TokenizerState::ClosingTag);
                self.section_start = self.index + 1;
            }
            // << : the first `<` is text, the second may still open a tag
            b'<' => {
                self.emit_token(TokenKind::Literal);
            }
            // <!
            b'!' => {
                self.switch_to(TokenizerState::OpeningSpecial);
                self.section_start = self.index;
            }
            // <? : a processing instruction, scanned as a short comment
            // that keeps the `?` in its body.
            b'?' => {
                self.section_start = self.index;
                self.emit_token(TokenKind::OpenTag);
                self.switch_to(TokenizerState::InShortComment);
            }
            // <> or `<` before anything else is just text
            _ => {
                self.switch_to(TokenizerState::Literal);
            }
        }
    }

    fn handle_opening_tag_state(&mut self) {
        match self.current_input_character {
            // <div ...
            c if Self::is_whitespace_char(c) => {
                self.emit_token(TokenKind::OpenTag);
                self.switch_to(TokenizerState::AfterOpenTag);
            }
            // <div>
            b'>' => {
                self.emit_token(TokenKind::OpenTag);
                self.emit_token(TokenKind::OpenTagEnd);
            }
            // <div/
            b'/' => {
                self.emit_token(TokenKind::OpenTag);
                self.switch_to(TokenizerState::ClosingOpenTag);
            }
            _ => {}
        }
    }

    fn handle_after_open_tag_state(&mut self) {
        match self.current_input_character {
            // <div >
            b'>' => {
                self.emit_token(TokenKind::Whitespace);
                self.emit_token(TokenKind::OpenTagEnd);
            }
            // <div /
            b'/' => {
                self.emit_token(TokenKind::Whitespace);
                self.switch_to(TokenizerState::ClosingOpenTag);
            }
            // <div ...=
            b'=' => {
                self.emit_token(TokenKind::Whitespace);
                self.emit_token_until(TokenKind::AttrValueEq, self.index + 1);
            }
            // <div ...'
            b'\'' => {
                self.emit_token(TokenKind::Whitespace);
                self.switch_to(TokenizerState::InValueSingleQuoted);
            }
            // <div ..."
            b'"' => {
                self.emit_token(TokenKind::Whitespace);
                self.switch_to(TokenizerState::InValueDoubleQuoted);
            }
            c if Self::is_whitespace_char(c) => {}
            // <div ...name
            _ => {
                self.emit_token(TokenKind::Whitespace);
                self.switch_to(TokenizerState::InValueUnquoted);
            }
        }
    }

    fn handle_in_value_unquoted_state(&mut self) {
        match self.current_input_character {
            // <div xxx>
            b'>' => {
                self.emit_token(TokenKind::AttrValueNq);
                self.emit_token(TokenKind::OpenTagEnd);
            }
            // <div xxx/
            b'/' => {
                self.emit_token(TokenKind::AttrValueNq);
                self.switch_to(TokenizerState::ClosingOpenTag);
            }
            // <div xxx=
            b'=' => {
                self.emit_token(TokenKind::AttrValueNq);
                self.emit_token_until(TokenKind::AttrValueEq, self.index + 1);
                self.switch_to(TokenizerState::AfterOpenTag);
            }
            // <div xxx ...
            c if Self::is_whitespace_char(c) => {
                self.emit_token(TokenKind::AttrValueNq);
                self.switch_to(TokenizerState::AfterOpenTag);
            }
            _ => {}
        }
    }

    fn handle_in_value_quoted_state(&mut self, quote: u8, kind: TokenKind) {
        if self.current_input_character == quote {
            self.emit_token_until(kind, self.index + 1);
            self.switch_to(TokenizerState::AfterOpenTag);
        }
    }

    fn handle_closing_open_tag_state(&mut self) {
        if self.current_input_character == b'>' {
            // <div />
            self.emit_token(TokenKind::OpenTagEnd);
        } else {
            // <div /x : the `/` is an ordinary value character
            self.emit_token(TokenKind::AttrValueNq);
            self.reconsume_in(TokenizerState::AfterOpenTag);
        }
    }

    fn handle_opening_special_state(&mut self) {
        match self.current_input_character {
            // <!-
            b'-' => self.switch_to(TokenizerState::OpeningNormalComment),
            // <!d
            b'd' | b'D' => self.switch_to(TokenizerState::OpeningDoctype),
            _ => {
                self.emit_token(TokenKind::OpenTag);
                self.reconsume_in(TokenizerState::InShortComment);
            }
        }
    }

    fn handle_opening_doctype_state(&mut self) {
        let offset = self.offset();
        let c = self.current_input_character;
        if offset == DOCTYPE.len() {
            if Self::is_whitespace_char(c) {
                // <!doctype ...
                self.emit_token(TokenKind::OpenTag);
                self.switch_to(TokenizerState::AfterOpenTag);
            } else if c == b'>' {
                // <!doctype>
                self.emit_token(TokenKind::OpenTag);
                self.emit_token(TokenKind::OpenTagEnd);
            } else {
                // <!doctypex
                self.fall_back_to_short_comment();
            }
        } else if c == b'>' {
            // <!DOCT>
            self.emit_token_until(TokenKind::OpenTag, self.section_start + 1);
            self.emit_token(TokenKind::Literal);
            self.emit_token(TokenKind::OpenTagEnd);
        } else if !DOCTYPE[offset].eq_ignore_ascii_case(&c) {
            // <!DOCX
            self.fall_back_to_short_comment();
        }
    }

    fn handle_opening_normal_comment_state(&mut self) {
        if self.current_input_character == b'-' {
            // <!--
            self.emit_token_until(TokenKind::OpenTag, self.index + 1);
            self.switch_to(TokenizerState::InNormalComment);
        } else {
            // <!-x
            self.fall_back_to_short_comment();
        }
    }

    fn handle_in_normal_comment_state(&mut self) {
        if self.current_input_character == b'-' {
            // <!-- ... -
            self.emit_token(TokenKind::Literal);
            self.switch_to(TokenizerState::ClosingNormalComment);
        }
    }

    fn handle_in_short_comment_state(&mut self) {
        if self.current_input_character == b'>' {
            // <! ... >
            self.emit_token(TokenKind::Literal);
            self.emit_token(TokenKind::OpenTagEnd);
        }
    }

    fn handle_closing_normal_comment_state(&mut self) {
        let offset = self.offset();
        let c = self.current_input_character;
        if offset == 2 {
            match c {
                // <!-- xxx -->
                b'>' => self.emit_token(TokenKind::OpenTagEnd),
                // <!-- xxx --- : the oldest dash is body text
                b'-' => self.emit_token_until(TokenKind::Literal, self.section_start + 1),
                // <!-- xxx --x
                _ => self.switch_to(TokenizerState::InNormalComment),
            }
        } else if c != b'-' {
            // <!-- xxx -x
            self.switch_to(TokenizerState::InNormalComment);
        }
    }

    fn handle_closing_tag_state(&mut self) {
        let offset = self.offset();
        let c = self.current_input_character;
        let Some(raw_name) = self.raw_text else {
            if c == b'>' {
                // </ xxx >
                self.emit_token(TokenKind::CloseTag);
            }
            return;
        };
        if c == b'<' {
            // </scr< : keep the candidate as text, try again from here
            self.rewind_to_close_tag_start();
            self.emit_token(TokenKind::Literal);
            self.switch_to(TokenizerState::BeforeOpenTag);
        } else if offset < raw_name.len() {
            if !raw_name.as_bytes()[offset].eq_ignore_ascii_case(&c) {
                self.rewind_to_close_tag_start();
                self.switch_to(TokenizerState::Literal);
            }
        } else if c == b'>' {
            self.emit_token(TokenKind::CloseTag);
        } else if !Self::is_whitespace_char(c) {
            // </scriptx
            self.rewind_to_close_tag_start();
            self.switch_to(TokenizerState::Literal);
        }
    }

    /// Flush whatever token the current state implies once input runs out.
    fn handle_end_of_input(&mut self) {
        match self.state {
            TokenizerState::Literal
            | TokenizerState::BeforeOpenTag
            | TokenizerState::InValueUnquoted
            | TokenizerState::InValueSingleQuoted
            | TokenizerState::InValueDoubleQuoted
            | TokenizerState::ClosingOpenTag
            | TokenizerState::InNormalComment
            | TokenizerState::InShortComment
            | TokenizerState::ClosingNormalComment => {
                self.emit_token(TokenKind::Literal);
            }
            TokenizerState::OpeningTag | TokenizerState::OpeningSpecial => {
                self.emit_token(TokenKind::OpenTag);
            }
            TokenizerState::AfterOpenTag => {
                self.emit_token(TokenKind::Whitespace);
            }
            TokenizerState::OpeningDoctype => {
                if self.offset() == DOCTYPE.len() {
                    self.emit_token(TokenKind::OpenTag);
                } else {
                    self.emit_token_until(TokenKind::OpenTag, self.section_start + 1);
                    self.emit_token(TokenKind::Literal);
                }
            }
            TokenizerState::OpeningNormalComment => {
                // <!-
                self.emit_token_until(TokenKind::OpenTag, self.section_start + 1);
                self.emit_token(TokenKind::Literal);
            }
            TokenizerState::ClosingTag => match self.raw_text {
                Some(raw_name) if self.offset() < raw_name.len() => {
                    self.rewind_to_close_tag_start();
                    self.emit_token(TokenKind::Literal);
                }
                _ => self.emit_token(TokenKind::CloseTag),
            },
        }
    }

    /// Run the tokenizer over the whole input.
    pub fn run(&mut self) {
        let bytes = self.input.as_bytes();
        while self.index < bytes.len() {
            self.current_input_character = bytes[self.index];
            match self.state {
                TokenizerState::Literal => self.handle_literal_state(),
                TokenizerState::BeforeOpenTag => self.handle_before_open_tag_state(),
                TokenizerState::OpeningTag => self.handle_opening_tag_state(),
                TokenizerState::AfterOpenTag => self.handle_after_open_tag_state(),
                TokenizerState::InValueUnquoted => self.handle_in_value_unquoted_state(),
                TokenizerState::InValueSingleQuoted => {
                    self.handle_in_value_quoted_state(b'\'', TokenKind::AttrValueSq);
                }
                TokenizerState::InValueDoubleQuoted => {
                    self.handle_in_value_quoted_state(b'"', TokenKind::AttrValueDq);
                }
                TokenizerState::ClosingOpenTag => self.handle_closing_open_tag_state(),
                TokenizerState::OpeningSpecial => self.handle_opening_special_state(),
                TokenizerState::OpeningDoctype => self.handle_opening_doctype_state(),
                TokenizerState::OpeningNormalComment => {
                    self.handle_opening_normal_comment_state();
                }
                TokenizerState::InNormalComment => self.handle_in_normal_comment_state(),
                TokenizerState::InShortComment => self.handle_in_short_comment_state(),
                TokenizerState::ClosingNormalComment => {
                    self.handle_closing_normal_comment_state();
                }
                TokenizerState::ClosingTag => self.handle_closing_tag_state(),
            }
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.index += 1;
            }
        }
        self.handle_end_of_input();
        tracing::trace!(
            bytes = self.input.len(),
            tokens = self.token_stream.len(),
            "tokenized"
        );
    }
}
