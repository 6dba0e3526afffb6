//! Helper functions for the tokenizer.
//!
//! This module contains utility functions used throughout the state handlers:
//! - State transitions ("switch to", "reconsume in")
//! - Input/character handling (offsets, whitespace, rewinding)
//! - Token emission, including tag-name case normalization and raw-text
//!   bookkeeping

use super::core::{Tokenizer, TokenizerState};
use super::token::{Token, TokenKind};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// Transitions to a new state. The next character will be handled on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// Transitions to a new state without consuming the current character.
    /// The same character will be handled again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// A prefix match of `<!--` or `<!doctype` failed: keep `!` as the tag
    /// name and scan the rest as a short comment, starting with the current
    /// character.
    pub(super) fn fall_back_to_short_comment(&mut self) {
        self.emit_token_until(TokenKind::OpenTag, self.section_start + 1);
        self.reconsume_in(TokenizerState::InShortComment);
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// Distance of the current character from the start of the pending token.
    pub(super) const fn offset(&self) -> usize {
        self.index - self.section_start
    }

    /// A raw-text close tag candidate failed to match; move the pending token
    /// back over the `</` so no character is dropped.
    pub(super) const fn rewind_to_close_tag_start(&mut self) {
        self.section_start -= 2;
    }

    /// Space, newline, tab, carriage return and form feed.
    pub(super) const fn is_whitespace_char(input_char: u8) -> bool {
        matches!(input_char, b' ' | b'\n' | b'\t' | b'\r' | b'\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// Emit the pending token, ending at the current character.
    pub(super) fn emit_token(&mut self, kind: TokenKind) {
        self.emit_token_until(kind, self.index);
    }

    /// Emit the pending token as `section_start..end`.
    ///
    /// Empty `Literal` and `Whitespace` tokens are dropped; every other kind is
    /// always emitted. After an `OpenTagEnd` or `CloseTag` the trailing `>` is
    /// skipped and scanning resumes in the literal state.
    pub(super) fn emit_token_until(&mut self, kind: TokenKind, end: usize) {
        let start = self.section_start;
        let droppable = matches!(kind, TokenKind::Literal | TokenKind::Whitespace);
        if !(droppable && start == end) {
            let raw = &self.input[start..end];
            let value = match kind {
                TokenKind::OpenTag | TokenKind::CloseTag => {
                    self.config.normalize_case(raw).into_owned()
                }
                _ => raw.to_owned(),
            };
            self.track_raw_text(kind, &value);
            self.token_stream.push(Token::new(kind, start, end, value));
        }

        if matches!(kind, TokenKind::OpenTagEnd | TokenKind::CloseTag) {
            self.section_start = end + 1;
            self.switch_to(TokenizerState::Literal);
        } else {
            self.section_start = end;
        }
    }

    /// Opening `script`/`style` enters raw-text mode; any close tag leaves it.
    fn track_raw_text(&mut self, kind: TokenKind, value: &str) {
        match kind {
            TokenKind::OpenTag => {
                if let Some(raw_name) = self.config.raw_text(value) {
                    tracing::trace!(element = raw_name, offset = self.index, "entering raw text");
                    self.raw_text = Some(raw_name);
                }
            }
            TokenKind::CloseTag => {
                if let Some(raw_name) = self.raw_text.take() {
                    tracing::trace!(element = raw_name, offset = self.index, "leaving raw text");
                }
            }
            _ => {}
        }
    }
}
