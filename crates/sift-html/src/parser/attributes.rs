//! Attribute assembly for ordinary open tags.
//!
//! The tokenizer does not know names from values: it emits runs of
//! `AttrValue*`, `=` and whitespace tokens. This small state machine groups
//! them into [`Attribute`]s.

use strum_macros::Display;

use super::node::{Attribute, AttributeValue, Quote, Text};
use crate::tokenizer::{Token, TokenKind};

/// Where the attribute scanner is inside an open tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AttributeState {
    /// Between attributes.
    BeforeName,
    /// Inside a name.
    InName,
    /// Whitespace after a name; `=` may still follow.
    AfterName,
    /// After `=`, waiting for the value.
    AfterEqual,
    /// Inside an unquoted value.
    InValue,
}

/// Collects the attributes of one open tag from its tokens.
pub(super) struct AttributeScanner<'a> {
    source: &'a str,
    state: AttributeState,
    attributes: Vec<Attribute>,
}

impl<'a> AttributeScanner<'a> {
    pub(super) const fn new(source: &'a str) -> Self {
        Self {
            source,
            state: AttributeState::BeforeName,
            attributes: Vec::new(),
        }
    }

    pub(super) fn into_attributes(self) -> Vec<Attribute> {
        self.attributes
    }

    /// Feed the next token between the tag name and the `OpenTagEnd`.
    pub(super) fn feed(&mut self, token: &Token) {
        let is_space = token.kind == TokenKind::Whitespace;
        match self.state {
            AttributeState::BeforeName => {
                if !is_space {
                    self.start_attribute(token);
                }
            }
            AttributeState::InName => match token.kind {
                TokenKind::Whitespace => self.state = AttributeState::AfterName,
                TokenKind::AttrValueEq => self.state = AttributeState::AfterEqual,
                // <div a'b'
                _ => self.extend_name(token.end),
            },
            AttributeState::AfterName => match token.kind {
                TokenKind::Whitespace => {}
                // <div a =
                TokenKind::AttrValueEq => self.state = AttributeState::AfterEqual,
                // <div a b : `a` had no value
                _ => self.start_attribute(token),
            },
            AttributeState::AfterEqual => {
                if !is_space {
                    self.start_value(token);
                }
            }
            AttributeState::InValue => {
                if is_space {
                    self.state = AttributeState::BeforeName;
                } else {
                    // <div a=b=c : keep absorbing into the same value
                    self.extend_value(token.end);
                }
            }
        }
    }

    fn start_attribute(&mut self, token: &Token) {
        self.attributes.push(Attribute {
            start: token.start,
            end: token.end,
            name: Text::from_span(self.source, token.start, token.end),
            value: None,
        });
        self.state = AttributeState::InName;
    }

    fn extend_name(&mut self, end: usize) {
        if let Some(attr) = self.attributes.last_mut() {
            attr.name.extend_to(self.source, end);
            attr.end = end;
        }
    }

    fn start_value(&mut self, token: &Token) {
        let quote = match token.kind {
            TokenKind::AttrValueSq => Quote::Single,
            TokenKind::AttrValueDq => Quote::Double,
            _ => Quote::Unquoted,
        };
        let raw = &self.source[token.start..token.end];
        let value = match quote {
            Quote::Single | Quote::Double if raw.len() >= 2 => &raw[1..raw.len() - 1],
            _ => raw,
        };
        if let Some(attr) = self.attributes.last_mut() {
            attr.value = Some(AttributeValue {
                start: token.start,
                end: token.end,
                value: value.to_owned(),
                quote,
            });
            attr.end = token.end;
        }
        self.state = if quote == Quote::Unquoted {
            AttributeState::InValue
        } else {
            AttributeState::BeforeName
        };
    }

    fn extend_value(&mut self, end: usize) {
        if let Some(attr) = self.attributes.last_mut()
            && let Some(value) = attr.value.as_mut()
        {
            value.end = end;
            value.value = self.source[value.start..end].to_owned();
            attr.end = end;
        }
    }
}
