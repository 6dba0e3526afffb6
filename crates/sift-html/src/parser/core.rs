use sift_common::LineIndex;

use super::attributes::AttributeScanner;
use super::node::{Body, Close, Node, Tag, Text};
use crate::config::TagConfig;
use crate::error::ParseError;
use crate::tokenizer::{Token, TokenKind};

/// Knobs for [`Parser`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Populate [`Tag::attribute_map`] on every tag after the tree is built.
    pub build_attribute_map: bool,
}

impl ParseOptions {
    /// Request attribute maps.
    #[must_use]
    pub const fn with_attribute_map(mut self) -> Self {
        self.build_attribute_map = true;
        self
    }
}

/// A tag that has been opened but not yet closed, with the children
/// collected so far. The tag becomes part of the tree when it is popped.
#[derive(Debug)]
struct OpenElement {
    tag: Tag,
    children: Vec<Node>,
}

/// Builds a tree of [`Node`]s from a token stream.
///
/// A single pass over the tokens with an explicit index. The open-tag stack
/// is a plain `Vec` (innermost last); nothing in the finished tree points back
/// at its parent.
pub struct Parser<'a> {
    source: &'a str,
    config: &'a TagConfig,
    options: ParseOptions,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    /// Tags whose close has not been seen yet.
    stack_of_open_elements: Vec<OpenElement>,

    /// Top-level nodes.
    root: Vec<Node>,

    /// Whether the last node appended is a text run that the next `Literal`
    /// token should extend.
    in_text: bool,
}

impl<'a> Parser<'a> {
    /// Create a parser over `tokens`, which must have been produced from
    /// `source` by the tokenizer.
    #[must_use]
    pub const fn new(
        source: &'a str,
        tokens: Vec<Token>,
        options: ParseOptions,
        config: &'a TagConfig,
    ) -> Self {
        Self {
            source,
            config,
            options,
            tokens,
            token_index: 0,
            stack_of_open_elements: Vec::new(),
            root: Vec::new(),
            in_text: false,
        }
    }

    /// Run the parser and return the top-level nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedToken`] when a token that can only
    /// appear inside an open tag shows up between nodes. The tokenizer never
    /// produces such a stream.
    pub fn run(mut self) -> Result<Vec<Node>, ParseError> {
        while self.token_index < self.tokens.len() {
            match self.current_token().kind {
                TokenKind::Literal => self.handle_literal(),
                TokenKind::OpenTag => {
                    self.in_text = false;
                    self.handle_open_tag();
                }
                TokenKind::CloseTag => {
                    self.in_text = false;
                    self.handle_close_tag();
                }
                TokenKind::OpenTagEnd
                | TokenKind::Whitespace
                | TokenKind::AttrValueEq
                | TokenKind::AttrValueNq
                | TokenKind::AttrValueSq
                | TokenKind::AttrValueDq => return Err(self.unexpected_token()),
            }
            self.token_index += 1;
        }

        // Whatever is still open at EOF stays unterminated.
        self.truncate_open_elements(0);

        let mut nodes = self.root;
        if self.options.build_attribute_map {
            index_attributes(&mut nodes);
        }
        Ok(nodes)
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.token_index]
    }

    fn has_next_token(&self) -> bool {
        self.token_index + 1 < self.tokens.len()
    }

    /// One past a `>` that directly follows `end`, or `end` itself at EOF.
    fn delimited_end(&self, end: usize) -> usize {
        if self.source.as_bytes().get(end) == Some(&b'>') {
            end + 1
        } else {
            end
        }
    }

    // =========================================================================
    // Tree assembly
    // =========================================================================

    /// Append a finished node to the innermost open tag, or to the root.
    fn append(&mut self, node: Node) {
        match self.stack_of_open_elements.last_mut() {
            Some(open) => {
                open.tag.end = node.end();
                open.children.push(node);
            }
            None => self.root.push(node),
        }
    }

    /// Attach a finished node, first auto-closing a same-named sibling when
    /// that name forbids self-nesting.
    fn attach(&mut self, node: Node) {
        if let Node::Tag(tag) = &node {
            self.close_same_name_sibling(&tag.name);
        }
        self.append(node);
    }

    fn push_open_element(&mut self, tag: Tag) {
        self.close_same_name_sibling(&tag.name);
        self.stack_of_open_elements.push(OpenElement {
            tag,
            children: Vec::new(),
        });
    }

    /// Pop the innermost open tag and attach it to its parent.
    fn pop_open_element(&mut self) {
        if let Some(OpenElement { mut tag, children }) = self.stack_of_open_elements.pop() {
            tag.body = Body::Present(children);
            self.append(Node::Tag(tag));
        }
    }

    fn truncate_open_elements(&mut self, len: usize) {
        while self.stack_of_open_elements.len() > len {
            self.pop_open_element();
        }
    }

    fn close_same_name_sibling(&mut self, name: &str) {
        while let Some(open) = self.stack_of_open_elements.last()
            && open.tag.name == name
            && self.config.forbids_self_nesting(name)
        {
            tracing::debug!(tag = name, "auto-closing previous sibling");
            self.pop_open_element();
        }
    }

    /// Extend the text run at the end of the current container to `end`.
    /// Returns false when the last node is not text.
    fn extend_text(&mut self, end: usize) -> bool {
        let source = self.source;
        let (children, owner_end) = match self.stack_of_open_elements.last_mut() {
            Some(open) => (&mut open.children, Some(&mut open.tag.end)),
            None => (&mut self.root, None),
        };
        let Some(Node::Text(text)) = children.last_mut() else {
            return false;
        };
        text.extend_to(source, end);
        if let Some(owner_end) = owner_end {
            *owner_end = end;
        }
        true
    }

    // =========================================================================
    // Token handlers
    // =========================================================================

    fn handle_literal(&mut self) {
        let token = self.current_token();
        let (start, end) = (token.start, token.end);
        if self.in_text && self.extend_text(end) {
            return;
        }
        self.append(Node::Text(Text::from_span(self.source, start, end)));
        self.in_text = true;
    }

    fn handle_open_tag(&mut self) {
        let token = self.current_token();
        // Include the `<`.
        let start = token.start.saturating_sub(1);
        let end = token.end;
        let raw_name = self.source[token.start..token.end].to_owned();
        let tag = Tag {
            start,
            end,
            open: Text::from_span(self.source, start, end),
            name: raw_name.to_ascii_lowercase(),
            raw_name,
            attributes: Vec::new(),
            attribute_map: None,
            body: Body::Unterminated,
            close: Close::Unterminated,
        };

        // Comments, `<!…>` and `<?…>` carry free text instead of attributes.
        if matches!(tag.name.as_str(), "" | "!" | "!--") {
            self.parse_special_tag(tag);
        } else {
            self.parse_ordinary_tag(tag);
        }
    }

    fn parse_special_tag(&mut self, mut tag: Tag) {
        let mut body_span: Option<(usize, usize)> = None;
        let mut close_span: Option<(usize, usize)> = None;
        while self.has_next_token() {
            self.token_index += 1;
            let token = self.current_token();
            if token.kind == TokenKind::OpenTagEnd {
                close_span = Some((token.start, token.end));
                break;
            }
            body_span = Some((body_span.map_or(token.start, |(s, _)| s), token.end));
        }

        if body_span.is_none() && close_span.is_none() {
            // EOF right after the opening.
            self.attach(Node::Tag(tag));
            return;
        }

        let mut children = Vec::new();
        if let Some((start, end)) = body_span {
            children.push(Node::Text(Text::from_span(self.source, start, end)));
            tag.end = end;
        }
        tag.body = Body::Present(children);
        if let Some((start, end)) = close_span {
            let close_end = self.delimited_end(end);
            tag.close = Close::Present(Text::from_span(self.source, start, close_end));
            tag.end = close_end;
        }
        self.attach(Node::Tag(tag));
    }

    fn parse_ordinary_tag(&mut self, mut tag: Tag) {
        let mut scanner = AttributeScanner::new(self.source);
        // (end, whether the tag was self-closed with `/`)
        let mut open_tag_end: Option<(usize, bool)> = None;
        while self.has_next_token() {
            self.token_index += 1;
            let token = self.current_token();
            if token.kind == TokenKind::OpenTagEnd {
                open_tag_end = Some((token.end, !token.value.is_empty()));
                break;
            }
            scanner.feed(token);
            tag.end = token.end;
        }
        tag.attributes = scanner.into_attributes();

        let Some((end, self_closed)) = open_tag_end else {
            // EOF inside the open tag: keep everything seen in `open`.
            tag.open = Text::from_span(self.source, tag.start, tag.end);
            self.attach(Node::Tag(tag));
            return;
        };

        let open_end = self.delimited_end(end);
        tag.open = Text::from_span(self.source, tag.start, open_end);
        tag.end = open_end;
        if self_closed || self.config.is_void(&tag.name) {
            tag.body = Body::Absent;
            tag.close = Close::Absent;
            self.attach(Node::Tag(tag));
        } else {
            tag.body = Body::Present(Vec::new());
            self.push_open_element(tag);
        }
    }

    fn handle_close_tag(&mut self) {
        let token = self.current_token();
        let (start, end) = (token.start, token.end);
        let wanted = token.value.trim().to_ascii_lowercase();

        let Some(depth) = self
            .stack_of_open_elements
            .iter()
            .rposition(|open| open.tag.name == wanted)
        else {
            tracing::debug!(tag = %wanted, offset = start, "discarding unmatched close tag");
            return;
        };

        for open in &self.stack_of_open_elements[depth + 1..] {
            tracing::debug!(tag = %open.tag.name, closed_by = %wanted, "force-closing tag");
        }
        self.truncate_open_elements(depth + 1);

        // Include the `</` and the `>`.
        let close_start = start.saturating_sub(2);
        let close_end = self.delimited_end(end);
        if let Some(open) = self.stack_of_open_elements.last_mut() {
            open.tag.close = Close::Present(Text::from_span(self.source, close_start, close_end));
            open.tag.end = close_end;
        }
        self.pop_open_element();
    }

    fn unexpected_token(&self) -> ParseError {
        let token = self.current_token();
        let position = LineIndex::new(self.source).position(token.start);
        let context = self
            .stack_of_open_elements
            .last()
            .map_or_else(String::new, |open| {
                format!(" when parsing tag: {:?}.", open.tag.name)
            });
        ParseError::UnexpectedToken {
            message: format!("{:?}({}){context}", token.value, token.kind),
            line: position.line,
            column: position.column,
        }
    }
}

/// Pre-order walk that fills every tag's attribute map.
fn index_attributes(nodes: &mut [Node]) {
    for node in nodes {
        if let Node::Tag(tag) = node {
            tag.index_attributes();
            if let Body::Present(children) = &mut tag.body {
                index_attributes(children);
            }
        }
    }
}
