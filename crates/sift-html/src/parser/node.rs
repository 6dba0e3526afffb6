//! Concrete syntax tree types.
//!
//! Every node records the byte span it was parsed from. Text values are the
//! exact source slices of those spans, so nothing is normalized.

use std::collections::HashMap;

use serde::Serialize;

/// A run of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// The source slice `start..end`.
    pub value: String,
}

impl Text {
    /// Slice `start..end` out of `source`.
    #[must_use]
    pub fn from_span(source: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            value: source[start..end].to_owned(),
        }
    }

    /// Grow the span to `end`, re-slicing the value from `source`.
    pub(crate) fn extend_to(&mut self, source: &str, end: usize) {
        self.end = end;
        self.value = source[self.start..end].to_owned();
    }
}

/// How an attribute value was quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quote {
    /// `name=value`
    Unquoted,
    /// `name='value'`
    Single,
    /// `name="value"`
    Double,
}

/// The value part of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValue {
    /// Start of the value, including an opening quote.
    pub start: usize,
    /// End of the value, including a closing quote.
    pub end: usize,
    /// The value without its quotes.
    pub value: String,
    /// Which quotes surrounded the value.
    pub quote: Quote,
}

/// One attribute of an open tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Start of the name.
    pub start: usize,
    /// End of the value, or of the name when there is no value.
    pub end: usize,
    /// The attribute name as written.
    pub name: Text,
    /// The value, absent for bare attributes such as `disabled`.
    pub value: Option<AttributeValue>,
}

/// What follows an open tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Body {
    /// The tag has content (possibly empty).
    Present(Vec<Node>),
    /// The tag was self-closed or is a void element.
    Absent,
    /// Input ended before the open tag was finished.
    Unterminated,
}

/// How a tag was closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Close {
    /// An explicit close, such as `</div>` or the `-->` of a comment.
    Present(Text),
    /// The tag was self-closed or is a void element.
    Absent,
    /// No close was found: input ended, or an outer close tag or a sibling
    /// closed the tag implicitly.
    Unterminated,
}

/// An element, comment, doctype, or other `<…>` construct.
///
/// Comments are tags named `!--`, `<!…>` declarations are named `!` (or
/// `!doctype`), and `<?…>` processing instructions have an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// Start of the `<`.
    pub start: usize,
    /// End of the close when present, otherwise end of the content seen.
    pub end: usize,
    /// The whole open tag, from `<` through `>`.
    pub open: Text,
    /// The tag name, lower-cased.
    pub name: String,
    /// The tag name as written.
    pub raw_name: String,
    /// Attributes in source order, duplicates included.
    pub attributes: Vec<Attribute>,
    /// Attribute name to index in `attributes`; the last duplicate wins.
    /// Only built when requested through
    /// [`ParseOptions::with_attribute_map`](super::ParseOptions::with_attribute_map).
    pub attribute_map: Option<HashMap<String, usize>>,
    /// The content.
    pub body: Body,
    /// The close.
    pub close: Close,
}

impl Tag {
    /// Look up an attribute by name. When a name repeats, the last
    /// occurrence wins.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        match &self.attribute_map {
            Some(map) => map.get(name).and_then(|&i| self.attributes.get(i)),
            None => self
                .attributes
                .iter()
                .rev()
                .find(|attr| attr.name.value == name),
        }
    }

    /// The child nodes, if the tag has a body.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match &self.body {
            Body::Present(nodes) => nodes.as_slice(),
            Body::Absent | Body::Unterminated => &[],
        }
    }

    /// Populate [`Tag::attribute_map`] from the attribute list.
    pub(crate) fn index_attributes(&mut self) {
        let mut map = HashMap::with_capacity(self.attributes.len());
        for (i, attr) in self.attributes.iter().enumerate() {
            let _ = map.insert(attr.name.value.clone(), i);
        }
        self.attribute_map = Some(map);
    }
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    /// Text between tags.
    Text(Text),
    /// A tag and everything it contains.
    Tag(Tag),
}

impl Node {
    /// Byte offset where the node starts.
    #[must_use]
    pub const fn start(&self) -> usize {
        match self {
            Self::Text(text) => text.start,
            Self::Tag(tag) => tag.start,
        }
    }

    /// Byte offset where the node ends.
    #[must_use]
    pub const fn end(&self) -> usize {
        match self {
            Self::Text(text) => text.end,
            Self::Tag(tag) => tag.end,
        }
    }

    /// The tag, if this node is one.
    #[must_use]
    pub const fn as_tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Text(_) => None,
        }
    }

    /// The text, if this node is one.
    #[must_use]
    pub const fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(text) => Some(text),
            Self::Tag(_) => None,
        }
    }
}
