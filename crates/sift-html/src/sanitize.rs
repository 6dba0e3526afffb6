//! Allow-list re-serialization of parsed markup.
//!
//! Text is copied verbatim. Tags outside the allow-list vanish together with
//! everything inside them, which also removes comments, doctypes, `script`
//! and `style`. Kept attributes are copied from the source exactly as written.

use std::collections::HashMap;

use sift_common::warning::warn_once;

use crate::config::TagConfig;
use crate::error::ParseError;
use crate::parser::{Attribute, Body, Node, ParseOptions, Tag, parse};

const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "b", "bdi", "bdo", "big", "blockquote",
    "br", "button", "caption", "cite", "code", "col", "colgroup", "data", "dd", "del", "dfn",
    "div", "dl", "dt", "em", "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hgroup", "hr", "i", "img", "ins", "kbd", "label", "li", "main", "map", "ol", "p",
    "picture", "pre", "q", "rp", "rt", "ruby", "s", "samp", "section", "small", "span", "strong",
    "sub", "summary", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "time", "tr", "u",
    "ul", "var", "wbr",
];

const DEFAULT_ALLOWED_ATTRS: &[&str] = &["style"];

const DEFAULT_TAG_ALLOWED_ATTRS: &[(&str, &[&str])] = &[
    ("a", &["href", "target"]),
    ("img", &["src"]),
    ("td", &["rowspan", "colspan"]),
    ("th", &["rowspan", "colspan"]),
    ("time", &["datetime"]),
    ("colgroup", &["span"]),
    ("col", &["span"]),
];

const DEFAULT_ALLOWED_SCHEMES: &[&str] = &["mailto", "tel", "http", "https", "ftp"];

/// What [`safe_html`] keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeHtmlOptions {
    /// Lower-case tag names to keep.
    pub allowed_tags: Vec<String>,
    /// Attribute names kept on every allowed tag.
    pub allowed_attrs: Vec<String>,
    /// Extra attribute names kept per tag name.
    pub tag_allowed_attrs: HashMap<String, Vec<String>>,
    /// URL schemes accepted in `href` and `src`, compared case-insensitively.
    pub allowed_schemes: Vec<String>,
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|&name| name.to_owned()).collect()
}

impl Default for SafeHtmlOptions {
    fn default() -> Self {
        Self {
            allowed_tags: to_strings(DEFAULT_ALLOWED_TAGS),
            allowed_attrs: to_strings(DEFAULT_ALLOWED_ATTRS),
            tag_allowed_attrs: DEFAULT_TAG_ALLOWED_ATTRS
                .iter()
                .map(|&(tag, attrs)| (tag.to_owned(), to_strings(attrs)))
                .collect(),
            allowed_schemes: to_strings(DEFAULT_ALLOWED_SCHEMES),
        }
    }
}

impl SafeHtmlOptions {
    /// Whether a tag with this lower-case name is kept.
    #[must_use]
    pub fn allows_tag(&self, name: &str) -> bool {
        self.allowed_tags.iter().any(|allowed| allowed == name)
    }

    /// Whether `attr` may appear on `tag`.
    #[must_use]
    pub fn allows_attribute(&self, tag: &str, attr: &str) -> bool {
        self.allowed_attrs.iter().any(|allowed| allowed == attr)
            || self
                .tag_allowed_attrs
                .get(tag)
                .is_some_and(|attrs| attrs.iter().any(|allowed| allowed == attr))
    }

    /// Whether `url` is acceptable as an `href` or `src` value.
    ///
    /// Anything without a `:` is relative. Otherwise the part before the first
    /// `:` must be an allowed scheme, or contain a character that cannot
    /// appear in a scheme (as in `/a:b`), in which case it is not a scheme.
    #[must_use]
    pub fn allows_url(&self, url: &str) -> bool {
        let Some((scheme, _)) = url.split_once(':') else {
            return true;
        };
        self.allowed_schemes
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
            || scheme
                .chars()
                .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')))
    }
}

/// Parse `source` and rebuild it keeping only allowed tags and attributes.
///
/// # Errors
///
/// Only if parsing fails; see [`Parser::run`](crate::Parser::run).
pub fn safe_html(source: &str, options: &SafeHtmlOptions) -> Result<String, ParseError> {
    let nodes = parse(source, ParseOptions::default())?;
    let serializer = Serializer {
        source,
        options,
        config: &TagConfig::HTML,
    };
    let mut out = String::with_capacity(source.len());
    serializer.write_nodes(&nodes, &mut out);
    Ok(out)
}

struct Serializer<'a> {
    source: &'a str,
    options: &'a SafeHtmlOptions,
    config: &'a TagConfig,
}

impl Serializer<'_> {
    fn write_nodes(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(&text.value),
                Node::Tag(tag) => self.write_tag(tag, out),
            }
        }
    }

    fn write_tag(&self, tag: &Tag, out: &mut String) {
        if !self.options.allows_tag(&tag.name) {
            return;
        }
        if matches!(tag.body, Body::Unterminated) {
            warn_once(
                "sanitize",
                &format!("dropping <{}> whose open tag never ended", tag.raw_name),
            );
            return;
        }

        let attrs: Vec<&str> = tag
            .attributes
            .iter()
            .filter(|attr| self.keeps_attribute(tag, attr))
            .map(|attr| &self.source[attr.start..attr.end])
            .collect();

        out.push('<');
        out.push_str(&tag.raw_name);
        if !attrs.is_empty() {
            out.push(' ');
            out.push_str(&attrs.join(" "));
        }
        out.push('>');

        if self.config.is_void(&tag.name) {
            return;
        }
        self.write_nodes(tag.children(), out);
        out.push_str("</");
        out.push_str(&tag.raw_name);
        out.push('>');
    }

    fn keeps_attribute(&self, tag: &Tag, attr: &Attribute) -> bool {
        let name = attr.name.value.as_str();
        if !self.options.allows_attribute(&tag.name, name) {
            return false;
        }
        match &attr.value {
            Some(value) if matches!(name, "href" | "src") => self.options.allows_url(&value.value),
            _ => true,
        }
    }
}
