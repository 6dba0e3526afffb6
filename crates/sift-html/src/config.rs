//! Static tag classification tables.
//!
//! The scanner and the tree builder never hard-code tag names. They consult a
//! [`TagConfig`], so the same engine can serve stricter or looser vocabularies.
//! [`TagConfig::HTML`] is the default HTML vocabulary.

use std::borrow::Cow;

/// Names that never have a body or a separate close tag.
///
/// The empty name, `!` and `!--` are the names the tokenizer gives to
/// processing instructions, bogus markup and comments.
const HTML_VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr", "!doctype", "", "!", "!--",
];

/// Names that implicitly close a prior sibling of the same name when re-opened.
const HTML_NO_NESTED_TAGS: &[&str] = &["li", "option", "select", "textarea"];

/// Names whose body is scanned as opaque text.
const HTML_RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Standard element names, current and obsolete.
const HTML_KNOWN_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "address", "applet", "area", "article", "aside", "audio", "b", "base",
    "basefont", "bdi", "bdo", "bgsound", "big", "blink", "blockquote", "body", "br", "button",
    "canvas", "caption", "center", "cite", "code", "col", "colgroup", "content", "data",
    "datalist", "dd", "del", "details", "dfn", "dialog", "dir", "div", "dl", "dt", "em", "embed",
    "fieldset", "figcaption", "figure", "font", "footer", "form", "frame", "frameset", "h1", "h2",
    "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "image",
    "img", "input", "ins", "isindex", "kbd", "keygen", "label", "legend", "li", "link",
    "listing", "main", "map", "mark", "marquee", "math", "menu", "menuitem", "meta", "meter",
    "multicol", "nav", "nextid", "nobr", "noembed", "noframes", "noscript", "object", "ol",
    "optgroup", "option", "output", "p", "param", "picture", "plaintext", "portal", "pre",
    "progress", "q", "rb", "rp", "rt", "rtc", "ruby", "s", "samp", "script", "search", "section",
    "select", "shadow", "slot", "small", "source", "spacer", "span", "strike", "strong", "style",
    "sub", "summary", "sup", "svg", "table", "tbody", "td", "template", "textarea", "tfoot",
    "th", "thead", "time", "title", "tr", "track", "tt", "u", "ul", "var", "video", "wbr", "xmp",
    "!doctype",
];

/// Tag classification tables consumed by the tokenizer and the parser.
///
/// Every table holds lower-case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagConfig {
    /// Elements that are always self-closing (no body, no close tag).
    pub void_tags: &'static [&'static str],
    /// Elements that auto-close a prior sibling of the same name.
    pub no_nested_tags: &'static [&'static str],
    /// Elements whose body is opaque text.
    pub raw_text_tags: &'static [&'static str],
    /// Names that are lower-cased when tokenized. Anything else keeps its case.
    pub known_tags: &'static [&'static str],
}

impl TagConfig {
    /// The default HTML vocabulary.
    pub const HTML: Self = Self {
        void_tags: HTML_VOID_TAGS,
        no_nested_tags: HTML_NO_NESTED_TAGS,
        raw_text_tags: HTML_RAW_TEXT_TAGS,
        known_tags: HTML_KNOWN_TAGS,
    };

    /// Whether `name` never has a body.
    #[must_use]
    pub fn is_void(&self, name: &str) -> bool {
        self.void_tags.contains(&name)
    }

    /// Whether re-opening `name` closes a previous sibling of the same name.
    #[must_use]
    pub fn forbids_self_nesting(&self, name: &str) -> bool {
        self.no_nested_tags.contains(&name)
    }

    /// The raw-text table entry matching `name`, compared ASCII
    /// case-insensitively.
    #[must_use]
    pub fn raw_text(&self, name: &str) -> Option<&'static str> {
        self.raw_text_tags
            .iter()
            .copied()
            .find(|raw| raw.eq_ignore_ascii_case(name))
    }

    /// Whether `name` is a known standard tag name. `name` must already be
    /// lower-case.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.known_tags.contains(&name)
    }

    /// Lower-case `name` when its lower-case form is a known tag name;
    /// otherwise return it unchanged.
    #[must_use]
    pub fn normalize_case<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if !name.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Borrowed(name);
        }
        let lower = name.to_ascii_lowercase();
        if self.is_known(lower.trim()) {
            Cow::Owned(lower)
        } else {
            Cow::Borrowed(name)
        }
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        Self::HTML
    }
}
