//! Integration tests for the markup tokenizer.

use sift_html::{TagConfig, Token, TokenKind, Tokenizer, tokenize};

use TokenKind::{
    AttrValueDq, AttrValueEq, AttrValueNq, AttrValueSq, CloseTag, Literal, OpenTag, OpenTagEnd,
    Whitespace,
};

/// Builds expected tokens back to back, like a cursor over the source.
struct Expect {
    cursor: usize,
    tokens: Vec<Token>,
}

impl Expect {
    const fn new() -> Self {
        Self {
            cursor: 0,
            tokens: Vec::new(),
        }
    }

    /// Skip `n` delimiter bytes that belong to no token.
    const fn skip(mut self, n: usize) -> Self {
        self.cursor += n;
        self
    }

    fn token(mut self, kind: TokenKind, value: &str) -> Self {
        let start = self.cursor;
        self.cursor += value.len();
        self.tokens.push(Token::new(kind, start, self.cursor, value));
        self
    }

    fn done(self) -> Vec<Token> {
        self.tokens
    }
}

#[test]
fn test_single_literal() {
    let expected = Expect::new().token(Literal, "hello").done();
    assert_eq!(tokenize("hello"), expected);
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_literal_ending_with_lt() {
    let expected = Expect::new()
        .token(Literal, "hello")
        .token(Literal, "<")
        .done();
    assert_eq!(tokenize("hello<"), expected);
}

#[test]
fn test_lt_not_followed_by_tag() {
    let expected = Expect::new()
        .token(Literal, "hello")
        .token(Literal, "< world")
        .done();
    assert_eq!(tokenize("hello< world"), expected);
}

#[test]
fn test_double_lt() {
    let expected = Expect::new()
        .token(Literal, "a")
        .token(Literal, "<")
        .skip(1)
        .token(OpenTag, "b")
        .token(OpenTagEnd, "")
        .done();
    assert_eq!(tokenize("a<<b>"), expected);
}

#[test]
fn test_open_tag_at_eof() {
    let expected = Expect::new().skip(1).token(OpenTag, "div").done();
    assert_eq!(tokenize("<div"), expected);
}

#[test]
fn test_open_tag_whitespace_at_eof() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "div")
        .token(Whitespace, "  ")
        .done();
    assert_eq!(tokenize("<div  "), expected);
}

#[test]
fn test_attribute_names() {
    let input = r#"<div a1 'b2' "c3" 'd4'e5 'f6"' "g7'"></div>"#;
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "div")
        .token(Whitespace, " ")
        .token(AttrValueNq, "a1")
        .token(Whitespace, " ")
        .token(AttrValueSq, "'b2'")
        .token(Whitespace, " ")
        .token(AttrValueDq, "\"c3\"")
        .token(Whitespace, " ")
        .token(AttrValueSq, "'d4'")
        .token(AttrValueNq, "e5")
        .token(Whitespace, " ")
        .token(AttrValueSq, "'f6\"'")
        .token(Whitespace, " ")
        .token(AttrValueDq, "\"g7'\"")
        .token(OpenTagEnd, "")
        .skip(3)
        .token(CloseTag, "div")
        .done();
    assert_eq!(tokenize(input), expected);
}

#[test]
fn test_attribute_values() {
    let input = r#"<div a b= c=1 d e = f = g 'h'=i "j"k=lmn o='pq' r="st"u>M</div>"#;
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "div")
        .token(Whitespace, " ")
        .token(AttrValueNq, "a")
        .token(Whitespace, " ")
        .token(AttrValueNq, "b")
        .token(AttrValueEq, "=")
        .token(Whitespace, " ")
        .token(AttrValueNq, "c")
        .token(AttrValueEq, "=")
        .token(AttrValueNq, "1")
        .token(Whitespace, " ")
        .token(AttrValueNq, "d")
        .token(Whitespace, " ")
        .token(AttrValueNq, "e")
        .token(Whitespace, " ")
        .token(AttrValueEq, "=")
        .token(Whitespace, " ")
        .token(AttrValueNq, "f")
        .token(Whitespace, " ")
        .token(AttrValueEq, "=")
        .token(Whitespace, " ")
        .token(AttrValueNq, "g")
        .token(Whitespace, " ")
        .token(AttrValueSq, "'h'")
        .token(AttrValueEq, "=")
        .token(AttrValueNq, "i")
        .token(Whitespace, " ")
        .token(AttrValueDq, "\"j\"")
        .token(AttrValueNq, "k")
        .token(AttrValueEq, "=")
        .token(AttrValueNq, "lmn")
        .token(Whitespace, " ")
        .token(AttrValueNq, "o")
        .token(AttrValueEq, "=")
        .token(AttrValueSq, "'pq'")
        .token(Whitespace, " ")
        .token(AttrValueNq, "r")
        .token(AttrValueEq, "=")
        .token(AttrValueDq, "\"st\"")
        .token(AttrValueNq, "u")
        .token(OpenTagEnd, "")
        .skip(1)
        .token(Literal, "M")
        .skip(2)
        .token(CloseTag, "div")
        .done();
    assert_eq!(tokenize(input), expected);
}

#[test]
fn test_unterminated_quote_folds_into_literal() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "div")
        .token(Whitespace, " ")
        .token(AttrValueNq, "class")
        .token(AttrValueEq, "=")
        .token(Literal, "\"x y>z")
        .done();
    assert_eq!(tokenize("<div class=\"x y>z"), expected);
}

#[test]
fn test_doctype() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!doctype")
        .token(Whitespace, " ")
        .token(AttrValueNq, "html")
        .token(OpenTagEnd, "")
        .done();
    assert_eq!(tokenize("<!doctype html>"), expected);
}

#[test]
fn test_doctype_upper_case_is_normalized() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens[0], Token::new(OpenTag, 1, 9, "!doctype"));
}

#[test]
fn test_doctype_immediately_closed() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!doctype")
        .token(OpenTagEnd, "")
        .done();
    assert_eq!(tokenize("<!doctype>"), expected);
}

#[test]
fn test_doctype_at_eof() {
    let expected = Expect::new().skip(1).token(OpenTag, "!doctype").done();
    assert_eq!(tokenize("<!doctype"), expected);
}

#[test]
fn test_partial_doctype_at_eof() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!")
        .token(Literal, "doctyp")
        .done();
    assert_eq!(tokenize("<!doctyp"), expected);
}

#[test]
fn test_partial_doctype_closed() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!")
        .token(Literal, "DOCT")
        .token(OpenTagEnd, "")
        .done();
    assert_eq!(tokenize("<!DOCT>"), expected);
}

#[test]
fn test_doctype_mismatch_falls_back_to_short_comment() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!")
        .token(Literal, "doctypex")
        .token(OpenTagEnd, "")
        .done();
    assert_eq!(tokenize("<!doctypex>"), expected);
}

#[test]
fn test_normal_comment() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!--")
        .token(Literal, " hello world ")
        .token(OpenTagEnd, "--")
        .done();
    assert_eq!(tokenize("<!-- hello world -->"), expected);
}

#[test]
fn test_comment_with_dash_runs() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!--")
        .token(Literal, "-- ")
        .token(Literal, "- ")
        .token(Literal, "-- ")
        .token(Literal, "-")
        .token(Literal, "-")
        .token(OpenTagEnd, "--")
        .done();
    assert_eq!(tokenize("<!---- - -- ---->"), expected);
}

#[test]
fn test_unterminated_comment() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!--")
        .token(Literal, " open")
        .done();
    assert_eq!(tokenize("<!-- open"), expected);
}

#[test]
fn test_comment_prefix_at_eof() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!")
        .token(Literal, "-")
        .done();
    assert_eq!(tokenize("<!-"), expected);
}

#[test]
fn test_short_comments() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "")
        .token(Literal, "? hello world ?")
        .token(OpenTagEnd, "")
        .skip(2)
        .token(OpenTag, "!")
        .token(Literal, "- hello world -")
        .token(OpenTagEnd, "")
        .done();
    assert_eq!(tokenize("<? hello world ?><!- hello world ->"), expected);
}

#[test]
fn test_empty_bang_tag() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "!")
        .token(OpenTagEnd, "")
        .skip(1)
        .token(Literal, "x")
        .done();
    assert_eq!(tokenize("<!>x"), expected);
}

#[test]
fn test_open_tag_ends() {
    let input = "<a1><b2/><c3 /><d4  /   ><e5    f6/><g7     /h8><i9      /j10/><k11//>";
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "a1")
        .token(OpenTagEnd, "")
        .skip(2)
        .token(OpenTag, "b2")
        .token(OpenTagEnd, "/")
        .skip(2)
        .token(OpenTag, "c3")
        .token(Whitespace, " ")
        .token(OpenTagEnd, "/")
        .skip(2)
        .token(OpenTag, "d4")
        .token(Whitespace, "  ")
        .token(AttrValueNq, "/")
        .token(Whitespace, "   ")
        .token(OpenTagEnd, "")
        .skip(2)
        .token(OpenTag, "e5")
        .token(Whitespace, "    ")
        .token(AttrValueNq, "f6")
        .token(OpenTagEnd, "/")
        .skip(2)
        .token(OpenTag, "g7")
        .token(Whitespace, "     ")
        .token(AttrValueNq, "/")
        .token(AttrValueNq, "h8")
        .token(OpenTagEnd, "")
        .skip(2)
        .token(OpenTag, "i9")
        .token(Whitespace, "      ")
        .token(AttrValueNq, "/")
        .token(AttrValueNq, "j10")
        .token(OpenTagEnd, "/")
        .skip(2)
        .token(OpenTag, "k11")
        .token(AttrValueNq, "/")
        .token(OpenTagEnd, "/")
        .done();
    assert_eq!(tokenize(input), expected);
}

#[test]
fn test_close_tags() {
    let expected = Expect::new()
        .skip(2)
        .token(CloseTag, "div")
        .skip(3)
        .token(CloseTag, " div ")
        .done();
    assert_eq!(tokenize("</div></ div >"), expected);
}

#[test]
fn test_known_tag_names_are_lower_cased() {
    let tokens = tokenize("<DIV></Div>");
    assert_eq!(tokens[0], Token::new(OpenTag, 1, 4, "div"));
    assert_eq!(tokens[2], Token::new(CloseTag, 7, 10, "div"));
}

#[test]
fn test_unknown_tag_names_keep_case() {
    let tokens = tokenize("<Test></Test>");
    assert_eq!(tokens[0], Token::new(OpenTag, 1, 5, "Test"));
    assert_eq!(tokens[2], Token::new(CloseTag, 8, 12, "Test"));
}

#[test]
fn test_script_raw_text() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "script")
        .token(OpenTagEnd, "")
        .skip(1)
        .token(Literal, "</div>")
        .token(Literal, "</script")
        .skip(2)
        .token(CloseTag, "script ")
        .done();
    assert_eq!(tokenize("<script></div></script</script >"), expected);
}

#[test]
fn test_style_raw_text() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "style")
        .token(OpenTagEnd, "")
        .skip(1)
        .token(Literal, "</div>")
        .token(Literal, "</style")
        .skip(2)
        .token(CloseTag, "style ")
        .done();
    assert_eq!(tokenize("<style></div></style</style >"), expected);
}

#[test]
fn test_raw_text_close_is_case_insensitive() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "script")
        .token(OpenTagEnd, "")
        .skip(1)
        .token(Literal, "a")
        .token(Literal, "<b")
        .skip(2)
        .token(CloseTag, "script")
        .skip(2)
        .token(OpenTag, "i")
        .done();
    assert_eq!(tokenize("<SCRIPT>a<b</SCRIPT><i"), expected);
}

#[test]
fn test_raw_text_partial_close_at_eof() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "script")
        .token(OpenTagEnd, "")
        .skip(1)
        .token(Literal, "a")
        .token(Literal, "</scr")
        .done();
    assert_eq!(tokenize("<script>a</scr"), expected);
}

#[test]
fn test_raw_text_full_close_at_eof() {
    let expected = Expect::new()
        .skip(1)
        .token(OpenTag, "script")
        .token(OpenTagEnd, "")
        .skip(1)
        .token(Literal, "a")
        .skip(2)
        .token(CloseTag, "script")
        .done();
    assert_eq!(tokenize("<script>a</script"), expected);
}

#[test]
fn test_multibyte_text_offsets() {
    let input = "é<b>ü</b>";
    let tokens = tokenize(input);
    let expected = Expect::new()
        .token(Literal, "é")
        .skip(1)
        .token(OpenTag, "b")
        .token(OpenTagEnd, "")
        .skip(1)
        .token(Literal, "ü")
        .skip(2)
        .token(CloseTag, "b")
        .done();
    assert_eq!(tokens, expected);
    for token in &tokens {
        assert_eq!(&input[token.start..token.end], token.value);
    }
}

#[test]
fn test_tokenizer_exposes_tokens_before_consumption() {
    let source = "<p class=x>hi</p>";
    let mut tokenizer = Tokenizer::new(source, &TagConfig::HTML);
    assert!(tokenizer.tokens().is_empty());
    tokenizer.run();
    assert_eq!(tokenizer.tokens(), tokenize(source).as_slice());
    assert_eq!(tokenizer.into_tokens(), tokenize(source));
}

#[test]
fn test_token_len_and_is_empty() {
    let tokens = tokenize("<a1><b2/>");
    let open_tag_ends: Vec<&Token> = tokens
        .iter()
        .filter(|token| token.kind == OpenTagEnd)
        .collect();
    assert_eq!(open_tag_ends.len(), 2);
    assert!(open_tag_ends[0].is_empty());
    assert_eq!(open_tag_ends[0].len(), 0);
    assert!(!open_tag_ends[1].is_empty());
    assert_eq!(open_tag_ends[1].len(), 1);
    assert_eq!(tokens[0].len(), "a1".len());
}
