// MPPL lexer -- classifies one token at a time from a byte offset.

mod cursor;

use cursor::Cursor;
use mppl_common::error::LexErrorKind;
use mppl_common::span::Span;
use mppl_common::token::{keyword_from_str, Token, TokenKind};

/// Largest value a number literal may take.
pub const MAX_NUMBER: u64 = 32767;

/// Longest permitted string literal content, in bytes after unescaping.
pub const MAX_STRING_LEN: usize = 1023;

/// One lexed token plus its lexical error, if any.
///
/// Errors never swallow input: the offending bytes still become a token
/// (kind [`TokenKind::Bad`]) of fitting length, so the stream of spans is
/// always a gapless partition of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexed {
    pub kind: TokenKind,
    pub span: Span,
    pub error: Option<LexErrorKind>,
}

impl Lexed {
    pub fn token(&self) -> Token {
        Token {
            kind: self.kind,
            span: self.span,
        }
    }
}

/// Classify the longest token starting at `offset`.
///
/// Pure: reads nothing but `source` and `offset`, and the same inputs
/// always yield the same `(kind, span, error)`. At the end of input it
/// returns a zero-length [`TokenKind::Eof`] token.
pub fn lex(source: &str, offset: u32) -> Lexed {
    Scanner {
        source,
        cursor: Cursor::at(source, offset),
        start: offset,
    }
    .next_token()
}

/// Iterator over the whole token stream, ending with the EOF token.
pub struct Lexer<'src> {
    source: &'src str,
    offset: u32,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            done: false,
        }
    }

    /// Convenience: tokenize the entire source, including the EOF token.
    pub fn tokenize(source: &str) -> Vec<Lexed> {
        Lexer::new(source).collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Lexed;

    fn next(&mut self) -> Option<Lexed> {
        if self.done {
            return None;
        }
        let lexed = lex(self.source, self.offset);
        self.offset = lexed.span.end;
        if lexed.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(lexed)
    }
}

struct Scanner<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
    start: u32,
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Bytes allowed inside a string literal: printable ASCII plus space
/// and tab.
fn is_graphic(c: char) -> bool {
    c.is_ascii_graphic() || c == ' ' || c == '\t'
}

impl Scanner<'_> {
    fn next_token(mut self) -> Lexed {
        let Some(c) = self.cursor.peek() else {
            return self.token(TokenKind::Eof);
        };

        match c {
            c if c.is_ascii_alphabetic() => self.ident_or_keyword(),
            c if c.is_ascii_digit() => self.number(),
            '\'' => self.string(),
            c if is_space(c) => self.whitespace(),
            '{' => self.braces_comment(),
            '/' => self.c_comment(),
            _ => self.symbol(),
        }
    }

    fn token(&mut self, kind: TokenKind) -> Lexed {
        Lexed {
            kind,
            span: Span::new(self.start, self.cursor.pos()),
            error: None,
        }
    }

    fn bad_token(&mut self, error: LexErrorKind) -> Lexed {
        Lexed {
            kind: TokenKind::Bad,
            span: Span::new(self.start, self.cursor.pos()),
            error: Some(error),
        }
    }

    /// Consume one character and fail with a stray-character error.
    fn stray(&mut self) -> Lexed {
        self.cursor.advance();
        self.bad_token(LexErrorKind::StrayChar)
    }

    fn ident_or_keyword(&mut self) -> Lexed {
        self.cursor.eat_while(|c| c.is_ascii_alphanumeric());
        let lexed = self.token(TokenKind::Ident);
        let text = self.text_of(lexed.span);
        match keyword_from_str(text) {
            Some(keyword) => Lexed { kind: keyword, ..lexed },
            None => lexed,
        }
    }

    fn number(&mut self) -> Lexed {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let span = Span::new(self.start, self.cursor.pos());
        // A parse failure can only be overflow, which is also too big.
        let too_big = self
            .text_of(span)
            .parse::<u64>()
            .map_or(true, |value| value > MAX_NUMBER);
        if too_big {
            self.bad_token(LexErrorKind::TooBigNumber)
        } else {
            self.token(TokenKind::Number)
        }
    }

    fn string(&mut self) -> Lexed {
        self.cursor.eat('\'');
        let mut contains_non_graphic = false;
        let mut content_len = 0usize;
        loop {
            if self.cursor.eat('\'') {
                if self.cursor.eat('\'') {
                    // Doubled quote: one quote of content.
                    content_len += 1;
                    continue;
                }
                return if contains_non_graphic {
                    self.bad_token(LexErrorKind::NongraphicChar)
                } else if content_len > MAX_STRING_LEN {
                    self.bad_token(LexErrorKind::TooLongString)
                } else {
                    self.token(TokenKind::String)
                };
            }
            match self.cursor.peek() {
                None | Some('\r') | Some('\n') => {
                    return self.bad_token(LexErrorKind::UnterminatedString);
                }
                Some(c) => {
                    if !is_graphic(c) {
                        contains_non_graphic = true;
                    }
                    content_len += c.len_utf8();
                    self.cursor.advance();
                }
            }
        }
    }

    fn whitespace(&mut self) -> Lexed {
        self.cursor.eat_while(is_space);
        self.token(TokenKind::Whitespace)
    }

    fn braces_comment(&mut self) -> Lexed {
        self.cursor.eat('{');
        loop {
            if self.cursor.eat('}') {
                return self.token(TokenKind::BracesComment);
            }
            if self.cursor.advance().is_none() {
                return self.bad_token(LexErrorKind::UnterminatedComment);
            }
        }
    }

    fn c_comment(&mut self) -> Lexed {
        self.cursor.eat('/');
        if !self.cursor.eat('*') {
            // A lone `/` matches no rule; MPPL division is spelled `div`.
            return self.bad_token(LexErrorKind::StrayChar);
        }
        loop {
            match self.cursor.advance() {
                None => return self.bad_token(LexErrorKind::UnterminatedComment),
                Some('*') => {
                    if self.cursor.eat('/') {
                        return self.token(TokenKind::CComment);
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn symbol(&mut self) -> Lexed {
        let kind = if self.cursor.eat('+') {
            TokenKind::Plus
        } else if self.cursor.eat('-') {
            TokenKind::Minus
        } else if self.cursor.eat('*') {
            TokenKind::Star
        } else if self.cursor.eat('=') {
            TokenKind::Equal
        } else if self.cursor.eat('<') {
            if self.cursor.eat('>') {
                TokenKind::NotEq
            } else if self.cursor.eat('=') {
                TokenKind::LessEq
            } else {
                TokenKind::Less
            }
        } else if self.cursor.eat('>') {
            if self.cursor.eat('=') {
                TokenKind::GreaterEq
            } else {
                TokenKind::Greater
            }
        } else if self.cursor.eat('(') {
            TokenKind::LParen
        } else if self.cursor.eat(')') {
            TokenKind::RParen
        } else if self.cursor.eat('[') {
            TokenKind::LBracket
        } else if self.cursor.eat(']') {
            TokenKind::RBracket
        } else if self.cursor.eat(':') {
            if self.cursor.eat('=') {
                TokenKind::Assign
            } else {
                TokenKind::Colon
            }
        } else if self.cursor.eat('.') {
            TokenKind::Dot
        } else if self.cursor.eat(',') {
            TokenKind::Comma
        } else if self.cursor.eat(';') {
            TokenKind::Semi
        } else {
            return self.stray();
        };
        self.token(kind)
    }

    fn text_of(&self, span: Span) -> &str {
        &self.source[span.start as usize..span.end as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source).iter().map(|lexed| lexed.kind).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        let tokens = Lexer::tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].span, Span::new(0, 0));
    }

    #[test]
    fn symbols_lex_greedily() {
        assert_eq!(
            kinds("<><=<>=:=:."),
            vec![
                TokenKind::NotEq,
                TokenKind::LessEq,
                TokenKind::NotEq,
                TokenKind::Equal,
                TokenKind::Assign,
                TokenKind::Colon,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            kinds("begin Begin"),
            vec![
                TokenKind::BeginKw,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn number_boundary() {
        let ok = lex("32767", 0);
        assert_eq!(ok.kind, TokenKind::Number);
        assert_eq!(ok.error, None);

        let too_big = lex("32768", 0);
        assert_eq!(too_big.kind, TokenKind::Bad);
        assert_eq!(too_big.error, Some(LexErrorKind::TooBigNumber));
        assert_eq!(too_big.span, Span::new(0, 5));

        let huge = lex("99999999999999999999", 0);
        assert_eq!(huge.error, Some(LexErrorKind::TooBigNumber));
    }

    #[test]
    fn doubled_quote_string() {
        let lexed = lex("'it''s'", 0);
        assert_eq!(lexed.kind, TokenKind::String);
        assert_eq!(lexed.span, Span::new(0, 7));
        assert_eq!(lexed.error, None);
    }

    #[test]
    fn unterminated_string_at_newline() {
        let lexed = lex("'abc\n", 0);
        assert_eq!(lexed.kind, TokenKind::Bad);
        assert_eq!(lexed.error, Some(LexErrorKind::UnterminatedString));
        assert_eq!(lexed.span, Span::new(0, 4));
    }

    #[test]
    fn non_graphic_in_string() {
        let lexed = lex("'a\u{1}b'", 0);
        assert_eq!(lexed.kind, TokenKind::Bad);
        assert_eq!(lexed.error, Some(LexErrorKind::NongraphicChar));
    }

    #[test]
    fn string_too_long() {
        let body = "a".repeat(1024);
        let source = format!("'{body}'");
        let lexed = lex(&source, 0);
        assert_eq!(lexed.error, Some(LexErrorKind::TooLongString));

        let body = "a".repeat(1023);
        let source = format!("'{body}'");
        let lexed = lex(&source, 0);
        assert_eq!(lexed.kind, TokenKind::String);
    }

    #[test]
    fn unterminated_comments() {
        let braces = lex("{ hello", 0);
        assert_eq!(braces.kind, TokenKind::Bad);
        assert_eq!(braces.error, Some(LexErrorKind::UnterminatedComment));
        assert_eq!(braces.span, Span::new(0, 7));

        let c_style = lex("/* hello", 0);
        assert_eq!(c_style.error, Some(LexErrorKind::UnterminatedComment));
    }

    #[test]
    fn c_comment_with_inner_stars() {
        let lexed = lex("/***/", 0);
        assert_eq!(lexed.kind, TokenKind::CComment);
        assert_eq!(lexed.span, Span::new(0, 5));
    }

    #[test]
    fn stray_characters() {
        let lexed = lex("@", 0);
        assert_eq!(lexed.kind, TokenKind::Bad);
        assert_eq!(lexed.error, Some(LexErrorKind::StrayChar));

        // A multi-byte character is consumed whole.
        let lexed = lex("é", 0);
        assert_eq!(lexed.span, Span::new(0, 2));

        // A lone slash matches no rule.
        let lexed = lex("/x", 0);
        assert_eq!(lexed.kind, TokenKind::Bad);
        assert_eq!(lexed.span, Span::new(0, 1));
    }

    #[test]
    fn whitespace_collapses_into_one_trivia() {
        let lexed = lex("  \t\r\n  x", 0);
        assert_eq!(lexed.kind, TokenKind::Whitespace);
        assert_eq!(lexed.span, Span::new(0, 7));
    }

    #[test]
    fn determinism() {
        let source = "program p; { c } x := 'a''b' 123 @";
        let first = Lexer::tokenize(source);
        let second = Lexer::tokenize(source);
        assert_eq!(first, second);
    }
}
