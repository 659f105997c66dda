//! Lexer for the Lyra language.
//!
//! Whitespace, single-line comments, and doc comments are scanned by hand so
//! position tracking and doc-comment merging stay exact; everything else
//! (numbers, identifiers, keywords, operators, delimiters) is recognised by
//! the `logos`-derived [`TokenKind`] automaton run over the remaining slice.

mod token;

pub use token::{Token, TokenKind};

use logos::Logos;
use lyra_source::{DiagnosticSink, Position, Span};

const CHAR_ESCAPES: [char; 7] = ['0', 'n', 'r', 't', '\\', '\'', '"'];

/// Converts a source string into a token stream.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    line: usize,
    column: usize,
    line_start: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self { source, offset: 0, line: 1, column: 1, line_start: 0 }
    }

    /// Lexes the entire source, returning a token stream that always ends in
    /// exactly one [`TokenKind::Eof`] token. Diagnostics for lexical errors
    /// are reported into `diagnostics` as they are discovered.
    #[must_use]
    pub fn tokenize(mut self, diagnostics: &mut DiagnosticSink) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token(diagnostics);
            let is_eof = token.is(TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    fn pos(&self) -> Position { Position::new(self.line, self.column, self.offset, self.line_start) }

    fn peek_char(&self) -> Option<char> { self.source[self.offset..].chars().next() }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
            self.line_start = self.offset;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn next_token(&mut self, diagnostics: &mut DiagnosticSink) -> Token {
        if let Some(doc) = self.skip_trivia() {
            return doc;
        }

        let start = self.pos();
        let Some(ch) = self.peek_char() else {
            return Token::new(TokenKind::Eof, Span::empty(start));
        };

        match ch {
            '"' => self.lex_string(diagnostics, start),
            '\'' => self.lex_char(diagnostics, start),
            _ => self.lex_via_logos(diagnostics, start),
        }
    }

    /// Consumes whitespace and `//` comments. Returns `Some` with a merged
    /// `DocStringComment` token if a run of `///` lines was found; otherwise
    /// `None` once the cursor sits at the start of a real token (or EOF).
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.source[self.offset..].starts_with("///") => {
                    return Some(self.lex_doc_comment());
                }
                Some('/') if self.source[self.offset..].starts_with("//") => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => return None,
            }
        }
    }

    fn lex_doc_comment(&mut self) -> Token {
        let start = self.pos();
        let mut end = start;

        loop {
            self.bump();
            self.bump();
            self.bump(); // "///"

            while let Some(c) = self.peek_char() {
                if c == '\n' {
                    break;
                }
                self.bump();
            }
            end = self.pos();

            // Look ahead through whitespace without committing, to see if
            // another "///" line immediately follows.
            let mut probe = self.offset;
            loop {
                match self.source[probe..].chars().next() {
                    Some(c) if c.is_whitespace() => probe += c.len_utf8(),
                    _ => break,
                }
            }

            if !self.source[probe..].starts_with("///") {
                return Token::new(TokenKind::DocStringComment, Span::new(start, end));
            }

            while self.offset < probe {
                self.bump();
            }
        }
    }

    fn lex_string(&mut self, diagnostics: &mut DiagnosticSink, start: Position) -> Token {
        self.bump(); // opening quote

        loop {
            match self.peek_char() {
                None => {
                    let end = self.pos();
                    diagnostics.error("Unterminated String", Span::new(start, end));
                    return Token::new(TokenKind::Invalid, Span::new(start, end));
                }
                Some('"') => {
                    self.bump();
                    let end = self.pos();
                    return Token::new(TokenKind::StringLiteral, Span::new(start, end));
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn lex_char(&mut self, diagnostics: &mut DiagnosticSink, start: Position) -> Token {
        self.bump(); // opening quote

        let body_ok = match self.peek_char() {
            Some('\\') => {
                self.bump();
                match self.peek_char() {
                    Some(c) if CHAR_ESCAPES.contains(&c) => {
                        self.bump();
                        true
                    }
                    _ => false,
                }
            }
            Some('\'') | None => false,
            Some(_) => {
                self.bump();
                true
            }
        };

        if body_ok && self.peek_char() == Some('\'') {
            self.bump();
            let end = self.pos();
            return Token::new(TokenKind::CharacterLiteral, Span::new(start, end));
        }

        while let Some(c) = self.peek_char() {
            if c == '\'' {
                self.bump();
                break;
            }
            if c == '\n' {
                break;
            }
            self.bump();
        }
        let end = self.pos();
        diagnostics.error("Invalid character literal", Span::new(start, end));
        Token::new(TokenKind::Invalid, Span::new(start, end))
    }

    fn lex_via_logos(&mut self, diagnostics: &mut DiagnosticSink, start: Position) -> Token {
        let mut sub = TokenKind::lexer(&self.source[self.offset..]);

        if let Some(Ok(mut kind)) = sub.next() {
            let len = sub.span().end;
            let lexeme = &self.source[self.offset..self.offset + len];

            if kind == TokenKind::Identifier
                && let Some(keyword) = TokenKind::keyword(lexeme)
            {
                kind = keyword;
            }

            for _ in 0..lexeme.chars().count() {
                self.bump();
            }

            let end = self.pos();
            return Token::new(kind, Span::new(start, end));
        }

        let ch = self.bump().expect("caller only invokes this with a character present");
        let end = self.pos();
        diagnostics.error(format!("Unexpected Character '{ch}'"), Span::new(start, end));
        Token::new(TokenKind::Invalid, Span::new(start, end))
    }
}
