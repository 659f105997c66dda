//! Recursive-descent statement parser and precedence-climbing expression
//! parser, operating on the flat token list produced by the lexer.

mod expr;
mod stmt;

use lyra_source::{DiagnosticSink, Span};

use crate::lexer::{Token, TokenKind};

/// Tokens the synchronize strategy treats as statement boundaries.
const SYNC_KEYWORDS: [TokenKind; 7] = [
    TokenKind::Class,
    TokenKind::Fun,
    TokenKind::Let,
    TokenKind::For,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Return,
];

/// Parses a flat token stream into a statement list, on a single integer
/// cursor. Parse failures are recorded into `diagnostics` and recovered from
/// via [`Parser::synchronize`]; they never abort the whole parse.
pub struct Parser<'src, 'diag> {
    source: &'src str,
    tokens: Vec<Token>,
    cursor: usize,
    diagnostics: &'diag mut DiagnosticSink,
}

impl<'src, 'diag> Parser<'src, 'diag> {
    /// Creates a parser over an already-lexed token stream.
    #[must_use]
    pub fn new(source: &'src str, tokens: Vec<Token>, diagnostics: &'diag mut DiagnosticSink) -> Self {
        Self { source, tokens, cursor: 0, diagnostics }
    }

    fn current(&self) -> Token {
        self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> Token {
        self.tokens[self.cursor.saturating_sub(1).min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: TokenKind) -> bool { self.current().is(kind) }

    fn at_end(&self) -> bool { self.check(TokenKind::Eof) }

    fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.at_end() {
            self.cursor += 1;
        }
        token
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it has the expected kind, reporting
    /// `"Expected <kind>, found <found>"` and returning `None` otherwise.
    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            let found = self.current();
            self.diagnostics.error(
                format!("Expected {kind}, found {}", found.kind()),
                found.span(),
            );
            None
        }
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.error(message, span);
    }

    /// Advances until the previous token was `;` or the next token starts a
    /// new statement, per spec.md's synchronize strategy.
    fn synchronize(&mut self) {
        while !self.at_end() {
            if self.previous().is(TokenKind::Semicolon) {
                return;
            }
            if SYNC_KEYWORDS.iter().any(|kind| self.check(*kind)) {
                return;
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use lyra_ast::Stmt;
    use lyra_source::DiagnosticSink;

    use crate::lexer::Lexer;
    use crate::parser::Parser;

    pub(super) fn parse(source: &str) -> (Vec<Stmt>, DiagnosticSink) {
        let mut diagnostics = DiagnosticSink::new();
        let tokens = Lexer::new(source).tokenize(&mut diagnostics);
        let program = Parser::new(source, tokens, &mut diagnostics).parse_program();
        (program, diagnostics)
    }

    #[test]
    fn empty_source_parses_to_no_statements() {
        let (program, diagnostics) = parse("");
        assert!(program.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_semicolon_recovers_and_parses_next_statement() {
        let (program, diagnostics) = parse("let x = 5\nlet y = 10;");
        assert_eq!(program.len(), 2);
        assert_eq!(diagnostics.total(), 1);
    }
}
