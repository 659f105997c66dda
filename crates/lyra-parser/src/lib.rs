//! Lexer and parser for the Lyra language.
//!
//! [`parse`] is the crate's single entry point: it always terminates and
//! always returns a (possibly partial) statement list, with every failure
//! recorded into the supplied [`DiagnosticSink`] instead of aborting.

pub mod lexer;
mod parser;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use lyra_ast::Stmt;
use lyra_source::DiagnosticSink;

/// Lexes and parses `source`, reporting lexical and syntactic diagnostics
/// into `diagnostics`.
#[must_use]
pub fn parse(source: &str, diagnostics: &mut DiagnosticSink) -> Vec<Stmt> {
    let tokens = Lexer::new(source).tokenize(diagnostics);
    Parser::new(source, tokens, diagnostics).parse_program()
}

#[cfg(test)]
mod tests {
    use lyra_source::DiagnosticSink;

    use super::parse;

    #[test]
    fn parse_terminates_on_garbage_input() {
        let mut diagnostics = DiagnosticSink::new();
        let program = parse("@@@ ??? $$$ {{{", &mut diagnostics);
        assert!(program.is_empty());
        assert!(diagnostics.had_error());
    }
}
