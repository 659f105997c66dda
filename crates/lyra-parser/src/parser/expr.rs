//! Expression parsing: one function per precedence tier, lowest to highest,
//! each parsing its operand from the tier above and then looping over any
//! operators at its own level.

use lyra_ast::{BinaryOp, Expr, UnaryOp};
use lyra_source::Span;

use super::Parser;
use crate::lexer::TokenKind;

const MAX_ARGUMENTS: usize = 255;

impl Parser<'_, '_> {
    /// Parses a full expression, starting at the lowest precedence tier.
    pub(super) fn parse_expr(&mut self) -> Option<Expr> { self.parse_or() }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_and()?;
        while self.matches(TokenKind::Or) {
            let rhs = self.parse_and()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(Box::new(lhs), BinaryOp::Or, Box::new(rhs), span);
        }
        Some(lhs)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_equality()?;
        while self.matches(TokenKind::And) {
            let rhs = self.parse_equality()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(Box::new(lhs), BinaryOp::And, Box::new(rhs), span);
        }
        Some(lhs)
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_comparison()?;
        loop {
            let op = match self.current().kind() {
                TokenKind::EqualEqual => BinaryOp::Eq,
                TokenKind::BangEqual => BinaryOp::NotEq,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_comparison()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs), span);
        }
        Some(lhs)
    }

    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current().kind() {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEq,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEq,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs), span);
        }
        Some(lhs)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current().kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs), span);
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current().kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            let span = lhs.span().merge(&rhs.span());
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs), span);
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.current().kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_call(),
        };
        let start = self.advance().span();
        let operand = self.parse_unary()?;
        let span = start.merge(&operand.span());
        Some(Expr::Unary(op, Box::new(operand), span))
    }

    fn parse_call(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;
        while self.check(TokenKind::LeftParen) {
            expr = self.parse_call_arguments(expr)?;
        }
        Some(expr)
    }

    fn parse_call_arguments(&mut self, callee: Expr) -> Option<Expr> {
        self.advance(); // '('
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        let close = self.expect(TokenKind::RightParen)?;

        if args.len() > MAX_ARGUMENTS {
            self.diagnostics.warning(
                format!("Call has {} arguments, more than the supported {MAX_ARGUMENTS}", args.len()),
                callee.span().merge(&close.span()),
            );
        }

        let span = callee.span().merge(&close.span());
        Some(Expr::Call(Box::new(callee), args, span))
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let token = self.current();
        match token.kind() {
            TokenKind::True => {
                self.advance();
                Some(Expr::BoolLit(true, token.span()))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::BoolLit(false, token.span()))
            }
            TokenKind::IntegerLiteral => self.parse_int_literal(token),
            TokenKind::FloatLiteral => self.parse_float_literal(token),
            TokenKind::StringLiteral => self.parse_string_literal(token),
            TokenKind::CharacterLiteral => self.parse_char_literal(token),
            // `print` lexes as the reserved `Print` keyword token (per the
            // lexer's keyword table), but the language has no `print`
            // statement: it is an ordinary built-in function, so a bare
            // `print` in expression position names it like any identifier.
            TokenKind::Identifier | TokenKind::Print => {
                self.advance();
                Some(Expr::Ident(token.lexeme(self.source).to_string(), token.span()))
            }
            TokenKind::LeftParen => self.parse_grouping(),
            _ => {
                self.error(format!("Expected expression, found {}", token.kind()), token.span());
                None
            }
        }
    }

    fn parse_int_literal(&mut self, token: crate::lexer::Token) -> Option<Expr> {
        self.advance();
        let text = token.lexeme(self.source);
        match text.parse::<i64>() {
            Ok(value) => Some(Expr::IntLit(value, token.span())),
            Err(_) => {
                self.error(format!("Invalid integer literal: {text}"), token.span());
                None
            }
        }
    }

    fn parse_float_literal(&mut self, token: crate::lexer::Token) -> Option<Expr> {
        self.advance();
        let text = token.lexeme(self.source);
        match text.parse::<f64>() {
            Ok(value) => Some(Expr::FloatLit(value, token.span())),
            Err(_) => {
                self.error(format!("Invalid float literal: {text}"), token.span());
                None
            }
        }
    }

    fn parse_string_literal(&mut self, token: crate::lexer::Token) -> Option<Expr> {
        self.advance();
        let raw = token.lexeme(self.source);
        let inner = &raw[1..raw.len() - 1];
        let decoded = decode_escapes(inner, token.span(), self)?;
        Some(Expr::StringLit(decoded, token.span()))
    }

    fn parse_char_literal(&mut self, token: crate::lexer::Token) -> Option<Expr> {
        self.advance();
        let raw = token.lexeme(self.source);
        let inner = &raw[1..raw.len() - 1];
        let decoded = decode_escapes(inner, token.span(), self)?;
        let mut chars = decoded.chars();
        let ch = chars.next().unwrap_or('\0');
        Some(Expr::CharLit(ch, token.span()))
    }

    fn parse_grouping(&mut self) -> Option<Expr> {
        let open = self.advance(); // '('
        let inner = self.parse_expr()?;
        let close = self.expect(TokenKind::RightParen)?;
        let span = open.span().merge(&close.span());
        Some(Expr::Grouping(Box::new(inner), span))
    }
}

/// Decodes backslash escapes shared by string and character literals:
/// `\0 \n \r \t \\ \' \"`. An unrecognized escape is a parse error.
fn decode_escapes(raw: &str, span: Span, parser: &mut Parser<'_, '_>) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some(other) => {
                parser.error(format!("Invalid escape sequence '\\{other}'"), span);
                return None;
            }
            None => {
                parser.error("Invalid escape sequence at end of literal", span);
                return None;
            }
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use lyra_ast::{BinaryOp, Expr, Stmt};

    use super::super::tests::parse;

    fn expr_stmt(source: &str) -> Expr {
        let (program, diagnostics) = parse(source);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        match program.into_iter().next().expect("one statement") {
            Stmt::ExprStmt { expr, .. } => expr,
            other => panic!("expected ExprStmt, got {other:?}"),
        }
    }

    #[test]
    fn precedence_multiplies_before_adding() {
        let expr = expr_stmt("1 + 2 * 3;");
        match expr {
            Expr::Binary(lhs, BinaryOp::Add, rhs, _) => {
                assert!(matches!(*lhs, Expr::IntLit(1, _)));
                assert!(matches!(*rhs, Expr::Binary(_, BinaryOp::Mul, _, _)));
            }
            other => panic!("expected Add at the top, got {other:?}"),
        }
    }

    #[test]
    fn call_binds_tighter_than_unary_negation() {
        let expr = expr_stmt("-foo();");
        match expr {
            Expr::Unary(_, operand, _) => assert!(matches!(*operand, Expr::Call(..))),
            other => panic!("expected Unary wrapping a Call, got {other:?}"),
        }
    }

    #[test]
    fn string_literal_decodes_escapes() {
        let expr = expr_stmt(r#""a\nb";"#);
        assert!(matches!(expr, Expr::StringLit(ref s, _) if s == "a\nb"));
    }

    #[test]
    fn integer_overflow_is_a_diagnostic_not_a_panic() {
        let (program, diagnostics) = parse("99999999999999999999999999;");
        assert!(program.is_empty());
        assert!(diagnostics.had_error());
    }

    #[test]
    fn too_many_arguments_warns_but_does_not_abort() {
        let args = (0..300).map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        let source = format!("f({args});");
        let (program, diagnostics) = parse(&source);
        assert_eq!(program.len(), 1);
        assert_eq!(diagnostics.total(), 1);
    }
}
