//! Statement and declaration parsing.

use lyra_ast::{FunParam, Stmt};

use super::Parser;
use crate::lexer::TokenKind;

impl Parser<'_, '_> {
    /// Parses the whole token stream into a statement list. Always
    /// terminates; failed statements are skipped via [`Parser::synchronize`]
    /// rather than aborting the parse.
    #[must_use]
    pub fn parse_program(mut self) -> Vec<Stmt> {
        let mut program = Vec::new();
        while !self.at_end() {
            match self.parse_stmt() {
                Some(stmt) => program.push(stmt),
                None => self.synchronize(),
            }
        }
        program
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.current().kind() {
            TokenKind::Let => self.parse_let_decl(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Fun => self.parse_fun_decl(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::LeftBrace => self.parse_block(),
            TokenKind::Identifier => self.parse_assign_or_expr_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_type_annotation(&mut self) -> Option<String> {
        if self.matches(TokenKind::Colon) {
            let name = self.expect(TokenKind::Identifier)?;
            Some(name.lexeme(self.source).to_string())
        } else {
            None
        }
    }

    fn parse_let_decl(&mut self) -> Option<Stmt> {
        let start = self.advance().span(); // 'let'
        let name_token = self.expect(TokenKind::Identifier)?;
        let name = name_token.lexeme(self.source).to_string();
        let type_name = self.parse_type_annotation();
        self.expect(TokenKind::Equal)?;
        let init = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon)?;
        Some(Stmt::LetDecl { name, type_name, init, span: start.merge(&end.span()) })
    }

    fn parse_return(&mut self) -> Option<Stmt> {
        let start = self.advance().span(); // 'return'
        let value = if self.check(TokenKind::Semicolon) { None } else { Some(self.parse_expr()?) };
        let end = self.expect(TokenKind::Semicolon)?;
        Some(Stmt::Return { value, span: start.merge(&end.span()) })
    }

    fn parse_fun_decl(&mut self) -> Option<Stmt> {
        let start = self.advance().span(); // 'fun'
        let name = self.expect(TokenKind::Identifier)?.lexeme(self.source).to_string();
        self.expect(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let param_name = self.expect(TokenKind::Identifier)?.lexeme(self.source).to_string();
                let type_name = self.parse_type_annotation();
                params.push(FunParam { name: param_name, type_name });
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;

        let return_type = if self.matches(TokenKind::Arrow) {
            Some(self.expect(TokenKind::Identifier)?.lexeme(self.source).to_string())
        } else {
            None
        };

        self.expect(TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.at_end() {
            match self.parse_stmt() {
                Some(stmt) => body.push(stmt),
                None => self.synchronize(),
            }
        }
        let end = self.expect(TokenKind::RightBrace)?;

        Some(Stmt::FunDecl { name, params, return_type, body, span: start.merge(&end.span()) })
    }

    fn parse_if(&mut self) -> Option<Stmt> {
        let start = self.advance().span(); // 'if'
        let cond = self.parse_expr()?;
        let then_branch = Box::new(self.parse_stmt()?);
        let (else_branch, end) = if self.matches(TokenKind::Else) {
            let else_stmt = self.parse_stmt()?;
            let span = else_stmt.span();
            (Some(Box::new(else_stmt)), span)
        } else {
            let span = then_branch.span();
            (None, span)
        };
        Some(Stmt::If { cond, then_branch, else_branch, span: start.merge(&end) })
    }

    fn parse_while(&mut self) -> Option<Stmt> {
        let start = self.advance().span(); // 'while'
        let cond = self.parse_expr()?;
        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(&body.span());
        Some(Stmt::While { cond, body, span })
    }

    fn parse_block(&mut self) -> Option<Stmt> {
        let start = self.advance().span(); // '{'
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.at_end() {
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }
        let end = self.expect(TokenKind::RightBrace)?;
        Some(Stmt::Block { stmts, span: start.merge(&end.span()) })
    }

    /// `identifier "="` is parsed speculatively: if the `=` is not there the
    /// cursor is restored and the statement falls through to an expression
    /// statement (so a bare call like `foo();` still works).
    fn parse_assign_or_expr_stmt(&mut self) -> Option<Stmt> {
        let saved_cursor = self.cursor;
        let name_token = self.advance();

        if self.matches(TokenKind::Equal) {
            let name = name_token.lexeme(self.source).to_string();
            let value = self.parse_expr()?;
            let end = self.expect(TokenKind::Semicolon)?;
            return Some(Stmt::Assign { name, value, span: name_token.span().merge(&end.span()) });
        }

        self.cursor = saved_cursor;
        self.parse_expr_stmt()
    }

    fn parse_expr_stmt(&mut self) -> Option<Stmt> {
        let expr = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon)?;
        let span = expr.span().merge(&end.span());
        Some(Stmt::ExprStmt { expr, span })
    }
}
