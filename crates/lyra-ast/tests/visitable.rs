//! Tests for the `Visitor` trait over owned AST nodes.

use lyra_ast::{BinaryOp, Expr, Stmt, UnaryOp, Visitor};
use lyra_source::Span;

fn span() -> Span { Span::new(0, 5) }

/// Records the order and kind of every node it visits, recursing through
/// children via the trait's default `visit_program`/`visit_stmt` bodies.
struct RecordingVisitor {
    visited: Vec<&'static str>,
}

impl RecordingVisitor {
    const fn new() -> Self { Self { visited: Vec::new() } }
}

impl Visitor<()> for RecordingVisitor {
    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::IntLit(..) => self.visited.push("int_lit"),
            Expr::FloatLit(..) => self.visited.push("float_lit"),
            Expr::StringLit(..) => self.visited.push("string_lit"),
            Expr::CharLit(..) => self.visited.push("char_lit"),
            Expr::BoolLit(..) => self.visited.push("bool_lit"),
            Expr::Ident(..) => self.visited.push("ident"),
            Expr::Unary(_, operand, _) => {
                self.visited.push("unary");
                self.visit_expr(operand);
            }
            Expr::Binary(left, _, right, _) => {
                self.visited.push("binary");
                self.visit_expr(left);
                self.visit_expr(right);
            }
            Expr::Grouping(inner, _) => {
                self.visited.push("grouping");
                self.visit_expr(inner);
            }
            Expr::Call(callee, args, _) => {
                self.visited.push("call");
                self.visit_expr(callee);
                for arg in args {
                    self.visit_expr(arg);
                }
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::LetDecl { init, .. } => {
                self.visited.push("let_decl");
                self.visit_expr(init);
            }
            Stmt::Assign { value, .. } => {
                self.visited.push("assign");
                self.visit_expr(value);
            }
            Stmt::If { cond, then_branch, else_branch, .. } => {
                self.visited.push("if");
                self.visit_expr(cond);
                self.visit_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_stmt(else_branch);
                }
            }
            Stmt::While { cond, body, .. } => {
                self.visited.push("while");
                self.visit_expr(cond);
                self.visit_stmt(body);
            }
            Stmt::Block { stmts, .. } => {
                self.visited.push("block");
                for stmt in stmts {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::Return { value, .. } => {
                self.visited.push("return");
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            Stmt::ExprStmt { expr, .. } => {
                self.visited.push("expr_stmt");
                self.visit_expr(expr);
            }
            Stmt::FunDecl { body, .. } => {
                self.visited.push("fun_decl");
                for stmt in body {
                    self.visit_stmt(stmt);
                }
            }
        }
    }
}

#[test]
fn visits_binary_expression_children_in_order() {
    let expr = Expr::Binary(
        Box::new(Expr::IntLit(1, span())),
        BinaryOp::Add,
        Box::new(Expr::IntLit(2, span())),
        span(),
    );

    let mut visitor = RecordingVisitor::new();
    visitor.visit_expr(&expr);

    assert_eq!(visitor.visited, vec!["binary", "int_lit", "int_lit"]);
}

#[test]
fn visits_unary_expression_operand() {
    let expr = Expr::Unary(UnaryOp::Neg, Box::new(Expr::IntLit(1, span())), span());

    let mut visitor = RecordingVisitor::new();
    visitor.visit_expr(&expr);

    assert_eq!(visitor.visited, vec!["unary", "int_lit"]);
}

#[test]
fn visits_call_callee_then_each_argument() {
    let expr = Expr::Call(
        Box::new(Expr::Ident("print".to_string(), span())),
        vec![Expr::IntLit(1, span()), Expr::StringLit("ok".to_string(), span())],
        span(),
    );

    let mut visitor = RecordingVisitor::new();
    visitor.visit_expr(&expr);

    assert_eq!(visitor.visited, vec!["call", "ident", "int_lit", "string_lit"]);
}

#[test]
fn visits_if_statement_condition_and_both_branches() {
    let stmt = Stmt::If {
        cond: Expr::BoolLit(true, span()),
        then_branch: Box::new(Stmt::ExprStmt { expr: Expr::IntLit(1, span()), span: span() }),
        else_branch: Some(Box::new(Stmt::ExprStmt {
            expr: Expr::IntLit(2, span()),
            span: span(),
        })),
        span: span(),
    };

    let mut visitor = RecordingVisitor::new();
    visitor.visit_stmt(&stmt);

    assert_eq!(
        visitor.visited,
        vec!["if", "bool_lit", "expr_stmt", "int_lit", "expr_stmt", "int_lit"]
    );
}

#[test]
fn visits_while_statement_condition_then_body() {
    let stmt = Stmt::While {
        cond: Expr::BoolLit(false, span()),
        body: Box::new(Stmt::Block { stmts: vec![], span: span() }),
        span: span(),
    };

    let mut visitor = RecordingVisitor::new();
    visitor.visit_stmt(&stmt);

    assert_eq!(visitor.visited, vec!["while", "bool_lit", "block"]);
}

#[test]
fn visits_fun_decl_body_statements_in_order() {
    let stmt = Stmt::FunDecl {
        name: "f".to_string(),
        params: vec![],
        return_type: None,
        body: vec![
            Stmt::LetDecl {
                name: "x".to_string(),
                type_name: None,
                init: Expr::IntLit(1, span()),
                span: span(),
            },
            Stmt::Return { value: Some(Expr::Ident("x".to_string(), span())), span: span() },
        ],
        span: span(),
    };

    let mut visitor = RecordingVisitor::new();
    visitor.visit_stmt(&stmt);

    assert_eq!(visitor.visited, vec!["fun_decl", "let_decl", "int_lit", "return", "ident"]);
}

#[test]
fn visit_program_visits_every_top_level_statement() {
    let program = vec![
        Stmt::ExprStmt { expr: Expr::IntLit(1, span()), span: span() },
        Stmt::ExprStmt { expr: Expr::IntLit(2, span()), span: span() },
    ];

    let mut visitor = RecordingVisitor::new();
    visitor.visit_program(&program);

    assert_eq!(visitor.visited, vec!["expr_stmt", "int_lit", "expr_stmt", "int_lit"]);
}
