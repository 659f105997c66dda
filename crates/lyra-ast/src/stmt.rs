//! Statement and declaration nodes.

use lyra_source::Span;

use crate::expr::Expr;

/// A single parameter of a `fun` declaration.
///
/// `type_name` is `None` when the source omitted the annotation; the type
/// checker then treats the parameter as the `Any` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunParam {
    pub name: String,
    pub type_name: Option<String>,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    LetDecl {
        name: String,
        type_name: Option<String>,
        init: Expr,
        span: Span,
    },
    Assign {
        name: String,
        value: Expr,
        span: Span,
    },
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
        span: Span,
    },
    Block {
        stmts: Vec<Stmt>,
        span: Span,
    },
    Return {
        value: Option<Expr>,
        span: Span,
    },
    ExprStmt {
        expr: Expr,
        span: Span,
    },
    FunDecl {
        name: String,
        params: Vec<FunParam>,
        return_type: Option<String>,
        body: Vec<Stmt>,
        span: Span,
    },
}

impl Stmt {
    /// Returns the span of this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::LetDecl { span, .. }
            | Self::Assign { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::Block { span, .. }
            | Self::Return { span, .. }
            | Self::ExprStmt { span, .. }
            | Self::FunDecl { span, .. } => *span,
        }
    }
}
