//! Expression nodes.

use lyra_source::Span;

/// A unary prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation, `-x`.
    Neg,
    /// Logical negation, `!x`.
    Not,
}

/// A binary infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
}

/// An expression node.
///
/// Every variant carries its full [`Span`], including the ones it wraps
/// (`Grouping`) or recurses through (`Unary`, `Binary`, `Call`).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit(i64, Span),
    FloatLit(f64, Span),
    StringLit(String, Span),
    CharLit(char, Span),
    BoolLit(bool, Span),
    Ident(String, Span),
    Unary(UnaryOp, Box<Expr>, Span),
    Binary(Box<Expr>, BinaryOp, Box<Expr>, Span),
    Grouping(Box<Expr>, Span),
    Call(Box<Expr>, Vec<Expr>, Span),
}

impl Expr {
    /// Returns the span of this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::IntLit(_, span)
            | Self::FloatLit(_, span)
            | Self::StringLit(_, span)
            | Self::CharLit(_, span)
            | Self::BoolLit(_, span)
            | Self::Ident(_, span)
            | Self::Unary(_, _, span)
            | Self::Binary(_, _, _, span)
            | Self::Grouping(_, span)
            | Self::Call(_, _, span) => *span,
        }
    }
}
