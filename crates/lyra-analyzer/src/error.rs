//! Semantic error types.

use lyra_source::{Diagnostic, Span};
use thiserror::Error;

use crate::types::Type;

/// Errors the type checker can report.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    #[error("Undefined variable or function: {name}")]
    UndefinedName { name: String, span: Span },

    #[error("Unknown type name: {name}")]
    UnknownTypeName { name: String, span: Span },

    #[error("'{function}' takes {expected} argument(s), found {found}")]
    ArityMismatch { function: String, expected: usize, found: usize, span: Span },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type, span: Span },

    #[error("Invalid operand type(s) for '{operator}': {operand}")]
    InvalidOperand { operator: String, operand: Type, span: Span },

    #[error("Call target is not a function: {name}")]
    NotCallable { name: String, span: Span },

    #[error("'return' statement outside function")]
    ReturnOutsideFunction { span: Span },
}

impl SemanticError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UndefinedName { span, .. }
            | Self::UnknownTypeName { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::InvalidOperand { span, .. }
            | Self::NotCallable { span, .. }
            | Self::ReturnOutsideFunction { span } => *span,
        }
    }
}

impl From<SemanticError> for Diagnostic {
    fn from(error: SemanticError) -> Self {
        let span = error.span();
        Self::error(error.to_string(), span)
    }
}
