//! Runtime error types.

use lyra_source::{Diagnostic, Span};
use thiserror::Error;

/// Errors raised while executing an already type-checked program.
///
/// A well-typed program can still fail at runtime: a variable may be read
/// before it's defined in the current dynamic scope, and division can
/// still divide by zero. `UnsupportedOperand` exists for the interpreter
/// used standalone, without the type checker having run first; a checked
/// program never reaches it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String, span: Span },

    #[error("Undefined function '{name}'")]
    UndefinedFunction { name: String, span: Span },

    #[error("Division by zero")]
    DivisionByZero { span: Span },

    #[error("Unsupported operand type for '{operator}': {operand}")]
    UnsupportedOperand { operator: String, operand: &'static str, span: Span },

    #[error("'{name}' takes {expected} argument(s), found {found}")]
    ArityMismatch { name: String, expected: usize, found: usize, span: Span },

    #[error("Call target is not callable")]
    NotCallable { span: Span },
}

impl RuntimeError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UndefinedVariable { span, .. }
            | Self::UndefinedFunction { span, .. }
            | Self::DivisionByZero { span }
            | Self::UnsupportedOperand { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::NotCallable { span } => *span,
        }
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(error: RuntimeError) -> Self {
        let span = error.span();
        Self::error(error.to_string(), span)
    }
}
