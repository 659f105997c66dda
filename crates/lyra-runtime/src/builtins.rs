//! The built-in function table: `print`, `println`, `string`.
//!
//! Arity `-1` marks a variadic built-in, matching the type checker's
//! `Arity::Variadic` descriptor for the same three names.

use lyra_source::Span;

use crate::error::RuntimeError;
use crate::output::OutputSink;
use crate::value::Value;

/// Looks up a built-in by name, returning its arity (`-1` for variadic).
#[must_use]
pub fn arity(name: &str) -> Option<isize> {
    match name {
        "print" | "println" => Some(-1),
        "string" => Some(1),
        _ => None,
    }
}

/// Invokes a built-in by name. The caller must already know `name` names a
/// built-in (via [`arity`]).
pub fn call(
    name: &str,
    args: &[Value],
    span: Span,
    output: &mut dyn OutputSink,
) -> Result<Value, RuntimeError> {
    match name {
        "print" => {
            for arg in args {
                output.write(&arg.to_string());
            }
            Ok(Value::Null)
        }
        "println" => {
            let rendered: String = args.iter().map(ToString::to_string).collect();
            output.write_line(&rendered);
            Ok(Value::Null)
        }
        "string" => match args {
            [value] => Ok(Value::String(value.to_string().into())),
            _ => Err(RuntimeError::ArityMismatch {
                name: "string".to_string(),
                expected: 1,
                found: args.len(),
                span,
            }),
        },
        _ => unreachable!("call() invoked for non-built-in name '{name}'"),
    }
}
