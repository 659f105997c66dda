//! Runtime values, environments, and the tree-walking evaluator for Lyra.
//!
//! [`Interpreter::interpret`] is the sole entry point: it executes a parsed
//! program statement by statement, writing `print`/`println` output to an
//! [`OutputSink`] and stopping at the first [`RuntimeError`]. Callers
//! should run [`lyra_analyzer::check`] first; this crate doesn't depend on
//! the type checker and will happily execute (and fail loudly on) a
//! program that was never checked.

mod builtins;
mod environment;
mod error;
mod interpreter;
mod output;
mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use interpreter::Interpreter;
pub use output::{BufferSink, OutputSink, StdoutSink};
pub use value::Value;
