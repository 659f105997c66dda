//! Source position tracking and diagnostics for the Lyra language.
//!
//! This crate provides the fundamental types shared by every later stage of the
//! pipeline: source positions and spans ([`span`]), and the diagnostics sink used
//! by the lexer, parser, type checker, and interpreter to report problems without
//! aborting early ([`diagnostics`]).
//!
//! The core operates on a single in-memory source string; there is no multi-file
//! manager here; loading source from disk is a CLI concern.

pub mod diagnostics;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticSink};
pub use span::{Position, Span};
