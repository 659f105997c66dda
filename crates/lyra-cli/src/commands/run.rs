//! `lyra run` — lex, parse, type-check, and execute a source file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use lyra_source::DiagnosticSink;

/// Runs a Lyra source file, writing program output to stdout and
/// diagnostics to stderr.
///
/// Exits the process with a non-zero status if type checking or
/// interpretation reports an error; returns normally otherwise.
pub fn execute(file: PathBuf, verbose: bool) -> Result<()> {
    let source = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    if verbose {
        log::info!("running {} ({} bytes)", file.display(), source.len());
    }

    let mut diagnostics = DiagnosticSink::new();
    let program = lyra_parser::parse(&source, &mut diagnostics);
    lyra_analyzer::check(&program, &mut diagnostics);

    if diagnostics.had_error() {
        eprint!("{}", diagnostics.render(&source));
        std::process::exit(1);
    }

    let mut output = lyra_runtime::StdoutSink;
    if let Err(err) = lyra_runtime::Interpreter::interpret(&program, &mut output) {
        diagnostics.report(err.into());
        eprint!("{}", diagnostics.render(&source));
        std::process::exit(1);
    }

    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render(&source));
    }

    Ok(())
}
