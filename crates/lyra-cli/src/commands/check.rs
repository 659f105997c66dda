//! `lyra check` — lex, parse, and type-check a source file without running it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use lyra_source::DiagnosticSink;

/// Type-checks a Lyra source file and reports diagnostics to stderr.
///
/// Exits the process with a non-zero status if any error-level diagnostic
/// was reported.
pub fn execute(file: PathBuf, verbose: bool) -> Result<()> {
    let source = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut diagnostics = DiagnosticSink::new();
    let program = lyra_parser::parse(&source, &mut diagnostics);
    lyra_analyzer::check(&program, &mut diagnostics);

    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render(&source));
    }

    if diagnostics.had_error() {
        std::process::exit(1);
    }

    if verbose {
        println!("{}: {} top-level statement(s), no errors", file.display(), program.len());
    }

    Ok(())
}
