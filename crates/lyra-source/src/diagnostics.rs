//! Diagnostic collection and rendering.
//!
//! Every later stage of the pipeline (lexer, parser, type checker, interpreter)
//! reports problems into a shared [`DiagnosticSink`] instead of aborting. The
//! sink caps how many diagnostics it keeps in full, and tallies the rest as a
//! suppressed count reported in a trailing footer.

use std::fmt;

use crate::span::Span;

/// The default number of diagnostics a sink renders before suppressing the rest.
pub const DEFAULT_CAP: usize = 5;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    /// A problem that halts the pipeline before the next stage runs.
    Error,
    /// A problem that does not, by itself, halt the pipeline.
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single reported problem, carrying the span it occurred at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the diagnostic.
    pub level: DiagnosticLevel,
    /// Human-readable description.
    pub message: String,
    /// Location the diagnostic points at.
    pub span: Span,
}

impl Diagnostic {
    /// Creates an error-level diagnostic.
    #[must_use]
    pub const fn error(message: String, span: Span) -> Self {
        Self { level: DiagnosticLevel::Error, message, span }
    }

    /// Creates a warning-level diagnostic.
    #[must_use]
    pub const fn warning(message: String, span: Span) -> Self {
        Self { level: DiagnosticLevel::Warning, message, span }
    }

    /// Renders this diagnostic as the three-line block described by the
    /// diagnostics format: a header, the offending source line, and a caret
    /// underline.
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let start = self.span.start;
        let end = self.span.end;
        let line_text = self.span.start_line(source);

        let underline_len = (end.column as isize - start.column as isize).max(1) as usize;
        let mut out = String::new();
        out.push_str(&format!("[{}:{}] {}: {}\n", start.line, start.column, self.level, self.message));
        out.push_str(&format!("{} | {line_text}\n", start.line));
        out.push_str(&format!(
            "{}{} <- Error Here\n",
            " ".repeat(format!("{} | ", start.line).len() + start.column - 1),
            "^".repeat(underline_len),
        ));
        out
    }
}

/// Collects diagnostics across the pipeline, capping how many are kept in
/// full and counting the rest as suppressed.
#[derive(Debug, Clone)]
pub struct DiagnosticSink {
    cap: usize,
    diagnostics: Vec<Diagnostic>,
    suppressed: usize,
}

impl Default for DiagnosticSink {
    fn default() -> Self { Self::new() }
}

impl DiagnosticSink {
    /// Creates a sink with the default cap of [`DEFAULT_CAP`] visible
    /// diagnostics.
    #[must_use]
    pub const fn new() -> Self { Self::with_cap(DEFAULT_CAP) }

    /// Creates a sink that keeps at most `cap` diagnostics in full.
    #[must_use]
    pub const fn with_cap(cap: usize) -> Self { Self { cap, diagnostics: Vec::new(), suppressed: 0 } }

    /// Records a diagnostic, or counts it as suppressed once the cap is reached.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.len() < self.cap {
            self.diagnostics.push(diagnostic);
        } else {
            self.suppressed += 1;
        }
    }

    /// Records an error-level diagnostic at `span`.
    pub fn error(&mut self, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::error(message.into(), span));
    }

    /// Records a warning-level diagnostic at `span`.
    pub fn warning(&mut self, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::warning(message.into(), span));
    }

    /// Returns true if at least one error-level diagnostic was reported
    /// (including ones that were then suppressed by the cap).
    #[must_use]
    pub fn had_error(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == DiagnosticLevel::Error)
    }

    /// Returns the diagnostics kept in full.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    /// Returns true if no diagnostics (visible or suppressed) were reported.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.diagnostics.is_empty() && self.suppressed == 0 }

    /// Total number of diagnostics reported, visible or suppressed.
    #[must_use]
    pub fn total(&self) -> usize { self.diagnostics.len() + self.suppressed }

    /// Renders every visible diagnostic, followed by a suppressed-count footer
    /// if the cap was exceeded.
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            out.push_str(&diagnostic.render(source));
            out.push('\n');
        }
        if self.suppressed > 0 {
            out.push_str(&format!(
                "Showing {} of {} errors. Fix these and recompile to see more.\n",
                self.diagnostics.len(),
                self.total()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn span_at(line: usize, col_start: usize, col_end: usize) -> Span {
        let offset = col_start - 1;
        Span::new(
            Position::new(line, col_start, offset, 0),
            Position::new(line, col_end, col_end - 1, 0),
        )
    }

    #[test]
    fn caps_visible_diagnostics_and_counts_the_rest() {
        let mut sink = DiagnosticSink::with_cap(2);
        for i in 0..5 {
            sink.error(format!("error {i}"), span_at(1, 1, 1));
        }
        assert_eq!(sink.diagnostics().len(), 2);
        assert_eq!(sink.total(), 5);
        assert!(sink.had_error());
    }

    #[test]
    fn render_includes_header_and_caret() {
        let mut sink = DiagnosticSink::new();
        sink.error("Unexpected Character '$'", span_at(1, 5, 6));
        let rendered = sink.render("let $ = 1;");
        assert!(rendered.contains("[1:5] Error: Unexpected Character '$'"));
        assert!(rendered.contains("1 | let $ = 1;"));
        assert!(rendered.contains("<- Error Here"));
    }

    #[test]
    fn caret_underline_width_matches_the_half_open_span_length() {
        // `let` spans columns 1..4 exclusive: 3 bytes, 3 carets, not 4.
        let diagnostic = Diagnostic::error("bad keyword".to_string(), span_at(1, 1, 4));
        let rendered = diagnostic.render("let x = 1;");
        let caret_line = rendered.lines().nth(2).expect("caret line");
        assert_eq!(caret_line.matches('^').count(), 3);
    }
}
