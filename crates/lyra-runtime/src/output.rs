//! Where a running program's output goes.

use std::io::Write as _;

/// Destination for `print`/`println` output.
///
/// Routing output through a trait rather than writing directly to stdout
/// keeps the interpreter testable: tests and the language server embed a
/// buffering sink, while the CLI wires up one backed by the process's
/// standard output.
pub trait OutputSink {
    fn write(&mut self, text: &str);

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }
}

/// Writes to the process's standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
    }
}

/// Buffers output in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct BufferSink(pub String);

impl OutputSink for BufferSink {
    fn write(&mut self, text: &str) { self.0.push_str(text); }
}
