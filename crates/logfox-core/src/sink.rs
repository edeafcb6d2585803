//! Console and in-memory sinks.

use logfox_types::{Markup, Sink};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Prints every line to standard output.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    markup: Markup,
}

impl ConsoleSink {
    /// Create a console sink rendering with `markup`.
    pub fn new(markup: Markup) -> Self {
        Self { markup }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(crate::term::default_markup())
    }
}

impl Sink for ConsoleSink {
    fn write_line(&self, line: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout must not take the logger down with it.
        let _ = writeln!(out, "{}", line);
    }

    fn write_diagnostic(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", text.trim_end());
    }

    fn markup(&self) -> Markup {
        self.markup
    }
}

/// Captures lines in memory.
///
/// Used by embedding hosts that render their own console, and by tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    markup: Markup,
    lines: Mutex<Vec<String>>,
    diagnostics: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink rendering with `markup`.
    pub fn new(markup: Markup) -> Self {
        Self {
            markup,
            ..Default::default()
        }
    }

    /// Formatted lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Diagnostic blocks written so far.
    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.lock().clone()
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }

    fn write_diagnostic(&self, text: &str) {
        self.diagnostics.lock().push(text.to_string());
    }

    fn markup(&self) -> Markup {
        self.markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_channels_apart() {
        let sink = MemorySink::new(Markup::BbCode);
        sink.write_line("one");
        sink.write_diagnostic("stack");
        sink.write_line("two");

        assert_eq!(sink.lines(), vec!["one", "two"]);
        assert_eq!(sink.diagnostics(), vec!["stack"]);
        assert_eq!(sink.markup(), Markup::BbCode);
    }
}
