//! Alternate-screen guard and the console buffer behind it.

use crossterm::{cursor, execute, terminal};
use logfox_core::{Markup, Sink};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Raw mode plus alternate screen, left on drop.
pub struct Screen;

impl Screen {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        ACTIVE.store(true, Ordering::Release);
        Ok(Screen)
    }

    pub fn size() -> (usize, usize) {
        terminal::size()
            .map(|(w, h)| (w as usize, h as usize))
            .unwrap_or((80, 24))
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        restore();
    }
}

/// Leave the alternate screen if it is active.
pub fn restore() {
    if ACTIVE.swap(false, Ordering::AcqRel) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Console sink that holds lines while the screen is active.
///
/// Held lines are shown by the watch loop and printed on [`ScreenSink::detach`].
/// Only the newest [`ScreenSink::HELD_LINES`] are kept; the viewer holds the
/// full history.
pub struct ScreenSink {
    markup: Markup,
    held: Mutex<VecDeque<String>>,
    holding: AtomicBool,
}

impl ScreenSink {
    pub const HELD_LINES: usize = 1024;

    pub fn new(markup: Markup) -> Self {
        Self {
            markup,
            held: Mutex::new(VecDeque::new()),
            holding: AtomicBool::new(true),
        }
    }

    /// The newest `count` held lines.
    pub fn tail(&self, count: usize) -> Vec<String> {
        let held = self.held.lock();
        held.iter().skip(held.len().saturating_sub(count)).cloned().collect()
    }

    /// Stop holding and print everything held so far.
    pub fn detach(&self) {
        self.holding.store(false, Ordering::Release);
        let held = std::mem::take(&mut *self.held.lock());
        let mut out = io::stdout().lock();
        for line in held {
            let _ = writeln!(out, "{}", line);
        }
        let _ = out.flush();
    }

    fn print(&self, text: &str) -> bool {
        if self.holding.load(Ordering::Acquire) {
            return false;
        }
        let _ = writeln!(io::stdout().lock(), "{}", text.trim_end());
        true
    }

    fn hold<I: IntoIterator<Item = String>>(&self, lines: I) {
        let mut held = self.held.lock();
        held.extend(lines);
        let excess = held.len().saturating_sub(Self::HELD_LINES);
        held.drain(..excess);
    }
}

impl Sink for ScreenSink {
    fn write_line(&self, line: &str) {
        if !self.print(line) {
            self.hold([line.to_string()]);
        }
    }

    // Stack frames keep their indentation.
    fn write_diagnostic(&self, text: &str) {
        if !self.print(text) {
            self.hold(text.lines().map(str::to_string));
        }
    }

    fn markup(&self) -> Markup {
        self.markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_sink_holds_until_detached() {
        let sink = ScreenSink::new(Markup::Plain);
        sink.write_line("one");
        sink.write_diagnostic("stack\n  frame\n");
        sink.write_line("two");

        assert_eq!(sink.tail(2), vec!["  frame", "two"]);
        assert_eq!(sink.tail(10), vec!["one", "stack", "  frame", "two"]);

        sink.detach();
        assert!(sink.tail(10).is_empty());
        sink.write_line("three");
        assert!(sink.tail(10).is_empty());
    }

    #[test]
    fn test_screen_sink_keeps_newest_lines_only() {
        let sink = ScreenSink::new(Markup::Plain);
        for i in 0..ScreenSink::HELD_LINES + 10 {
            sink.write_line(&format!("line {}", i));
        }

        let held = sink.tail(usize::MAX);
        assert_eq!(held.len(), ScreenSink::HELD_LINES);
        assert_eq!(held[0], "line 10");
        assert_eq!(sink.tail(1), vec![format!("line {}", ScreenSink::HELD_LINES + 9)]);
    }
}
