//! Terminal utilities: color markup and text layout.

use colored::Colorize;
use logfox_types::{Color, Markup};
use std::io::{self, IsTerminal};

/// Check if we're running in a controlling terminal.
pub fn in_controlling_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Markup picked when the configuration does not name one.
pub fn default_markup() -> Markup {
    if in_controlling_terminal() {
        Markup::Ansi
    } else {
        Markup::Plain
    }
}

/// Attach `color` to `text` in the given markup.
pub fn paint(text: &str, color: Color, markup: Markup) -> String {
    match markup {
        Markup::Plain => text.to_string(),
        Markup::Ansi => text.truecolor(color.r, color.g, color.b).bold().to_string(),
        Markup::BbCode => format!("[color={}]{}[/color]", color, text),
    }
}

/// Wrap text to fit terminal width.
///
/// Words longer than `width` are kept whole on their own line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if !current_line.is_empty() && current_line.len() + word.len() + 1 > width {
            lines.push(std::mem::take(&mut current_line));
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Color = Color::rgb(0xA6, 0xE3, 0xA1);

    #[test]
    fn test_paint_plain_and_bbcode() {
        assert_eq!(paint("INFO", GREEN, Markup::Plain), "INFO");
        assert_eq!(paint("INFO", GREEN, Markup::BbCode), "[color=#A6E3A1]INFO[/color]");
    }

    #[test]
    fn test_paint_ansi_keeps_text() {
        assert!(paint("INFO", GREEN, Markup::Ansi).contains("INFO"));
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(wrap_text("   ", 10).is_empty());
    }
}
