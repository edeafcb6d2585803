//! Common enumerations used throughout LogFox.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{LogFoxError, Result};
use crate::identifiers::Color;

/// Severity of a log call, ordered by increasing urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Something worth calling out that is not a failure
    Warning,
    /// A failure; the call stack is printed alongside
    Error,
    /// An unrecoverable failure; the process terminates afterwards
    Fatal,
}

impl Severity {
    /// All severities, least urgent first.
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// The tag rendered for this severity.
    pub fn tag(self) -> Tag {
        match self {
            Severity::Info => Tag::Info,
            Severity::Warning => Tag::Warning,
            Severity::Error => Tag::Error,
            Severity::Fatal => Tag::Fatal,
        }
    }

    /// Whether a call-stack snapshot is printed after the line.
    pub fn captures_stack(self) -> bool {
        self >= Severity::Error
    }
}

impl FromStr for Severity {
    type Err = LogFoxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "INFO" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            _ => Err(LogFoxError::Validation(format!("Invalid severity: {}", s))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().label())
    }
}

/// The bracketed tag of a formatted line.
///
/// Every [`Severity`] maps onto one tag; `SystemInfo` is only used by the
/// one-shot system descriptor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    /// `INFO`
    Info,
    /// `WARNING`
    Warning,
    /// `ERROR`
    Error,
    /// `FATAL`
    Fatal,
    /// `SYSTEM INFO`
    SystemInfo,
}

impl Tag {
    /// Text shown between the brackets.
    pub fn label(self) -> &'static str {
        match self {
            Tag::Info => "INFO",
            Tag::Warning => "WARNING",
            Tag::Error => "ERROR",
            Tag::Fatal => "FATAL",
            Tag::SystemInfo => "SYSTEM INFO",
        }
    }

    /// Display color used by rich sinks.
    pub fn color(self) -> Color {
        match self {
            Tag::Info => Color::rgb(0xA6, 0xE3, 0xA1),
            Tag::Warning => Color::rgb(0xF9, 0xE2, 0xAF),
            Tag::Error | Tag::Fatal => Color::rgb(0xF3, 0x8B, 0xA8),
            Tag::SystemInfo => Color::rgb(0x94, 0xE2, 0xD5),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How color is attached to a formatted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// No color at all
    #[default]
    Plain,
    /// ANSI escape codes for terminals
    Ansi,
    /// `[color=#RRGGBB]...[/color]` rich-text markup for in-engine labels
    BbCode,
}

impl FromStr for Markup {
    type Err = LogFoxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "none" => Ok(Markup::Plain),
            "ansi" | "terminal" => Ok(Markup::Ansi),
            "bbcode" | "rich" => Ok(Markup::BbCode),
            _ => Err(LogFoxError::Validation(format!("Invalid markup: {}", s))),
        }
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Markup::Plain => write!(f, "plain"),
            Markup::Ansi => write!(f, "ansi"),
            Markup::BbCode => write!(f, "bbcode"),
        }
    }
}
