//! The per-call log event.

use serde::{Deserialize, Serialize};
use crate::{CallSite, Severity, Tag};

/// One logging call, captured before formatting.
///
/// Built fresh for every call and never mutated; it is dropped once the line
/// has been formatted and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Wall-clock time of the call, already rendered
    pub timestamp: String,
    /// Caller context
    pub site: CallSite,
    /// Bracketed tag
    pub tag: Tag,
    /// Message text, verbatim
    pub message: String,
}

impl LogEvent {
    /// Create an event for a severity-routed call.
    pub fn new(
        timestamp: impl Into<String>,
        site: CallSite,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self::tagged(timestamp, site, severity.tag(), message)
    }

    /// Create an event with an explicit tag.
    pub fn tagged(
        timestamp: impl Into<String>,
        site: CallSite,
        tag: Tag,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            site,
            tag,
            message: message.into(),
        }
    }

    /// Severity of the event, if it came through the router.
    pub fn severity(&self) -> Option<Severity> {
        match self.tag {
            Tag::Info => Some(Severity::Info),
            Tag::Warning => Some(Severity::Warning),
            Tag::Error => Some(Severity::Error),
            Tag::Fatal => Some(Severity::Fatal),
            Tag::SystemInfo => None,
        }
    }
}
