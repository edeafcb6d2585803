//! Seams between the logger and the environment it runs in.

use serde::{Deserialize, Serialize};
use crate::errors::Result;
use crate::Markup;

/// Destination for formatted lines.
///
/// The console sink prints; tests and embedding hosts capture.
pub trait Sink: Send + Sync {
    /// Write one formatted log line.
    fn write_line(&self, line: &str);

    /// Write a side-channel diagnostic block (call stacks, state dumps).
    ///
    /// Diagnostics are never part of a formatted line and are not broadcast.
    fn write_diagnostic(&self, text: &str);

    /// Color markup this sink understands.
    fn markup(&self) -> Markup;
}

/// Read-only descriptors of the machine and host the process runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDescriptors {
    /// Host application name, e.g. the engine
    pub host_name: String,
    /// Host application version string
    pub host_version: String,
    /// Operating system name
    pub platform: String,
    /// Machine model
    pub model: String,
    /// Processor brand string
    pub processor: String,
    /// Total memory in bytes
    pub total_memory_bytes: u64,
}

impl SystemDescriptors {
    /// Total memory in whole GiB, rounded down.
    pub fn total_memory_gib(&self) -> u64 {
        self.total_memory_bytes / 1024 / 1024 / 1024
    }
}

/// The host environment: engine, editor or plain process.
///
/// Implementers provide the host queries the logger needs and carry out the
/// irreversible steps of fatal escalation.
pub trait Host: Send + Sync {
    /// Whether the host runtime (main loop) exists.
    fn is_running(&self) -> bool;

    /// Whether this is a debug/interactive build.
    fn is_debug_build(&self) -> bool;

    /// Machine and host descriptors for the system-info line.
    fn system(&self) -> Result<SystemDescriptors>;

    /// Full state dump printed on fatal escalation.
    fn state_snapshot(&self) -> String;

    /// Show a user-visible alert and block until it is acknowledged.
    fn alert(&self, title: &str, message: &str);

    /// Request orderly process shutdown.
    fn quit(&self, code: i32);
}
