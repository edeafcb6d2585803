//! Terminal integration: host, alternate screen and buffered console.

pub mod host;
pub mod screen;

pub use host::TerminalHost;
pub use screen::{Screen, ScreenSink};
