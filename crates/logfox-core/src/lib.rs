//! # LogFox Core
//!
//! Logger, broadcaster, viewer, configuration and host glue for the LogFox
//! logging add-on.
//!
//! This crate provides:
//!
//! - **Logging**: a severity router with automatic call-site capture
//!   ([`info!`], [`warning!`], [`error!`], [`fatal!`], [`system_info!`])
//! - **Formatting**: `[time] (N: source F: member L: line) [TAG] message`
//!   with plain, ANSI or BBCode color markup
//! - **Broadcasting**: synchronous fan-out of lines to subscribers in
//!   debug/interactive mode
//! - **Viewer**: a hotkey-toggled scrollback overlay
//! - **Fatal escalation**: state dump, blocking alert and shutdown
//! - **Configuration**: layered settings (defaults, file, set, environment)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use logfox_core::{info, Autoload, Logger, ProcessHost};
//! use logfox_core::config::Config;
//!
//! let settings = Config::load(Config::default_path()?)?.with_env_overrides()?.settings()?;
//!
//! let host = Arc::new(ProcessHost::default());
//! host.start();
//!
//! let logger = Arc::new(Logger::builder().settings(&settings).host(host).build()?);
//! let autoload = Autoload::start(settings, logger)?.install()?;
//!
//! info!(autoload.logger(), "boot");
//! # Ok::<(), logfox_core::LogFoxError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod macros;

pub mod autoload;
pub mod broadcast;
pub mod config;
pub mod format;
pub mod host;
pub mod log;
pub mod logger;
pub mod sink;
pub mod term;
pub mod time;
pub mod util;
pub mod viewer;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use autoload::Autoload;
pub use broadcast::Broadcaster;
pub use config::Config;
pub use host::{AlertMode, ProcessHost};
pub use logger::{EscalationState, Logger, LoggerBuilder};
pub use sink::{ConsoleSink, MemorySink};
pub use viewer::LogViewer;
pub use logfox_types::{
    CallSite, Host, Hotkey, LogEvent, LogFoxError, LogFoxSettings, Markup, Result, Severity,
    Sink, SubscriptionId, SystemDescriptors, Tag,
};

/// LogFox version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// LogFox application name
pub const APP_NAME: &str = "logfox";
