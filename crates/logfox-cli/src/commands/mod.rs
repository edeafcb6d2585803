//! CLI command implementations.

pub mod config;
pub mod demo;
pub mod fatal;
pub mod sysinfo;
pub mod version;
pub mod watch;

use crate::ui::TerminalHost;
use anyhow::Result;
use logfox_core::{LogFoxSettings, Logger, Markup};
use std::sync::Arc;

/// Start a terminal host and build a logger reporting to it.
pub(crate) fn start_logger(settings: &LogFoxSettings) -> Result<(Arc<TerminalHost>, Arc<Logger>)> {
    let host = Arc::new(TerminalHost::new());
    host.start();

    let logger = Logger::builder()
        .settings(settings)
        .host(host.clone())
        .broadcast_markup(Markup::Plain)
        .build()?;

    Ok((host, Arc::new(logger)))
}
