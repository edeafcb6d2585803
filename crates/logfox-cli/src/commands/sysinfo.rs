//! Print the system information line.

use anyhow::{Context, Result};
use logfox_core::{system_info, LogFoxSettings};

pub async fn execute(settings: LogFoxSettings) -> Result<()> {
    let (host, logger) = super::start_logger(&settings)?;

    system_info!(logger).context("Failed to read system information")?;

    host.stop();
    Ok(())
}
