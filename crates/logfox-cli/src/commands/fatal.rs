//! Log a fatal error and let the escalation terminate the process.

use anyhow::Result;
use logfox_core::{fatal, EscalationState, LogFoxSettings};

pub async fn execute(settings: LogFoxSettings, message: &str) -> Result<()> {
    let (_host, logger) = super::start_logger(&settings)?;

    fatal!(logger, "{}", message);

    // Only reached when the host did not exit.
    if logger.state() == EscalationState::Terminated {
        std::process::exit(logfox_core::logger::FATAL_EXIT_CODE);
    }
    Ok(())
}
