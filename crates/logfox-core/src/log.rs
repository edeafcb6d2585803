//! The add-on's own diagnostics.
//!
//! LogFox reports dropped calls, subscriber registration and escalation
//! progress through `tracing`. These helpers install a subscriber writing to
//! standard error so diagnostics never interleave with formatted log lines on
//! standard output.

use logfox_types::config::{DiagnosticsConfig, LogFormat};
use logfox_types::{LogFoxError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const FILTER_ENV: &str = "LOGFOX_LOG";

/// Initialize diagnostics with the default configuration.
pub fn init_default() -> Result<()> {
    init_from_config(&DiagnosticsConfig::default())
}

/// Initialize diagnostics from configuration.
///
/// Fails if a global subscriber is already installed.
pub fn init_from_config(config: &DiagnosticsConfig) -> Result<()> {
    let filter = env_filter(&config.filter);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| LogFoxError::Other(format!("Failed to initialize diagnostics: {}", e)))
}

/// Build the filter: `LOGFOX_LOG`, then `RUST_LOG`, then `fallback`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}
