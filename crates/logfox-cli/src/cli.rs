//! CLI structure and command definitions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use logfox_core::config::Config;
use logfox_core::{LogFoxSettings, Markup};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logfox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Caller-aware logging with an in-host log viewer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ~/.logfox/config)
    #[arg(short, long, global = true, env = "LOGFOX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report diagnostics errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the add-on, emit sample lines and print the viewer scrollback
    Demo {
        /// Force debug mode so the viewer attaches
        #[arg(short, long)]
        debug: bool,

        /// Console markup (plain, ansi, bbcode)
        #[arg(short, long)]
        markup: Option<Markup>,
    },

    /// Interactive session with a hotkey-toggled log overlay
    Watch {
        /// Milliseconds between simulated frames
        #[arg(short, long, default_value_t = 100)]
        interval_ms: u64,
    },

    /// Print the system information line
    Sysinfo,

    /// Log a fatal error and terminate
    Fatal {
        /// Message shown in the log line and the alert
        message: String,
    },

    /// Show the resolved configuration
    Config {
        /// Print the configuration file path instead
        #[arg(long)]
        path: bool,
    },

    /// Show version information (detailed with --verbose)
    Version,
}

impl Cli {
    /// Load the layered configuration named on the command line.
    pub fn load_config(&self) -> Result<Config> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Config::default_path()?,
        };

        let config = Config::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        Ok(config.with_env_overrides()?)
    }

    pub async fn execute(&self, config: Config, settings: LogFoxSettings) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::Demo { debug, markup } => {
                demo::execute(settings, *debug, *markup).await
            }
            Commands::Watch { interval_ms } => {
                watch::execute(settings, *interval_ms).await
            }
            Commands::Sysinfo => {
                sysinfo::execute(settings).await
            }
            Commands::Fatal { message } => {
                fatal::execute(settings, message).await
            }
            Commands::Config { path } => {
                config::execute(&config, &settings, *path).await
            }
            Commands::Version => {
                version::execute(self.verbose).await
            }
        }
    }
}
