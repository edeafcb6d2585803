//! LogFox CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;
mod ui;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let outcome = match cli.load_config() {
        Ok(config) => match config.settings() {
            Ok(settings) => {
                init_logging(&cli, &settings);
                cli.execute(config, settings).await
            }
            Err(e) => Err(e.into()),
        },
        Err(e) => Err(e),
    };

    match outcome {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(cli: &Cli, settings: &logfox_core::LogFoxSettings) {
    let mut diagnostics = settings.diagnostics.clone();
    if cli.verbose {
        diagnostics.filter = "logfox=debug,logfox_core=debug".to_string();
    } else if cli.quiet {
        diagnostics.filter = "logfox=error,logfox_core=error".to_string();
    }

    // Diagnostics are optional; a failed install only loses them.
    let _ = logfox_core::log::init_from_config(&diagnostics);
}
