//! Run the start-up sequence and a few sample calls.

use anyhow::{Context, Result};
use colored::Colorize;
use logfox_core::{error, info, warning, Autoload, LogFoxSettings, Markup};

pub async fn execute(
    mut settings: LogFoxSettings,
    debug: bool,
    markup: Option<Markup>,
) -> Result<()> {
    if debug {
        settings.debug_mode = Some(true);
    }
    if markup.is_some() {
        settings.markup = markup;
    }

    let (host, logger) = super::start_logger(&settings)?;
    let autoload = Autoload::start(settings, logger)
        .context("Failed to start LogFox")?
        .install()?;
    let logger = autoload.logger();

    info!(logger, "Loading level {}", 1);
    warning!(logger, "Texture '{}' is missing, using fallback", "grass.png");
    error!(logger, "Save slot {} is corrupted", 3);

    if let Some(viewer) = autoload.viewer() {
        println!(
            "\n{} ({} lines, hotkey {})",
            "Viewer scrollback".cyan().bold(),
            viewer.lines().len(),
            viewer.hotkey()
        );
        println!("{}", "=".repeat(50));
        print!("{}", viewer.scrollback());
    }

    host.stop();
    Ok(())
}
