//! Show the resolved configuration.

use anyhow::{Context, Result};
use colored::Colorize;
use logfox_core::config::Config;
use logfox_core::LogFoxSettings;

pub async fn execute(config: &Config, settings: &LogFoxSettings, path_only: bool) -> Result<()> {
    let path = config
        .file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<none>".to_string());

    if path_only {
        println!("{}", path);
        return Ok(());
    }

    let exists = config.file_path().is_some_and(|p| p.exists());

    println!("\n{}", "LogFox Configuration".cyan().bold());
    println!("{}", "=".repeat(50));
    println!("  File: {}{}", path.cyan(), if exists { "" } else { " (not found, defaults)" });
    println!();

    let yaml = serde_yaml::to_string(settings).context("Failed to render settings")?;
    print!("{}", yaml);

    Ok(())
}
