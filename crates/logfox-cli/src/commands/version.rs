//! Show version information.

use anyhow::Result;
use colored::Colorize;
use logfox_core::config::Config;
use logfox_core::logger::FATAL_EXIT_CODE;
use logfox_core::{term, Hotkey, LogFoxSettings};

pub async fn execute(verbose: bool) -> Result<()> {
    println!("{} {}", "LogFox".cyan().bold(), logfox_core::VERSION);

    if !verbose {
        return Ok(());
    }

    let defaults = LogFoxSettings::default();
    let config_path = Config::default_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "<no home directory>".to_string());

    println!("\n{}:", "Build".green().bold());
    println!("  Target: {}-{}", std::env::consts::ARCH, std::env::consts::OS);
    println!("  Debug build: {}", cfg!(debug_assertions));

    println!("\n{}:", "Defaults".green().bold());
    println!("  Console markup: {}", term::default_markup());
    println!("  Viewer hotkey: {}", Hotkey::default());
    println!("  Time format: {}", defaults.time_format);
    println!("  Fatal exit code: {}", FATAL_EXIT_CODE);
    println!("  Config file: {}", config_path);

    Ok(())
}
