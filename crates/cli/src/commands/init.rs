//! Initialize .licport.toml configuration

use anyhow::Result;
use colored::Colorize;
use licport_core::config::CONFIG_FILENAME;
use licport_core::PortalConfig;
use std::path::{Path, PathBuf};

/// Writes a default config file into `path` (default: current directory).
/// Returns the file's path; an existing file is left alone.
pub fn run(path: Option<&Path>) -> Result<PathBuf> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "  {} {} already exists at {}",
            "warn:".yellow(),
            CONFIG_FILENAME,
            config_path.display()
        );
        return Ok(config_path);
    }

    let config = PortalConfig::default();
    config.save(&config_path)?;

    eprintln!(
        "  {} Created {} at {}",
        "\u{2713}".green(),
        CONFIG_FILENAME,
        config_path.display()
    );
    eprintln!("\n  Set your backend URL and API key, then run:");
    eprintln!("    {}", "licport login <email>".bold());

    Ok(config_path)
}
