//! Configuration module for SearchChat-RS
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "SEARCHCHAT_SETTINGS_PATH";

/// Candidate settings locations, in lookup order
fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/searchchat/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("searchchat-rs/settings.yml"));
    }
    paths
}

/// Load settings from the first settings file found, or defaults,
/// then apply environment overrides. Returns the file used, if any.
pub fn load() -> Result<(Settings, Option<PathBuf>)> {
    let explicit = std::env::var(SETTINGS_PATH_VAR).ok().map(PathBuf::from);

    let found = explicit
        .into_iter()
        .chain(default_paths())
        .find(|p| p.exists());

    let mut settings = match found {
        Some(ref path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    settings.merge_env();
    Ok((settings, found))
}
