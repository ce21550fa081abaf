//! Configuration and cache directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/wiki-diff-viewer/`, `~/.cache/wiki-diff-viewer/`
//! - macOS: `~/Library/Application Support/wiki-diff-viewer/`, `~/Library/Caches/wiki-diff-viewer/`
//! - Windows: `%APPDATA%\wiki-diff-viewer\`, `%LOCALAPPDATA%\wiki-diff-viewer\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "wiki-diff-viewer";

/// Get the application cache directory (log files live here), creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Get path to app config file
///
/// Only computes the location; nothing is created on disk.
pub fn app_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}
