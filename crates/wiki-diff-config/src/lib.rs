//! Configuration and file management for wiki-diff-viewer
//!
//! This crate provides:
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)
//! - Config and cache directory paths

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, ParentResolution};
pub use config_file::load_config_file;
pub use paths::{app_config_path, cache_dir};
