//! Configuration loading and discovery for `gridfill.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::GridfillConfig;
use crate::fill::{Algorithm, Connectivity};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "gridfill.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse gridfill.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub algorithm: Option<Algorithm>,
    pub connectivity: Option<Connectivity>,
    pub interval_ms: Option<u64>,
    pub batch: Option<usize>,
    pub padding: Option<i32>,
    pub mark_seed: Option<bool>,
    pub close_polygon: Option<bool>,
}

/// Find gridfill.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for gridfill.toml
/// 2. Check XDG_CONFIG_HOME/gridfill/gridfill.toml (or ~/.config/gridfill/gridfill.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find gridfill.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("gridfill").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find gridfill.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file (which must exist).
/// Otherwise uses `find_config()`, and falls back to the defaults when no
/// file is found.
pub fn load_config(path: Option<&Path>) -> Result<GridfillConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => {
            log::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
            Ok(default_config())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<GridfillConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: GridfillConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// The configuration used when no gridfill.toml is found.
pub fn default_config() -> GridfillConfig {
    GridfillConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut GridfillConfig, overrides: &CliOverrides) {
    if let Some(algorithm) = overrides.algorithm {
        config.fill.algorithm = algorithm;
    }
    if let Some(connectivity) = overrides.connectivity {
        config.fill.connectivity = connectivity;
    }
    if let Some(interval_ms) = overrides.interval_ms {
        config.animation.interval_ms = interval_ms;
    }
    if let Some(batch) = overrides.batch {
        config.animation.batch = batch;
    }
    if let Some(padding) = overrides.padding {
        config.canvas.padding = padding;
    }
    if let Some(mark_seed) = overrides.mark_seed {
        config.fill.mark_seed = mark_seed;
    }
    if let Some(close_polygon) = overrides.close_polygon {
        config.fill.close_polygon = close_polygon;
    }
}
