//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order, first match wins:
//! 1. `$RIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/rit/config.toml`
//! 3. `~/.rit/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use formula_runner::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Runtime: {}", config.runtime());
//! println!("State dir: {}", config.state_paths().unwrap().root().display());
//! ```

pub mod schema;

pub use schema::RunnerConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::paths::StatePaths;

/// Default container runtime binary.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration.
///
/// Accessor methods apply defaults for unset values.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration file contents
    pub runner: RunnerConfig,
    /// Path the configuration was loaded from (if any)
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let runner: RunnerConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        runner.validate()?;

        Ok(Config {
            runner,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file in search order.
    fn locate() -> Option<PathBuf> {
        // 1. Check $RIT_CONFIG
        if let Ok(path) = std::env::var("RIT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/rit/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("rit/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.rit/config.toml
        let path = StatePaths::for_home(&dirs::home_dir()?).config_file();
        path.exists().then_some(path)
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the container runtime binary.
    ///
    /// Defaults to "docker" if not configured.
    pub fn runtime(&self) -> &str {
        self.runner.runtime.as_deref().unwrap_or(DEFAULT_RUNTIME)
    }

    /// Check if built images should be kept after a run.
    ///
    /// Defaults to `false` if not configured.
    pub fn keep_images(&self) -> bool {
        self.runner.keep_images.unwrap_or(false)
    }

    /// Resolve the state directory layout.
    ///
    /// Uses `state_dir` when configured, otherwise `~/.rit`.
    pub fn state_paths(&self) -> Result<StatePaths, ConfigError> {
        match &self.runner.state_dir {
            Some(dir) => Ok(StatePaths::new(dir.clone())),
            None => {
                let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
                Ok(StatePaths::for_home(&home))
            }
        }
    }

    /// Get the path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
