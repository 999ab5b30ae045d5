//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Runner Config
//!
//! Located at (in order of precedence):
//! 1. `$RIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/rit/config.toml`
//! 3. `~/.rit/config.toml`
//!
//! # Validation
//!
//! Config values are validated after parsing so a typo in the runtime
//! binary surfaces at load time rather than as a spawn failure mid-run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Runner configuration (user scope).
///
/// # Example
///
/// ```toml
/// runtime = "podman"
/// state_dir = "/var/lib/rit"
/// keep_images = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Container runtime binary (default: "docker")
    pub runtime: Option<String>,

    /// State directory override (default: `~/.rit`)
    pub state_dir: Option<PathBuf>,

    /// Keep built images after a run instead of removing them
    pub keep_images: Option<bool>,
}

impl RunnerConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(runtime) = &self.runtime {
            if runtime.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "runtime cannot be empty".into(),
                ));
            }
            if runtime.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidValue(format!(
                    "runtime '{}' must be a single binary name or path",
                    runtime
                )));
            }
        }

        if let Some(state_dir) = &self.state_dir {
            if state_dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "state_dir cannot be empty".into(),
                ));
            }
        }

        Ok(())
    }
}
