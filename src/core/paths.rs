//! core::paths
//!
//! Centralized path routing for runner state and container-side locations.
//!
//! # Storage Layout
//!
//! All host-side state lives under the state directory (`~/.rit` by
//! default):
//! - `config.toml` - Runner configuration
//! - `env.json` - Current execution context
//! - `runs/<container-id>/` - Per-run scratch directories
//!
//! The state directory is also mounted into every container at
//! [`CONTAINER_STATE_DIR`].
//!
//! # Example
//!
//! ```
//! use formula_runner::core::paths::StatePaths;
//! use std::path::PathBuf;
//!
//! let paths = StatePaths::new(PathBuf::from("/home/ada/.rit"));
//! assert_eq!(paths.env_file(), PathBuf::from("/home/ada/.rit/env.json"));
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::ContainerId;

/// Name of the state directory under the user's home.
pub const STATE_DIR_NAME: &str = ".rit";

/// Environment file handed to the runtime via `--env-file`, relative to the
/// run's work directory.
pub const ENV_FILE: &str = ".env";

/// Where the formula's working directory is mounted inside the container.
pub const CONTAINER_PWD: &str = "/app";

/// Where the state directory is mounted inside the container.
pub const CONTAINER_STATE_DIR: &str = "/root/.rit";

/// Centralized path routing for runner state.
///
/// # Invariants
///
/// - Every run directory is `runs/<container-id>`, so distinct runs never
///   share an environment file.
/// - No code outside this module should compute `*.join(".rit")` paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    root: PathBuf,
}

impl StatePaths {
    /// Create paths rooted at an explicit state directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create paths rooted at `<home>/.rit`.
    pub fn for_home(home: &Path) -> Self {
        Self::new(home.join(STATE_DIR_NAME))
    }

    /// The state directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the runner configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path to the current execution context file.
    pub fn env_file(&self) -> PathBuf {
        self.root.join("env.json")
    }

    /// Directory holding per-run scratch directories.
    pub fn runs_dir(&self) -> PathBuf {
        self.root.join("runs")
    }

    /// Scratch directory for one run.
    pub fn run_dir(&self, id: &ContainerId) -> PathBuf {
        self.runs_dir().join(id.as_str())
    }
}
