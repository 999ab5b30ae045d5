//! runner::traits
//!
//! Preparation and cleanup collaborators.
//!
//! # Design
//!
//! The orchestrator does not know how a run's working directory, image or
//! container identity come to exist; it asks a [`PreRunner`] for a
//! [`Setup`] and hands that same setup back to a [`PostRunner`] when the
//! run is over.
//!
//! A `PreRunner` that fails must leave nothing behind: the orchestrator
//! only schedules cleanup after preparation succeeds.

use thiserror::Error;

use crate::core::formula::FormulaConfigError;
use crate::core::types::{ContainerId, FormulaDefinition, Setup};

use super::process::ExecError;

/// Errors from preparing a run.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The formula configuration could not be loaded.
    #[error("formula '{formula}': {source}")]
    Config {
        formula: String,
        source: FormulaConfigError,
    },

    /// The formula directory does not exist or is unusable.
    #[error("formula '{formula}' not found at '{path}'")]
    NotFound { formula: String, path: String },

    /// Filesystem preparation failed.
    #[error("failed to prepare run directory: {0}")]
    Io(#[from] std::io::Error),

    /// Building the formula image failed.
    #[error("failed to build image for formula '{formula}': {source}")]
    ImageBuild { formula: String, source: ExecError },

    /// Any other preparation failure.
    #[error("{0}")]
    Other(String),
}

/// Error from tearing down a run.
///
/// Carries every failure encountered so one cleanup step failing does not
/// hide another.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cleanup of '{container_id}' failed: {}", .failures.join("; "))]
pub struct CleanupError {
    pub container_id: ContainerId,
    pub failures: Vec<String>,
}

impl CleanupError {
    pub fn new(container_id: ContainerId, failure: impl Into<String>) -> Self {
        Self {
            container_id,
            failures: vec![failure.into()],
        }
    }
}

/// Prepares a run.
pub trait PreRunner: Send + Sync {
    fn pre_run(&self, definition: &FormulaDefinition) -> Result<Setup, SetupError>;
}

/// Tears a run down.
pub trait PostRunner: Send + Sync {
    /// Reclaim everything `setup` allocated. `force_remove` also removes
    /// the container image.
    fn post_run(&self, setup: &Setup, force_remove: bool) -> Result<(), CleanupError>;
}
