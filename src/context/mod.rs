//! context
//!
//! Discovery of the active execution context.
//!
//! # Design
//!
//! The current context ("dev", "prod", ...) is chosen outside this crate
//! and persisted to `<state>/env.json`:
//!
//! ```json
//! { "current_env": "prod" }
//! ```
//!
//! The runner reads it once per run through the [`ContextFinder`] trait
//! and forwards it into the container. A missing file means "no context"
//! and yields an empty identity rather than an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from context discovery.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to read context file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse context file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

/// Snapshot of the active execution context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Current context identity; empty when none is selected.
    #[serde(rename = "current_env", default)]
    pub current: String,
}

impl ExecutionContext {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }
}

/// Source of the current execution context.
pub trait ContextFinder: Send + Sync {
    /// Take a snapshot of the current context.
    fn find(&self) -> Result<ExecutionContext, ContextError>;
}

/// Reads the current context from a JSON file.
#[derive(Debug, Clone)]
pub struct FileContextFinder {
    path: PathBuf,
}

impl FileContextFinder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContextFinder for FileContextFinder {
    fn find(&self) -> Result<ExecutionContext, ContextError> {
        if !self.path.exists() {
            return Ok(ExecutionContext::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| ContextError::Read {
            path: self.path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(ExecutionContext::default());
        }

        serde_json::from_str(&contents).map_err(|e| ContextError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

/// Always returns the same context.
#[derive(Debug, Clone, Default)]
pub struct StaticContextFinder {
    context: ExecutionContext,
}

impl StaticContextFinder {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            context: ExecutionContext::new(current),
        }
    }
}

impl ContextFinder for StaticContextFinder {
    fn find(&self) -> Result<ExecutionContext, ContextError> {
        Ok(self.context.clone())
    }
}
