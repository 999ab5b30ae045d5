//! stream::traits
//!
//! File writer trait used for the environment side-channel.
//!
//! # Design
//!
//! The environment file is built line by line: the first line creates the
//! file, later lines are appended. The trait exposes exactly those three
//! operations so an in-memory implementation can stand in for the
//! filesystem in tests.
//!
//! # Example
//!
//! ```
//! use formula_runner::stream::{KeyValueFileWriter, MemoryFileStore};
//! use std::path::Path;
//!
//! let store = MemoryFileStore::new();
//! let path = Path::new("/run/.env");
//!
//! assert!(!store.exists(path));
//! store.write(path, b"A=1\n").unwrap();
//! store.append(path, b"B=2\n").unwrap();
//! assert_eq!(store.read_to_string(path).unwrap(), "A=1\nB=2\n");
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from file writer operations.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Failed to create or overwrite a file.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to append to an existing file.
    #[error("failed to append to '{path}': {source}")]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StreamError {
    /// Path of the file the failed operation targeted.
    pub fn path(&self) -> &Path {
        match self {
            StreamError::Write { path, .. } | StreamError::Append { path, .. } => path,
        }
    }
}

/// Create-or-append file writer.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait KeyValueFileWriter: Send + Sync {
    /// Check whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create the file (or truncate it) and write `content`.
    fn write(&self, path: &Path, content: &[u8]) -> Result<(), StreamError>;

    /// Append `content` to an existing file.
    ///
    /// Fails if the file does not exist.
    fn append(&self, path: &Path, content: &[u8]) -> Result<(), StreamError>;
}
