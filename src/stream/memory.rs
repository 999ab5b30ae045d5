//! stream::memory
//!
//! In-memory [`KeyValueFileWriter`] for deterministic testing.
//!
//! # Design
//!
//! Files live in a map shared across clones, so a test can hand one clone
//! to the code under test and inspect the other. Failures can be injected
//! per operation to exercise error paths.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::traits::{KeyValueFileWriter, StreamError};

/// Which operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    /// Fail every `write`.
    Write,
    /// Fail every `append`.
    Append,
}

/// In-memory file store.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    fail_on: Option<FailOn>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given operation fail from now on.
    pub fn fail_on(&self, op: FailOn) {
        self.lock().fail_on = Some(op);
    }

    /// Seed a file, e.g. with stale content from an earlier run.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.lock().files.insert(path.into(), content.into());
    }

    /// Read a file back as UTF-8 text.
    pub fn read_to_string(&self, path: &Path) -> Option<String> {
        self.lock()
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Read a file back as lines (terminators stripped).
    pub fn lines(&self, path: &Path) -> Vec<String> {
        self.read_to_string(path)
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A panic in another test thread must not hide this one's state.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueFileWriter for MemoryFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<(), StreamError> {
        let mut inner = self.lock();
        if inner.fail_on == Some(FailOn::Write) {
            return Err(StreamError::Write {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"),
            });
        }
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn append(&self, path: &Path, content: &[u8]) -> Result<(), StreamError> {
        let mut inner = self.lock();
        if inner.fail_on == Some(FailOn::Append) {
            return Err(StreamError::Append {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"),
            });
        }
        match inner.files.get_mut(path) {
            Some(file) => {
                file.extend_from_slice(content);
                Ok(())
            }
            None => Err(StreamError::Append {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}
