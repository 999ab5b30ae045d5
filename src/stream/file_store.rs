//! stream::file_store
//!
//! Filesystem-backed [`KeyValueFileWriter`].
//!
//! Files are created with 0600 permissions on Unix: the environment file
//! carries formula inputs, which may include passwords.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use super::traits::{KeyValueFileWriter, StreamError};

/// Writes directly to the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueFileWriter for FileStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<(), StreamError> {
        let err = |source| StreamError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(path).map_err(err)?;
        file.write_all(content).map_err(err)?;
        Ok(())
    }

    fn append(&self, path: &Path, content: &[u8]) -> Result<(), StreamError> {
        let err = |source| StreamError::Append {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new().append(true).open(path).map_err(err)?;
        file.write_all(content).map_err(err)?;
        Ok(())
    }
}
