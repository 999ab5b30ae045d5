//! runner::env_channel
//!
//! Side-channel file read by the runtime's `--env-file` option.
//!
//! # Design
//!
//! Pairs are written one line at a time, `KEY=VALUE\n`: the first line
//! creates the file when it is missing, every later line is appended. An
//! existing file is appended to, never truncated. A failure stops the
//! write where it happened; lines already written stay.
//!
//! # Example
//!
//! ```
//! use formula_runner::runner::env_channel::EnvChannel;
//! use formula_runner::stream::MemoryFileStore;
//! use std::path::Path;
//!
//! let store = MemoryFileStore::new();
//! let channel = EnvChannel::new(store.clone());
//! let target = Path::new("/run/.env");
//!
//! channel.write_all(&["A=1".to_string(), "B=2".to_string()], target).unwrap();
//! assert_eq!(store.lines(target), ["A=1", "B=2"]);
//! ```

use std::path::Path;

use tracing::debug;

use crate::context::ExecutionContext;
use crate::core::paths::CONTAINER_PWD;
use crate::stream::{KeyValueFileWriter, StreamError};

/// Marks the process as running inside the container.
pub const DOCKER_EXECUTION: &str = "DOCKER_EXECUTION";
/// Working directory inside the container.
pub const CURRENT_PWD: &str = "CURRENT_PWD";
/// Current context, legacy name.
pub const ENV: &str = "ENV";
/// Current context.
pub const CONTEXT: &str = "CONTEXT";
/// Whether the formula should log verbosely.
pub const VERBOSE_MODE: &str = "VERBOSE_MODE";

/// The variables every containerized run receives, in the order they are
/// added.
pub fn runtime_vars(context: &ExecutionContext, verbose: bool) -> [(&'static str, String); 5] {
    [
        (DOCKER_EXECUTION, "true".to_string()),
        (CURRENT_PWD, CONTAINER_PWD.to_string()),
        (ENV, context.current.clone()),
        (CONTEXT, context.current.clone()),
        (VERBOSE_MODE, verbose.to_string()),
    ]
}

/// Writes `KEY=VALUE` lines through a [`KeyValueFileWriter`].
pub struct EnvChannel {
    writer: Box<dyn KeyValueFileWriter>,
}

impl EnvChannel {
    pub fn new(writer: impl KeyValueFileWriter + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Write every pair to `target`, creating it if needed.
    pub fn write_all(&self, pairs: &[String], target: &Path) -> Result<(), StreamError> {
        debug!(path = %target.display(), count = pairs.len(), "writing env file");
        for pair in pairs {
            let line = format!("{}\n", pair);
            if self.writer.exists(target) {
                self.writer.append(target, line.as_bytes())?;
            } else {
                self.writer.write(target, line.as_bytes())?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for EnvChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvChannel").finish_non_exhaustive()
    }
}
