//! stream
//!
//! File writer abstraction for the environment side-channel.
//!
//! # Architecture
//!
//! Writes go through the [`KeyValueFileWriter`] trait, which has two
//! implementations:
//!
//! - [`FileStore`]: Writes to the host filesystem (default)
//! - [`MemoryFileStore`]: Keeps files in memory, for tests
//!
//! # Security
//!
//! The environment file may carry secret formula inputs. [`FileStore`]
//! creates it owner-only (0600) on Unix, and error messages never include
//! file contents.

mod file_store;
pub mod memory;
mod traits;

pub use file_store::FileStore;
pub use memory::MemoryFileStore;
pub use traits::{KeyValueFileWriter, StreamError};
