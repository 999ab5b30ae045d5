//! runner
//!
//! Containerized formula execution.
//!
//! # Modules
//!
//! - [`lifecycle`] - [`RunManager`]: prepare, build, execute, clean up
//! - [`builder`] - [`InvocationBuilder`]: runtime command line and environment
//! - [`input`] - Dispatch from [`InputType`] to an [`InputStrategy`]
//! - [`inputs`] - Built-in strategies (flags, stdin JSON, prompts)
//! - [`env_channel`] - The `--env-file` side channel
//! - [`docker`] - Default [`PreRunner`] / [`PostRunner`]
//! - [`invocation`] / [`process`] - Subprocess description and execution
//! - [`mock`] - Recording test doubles
//!
//! # Example
//!
//! ```
//! use formula_runner::context::StaticContextFinder;
//! use formula_runner::core::types::{Flags, FormulaDefinition, InputType};
//! use formula_runner::runner::env_channel::EnvChannel;
//! use formula_runner::runner::inputs::FlagInput;
//! use formula_runner::runner::mock::{sample_setup, MockPostRunner, MockPreRunner, MockProcessRunner};
//! use formula_runner::runner::{InputResolver, InvocationBuilder, RunManager};
//! use formula_runner::stream::MemoryFileStore;
//! use formula_runner::ui::terminal::FixedTerminal;
//!
//! let builder = InvocationBuilder::new(
//!     "docker",
//!     "/home/ada/.rit",
//!     FixedTerminal(false),
//!     InputResolver::new().with(InputType::Flag, FlagInput),
//!     StaticContextFinder::new("prod"),
//!     EnvChannel::new(MemoryFileStore::new()),
//! );
//! let post = MockPostRunner::new();
//! let process = MockProcessRunner::new();
//! let manager = RunManager::new(
//!     MockPreRunner::new(sample_setup()),
//!     post.clone(),
//!     builder,
//!     process.clone(),
//! );
//!
//! manager
//!     .run(&FormulaDefinition::new("demo/hello", "/formulas/hello"), InputType::Flag, false, &Flags::new())
//!     .unwrap();
//!
//! assert_eq!(process.invocations().len(), 1);
//! assert_eq!(post.calls().len(), 1);
//! ```
//!
//! [`InputType`]: crate::core::types::InputType

pub mod builder;
pub mod docker;
pub mod env_channel;
pub mod input;
pub mod inputs;
pub mod invocation;
pub mod lifecycle;
pub mod mock;
pub mod process;
mod traits;

pub use builder::{BuildError, InvocationBuilder};
pub use docker::{DockerPostRunner, DockerPreRunner};
pub use input::{InputError, InputResolver, InputStrategy};
pub use invocation::{Invocation, StreamBinding};
pub use lifecycle::{RunError, RunManager};
pub use process::{ExecError, ProcessRunner, SystemProcessRunner};
pub use traits::{CleanupError, PostRunner, PreRunner, SetupError};
