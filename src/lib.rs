//! formula-runner - run formulas inside throwaway containers
//!
//! A formula is a directory with a container build file and an optional
//! `config.json` declaring its inputs and extra volumes. Running one means
//! building its image, collecting inputs, starting a container that shares
//! the caller's working directory and terminal, and tearing everything down
//! afterwards.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, wires collaborators)
//! - [`runner`] - Lifecycle orchestration, invocation building, input dispatch
//! - [`core`] - Domain types, formula/runner configuration, state paths
//! - [`context`] - Discovery of the active execution context
//! - [`stream`] - File writer abstraction for the env side channel
//! - [`ui`] - Output, prompts and terminal detection
//! - [`observability`] - Tracing setup
//!
//! # Invariants
//!
//! 1. Cleanup runs exactly once for every run whose preparation succeeded
//! 2. A cleanup failure never replaces the run's own result
//! 3. The container name and the image it runs are the same identity

pub mod cli;
pub mod context;
pub mod core;
pub mod observability;
pub mod runner;
pub mod stream;
pub mod ui;
