//! core
//!
//! Core domain types, schemas, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ContainerId, InputType, Mount, Setup, etc.
//! - [`formula`] - Per-formula `config.json` schema
//! - [`config`] - Runner configuration schema and loading
//! - [`paths`] - Centralized path routing for runner state
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at construction time
//! - Schemas are strict (`deny_unknown_fields`)

pub mod config;
pub mod formula;
pub mod paths;
pub mod types;
