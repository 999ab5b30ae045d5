//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts for formula inputs
//! - [`output`] - Output formatting and diagnostics
//! - [`terminal`] - Terminal detection
//!
//! # Design
//!
//! All runner-originated output and prompts go through this module.
//! Prompts and diagnostics use stderr so they never mix with the output of
//! the formula itself.

pub mod output;
pub mod prompts;
pub mod terminal;
