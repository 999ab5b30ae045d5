//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize tracing
//! - Wire real collaborators and delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Everything that decides how a formula runs lives
//! in [`crate::runner`]; handlers only assemble it from configuration.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use anyhow::Result;

use crate::observability;
use crate::runner::RunError;
use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    observability::init_tracing(verbosity);

    commands::dispatch(cli.command, verbosity)
}

/// Process exit code for a failed command.
///
/// A formula that exited non-zero passes its own code through; every other
/// failure is 1.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<RunError>()
        .map(RunError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
