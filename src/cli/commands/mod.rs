//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each handler builds what it needs from configuration, calls into the
//! library, and returns an `anyhow::Result` for the binary to report.

mod completion;
mod run;

pub use completion::completion;
pub use run::{run, RunOptions};

use anyhow::Result;

use super::args::Command;
use crate::ui::output::Verbosity;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::Run {
            formula,
            name,
            input,
            flags,
            verbose,
        } => run(
            RunOptions {
                formula,
                name,
                input,
                flags,
                verbose,
            },
            verbosity,
        ),
        Command::Completion { shell } => completion(shell),
    }
}
