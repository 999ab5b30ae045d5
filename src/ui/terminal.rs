//! ui::terminal
//!
//! Terminal detection as an injectable capability.
//!
//! Whether stdout is a TTY decides if the container gets a pseudo-terminal
//! (`-it`). Reading it through [`TerminalProbe`] keeps that decision
//! testable with a fixed answer.

use std::io::IsTerminal;

/// Answers "is standard output an interactive terminal?".
pub trait TerminalProbe: Send + Sync {
    fn stdout_is_terminal(&self) -> bool;
}

/// Checks the real process stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdTerminal;

impl TerminalProbe for StdTerminal {
    fn stdout_is_terminal(&self) -> bool {
        std::io::stdout().is_terminal()
    }
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTerminal(pub bool);

impl TerminalProbe for FixedTerminal {
    fn stdout_is_terminal(&self) -> bool {
        self.0
    }
}
