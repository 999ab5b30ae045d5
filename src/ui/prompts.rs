//! ui::prompts
//!
//! Interactive prompts on the controlling terminal.
//!
//! # Design
//!
//! Prompts go through the [`Prompter`] trait so input strategies can be
//! driven by a scripted prompter in tests. [`TerminalPrompter`] writes
//! questions to stderr (stdout belongs to the formula) and reads answers
//! from stdin; masked input uses `rpassword`.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Asks the user for values.
pub trait Prompter: Send + Sync {
    /// Prompt for text input, returning `default` on an empty answer.
    fn text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError>;

    /// Prompt for masked input (e.g., passwords, tokens).
    fn password(&self, message: &str) -> Result<String, PromptError>;

    /// Prompt for confirmation (yes/no).
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError>;
}

/// Prompts on the process's own terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    fn read_line(&self, message: &str) -> Result<String, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }

        let mut stderr = io::stderr();
        write!(stderr, "{}", message).map_err(|e| PromptError::IoError(e.to_string()))?;
        stderr
            .flush()
            .map_err(|e| PromptError::IoError(e.to_string()))?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| PromptError::IoError(e.to_string()))?;
        if read == 0 {
            // EOF (Ctrl-D)
            return Err(PromptError::Cancelled);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let question = match default {
            Some(default) => format!("{} [{}]: ", message, default),
            None => format!("{}: ", message),
        };
        let answer = self.read_line(&question)?;
        match (answer.is_empty(), default) {
            (true, Some(default)) => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn password(&self, message: &str) -> Result<String, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }
        rpassword::prompt_password(format!("{}: ", message))
            .map_err(|e| PromptError::IoError(e.to_string()))
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let answer = self.read_line(&format!("{} [{}]: ", message, hint))?;
            match parse_yes_no(&answer) {
                Some(value) => return Ok(value),
                None if answer.trim().is_empty() => return Ok(default),
                None => continue,
            }
        }
    }
}

/// Interpret a yes/no answer. Returns `None` for anything unrecognized.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Some(true),
        "n" | "no" | "false" => Some(false),
        _ => None,
    }
}
