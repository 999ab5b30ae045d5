//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::InputType;

/// rit-run - run formulas inside throwaway containers
#[derive(Parser, Debug)]
#[command(name = "rit-run")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a formula in a container
    #[command(
        name = "run",
        long_about = "Run a formula in a container.\n\n\
            Builds the formula's image, collects its inputs, and starts a container \
            that shares the current directory (as /app) and the runner state \
            directory (as /root/.rit). The container and its image are removed \
            when the run ends, whether it succeeded or not.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Inputs from flags
    rit-run run ./formulas/hello --flag name=rit

    # Inputs as JSON on stdin (no TTY is allocated)
    echo '{\"name\": \"rit\"}' | rit-run run ./formulas/hello --input stdin

    # Ask for each input interactively
    rit-run run ./formulas/hello --input prompt"
    )]
    Run {
        /// Formula directory (contains the build file and config.json)
        formula: PathBuf,

        /// Formula name shown in messages (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,

        /// How inputs are supplied: stdin, prompt or flag
        #[arg(long, value_name = "MODE", default_value = "flag")]
        input: InputType,

        /// Input value as KEY=VALUE (repeatable)
        #[arg(long = "flag", value_name = "KEY=VALUE")]
        flags: Vec<String>,

        /// Ask the formula to log verbosely
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    rit-run completion bash > ~/.local/share/bash-completion/completions/rit-run

    # Zsh
    rit-run completion zsh > \"${fpath[1]}/_rit-run\"

    # Fish
    rit-run completion fish > ~/.config/fish/completions/rit-run.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
