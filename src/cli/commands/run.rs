//! run command - Run a formula in a container

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::context::FileContextFinder;
use crate::core::config::Config;
use crate::core::types::{Flags, FormulaDefinition, InputType};
use crate::runner::env_channel::EnvChannel;
use crate::runner::inputs::{FlagInput, PromptInput, StdinInput};
use crate::runner::{
    DockerPostRunner, DockerPreRunner, InputResolver, InvocationBuilder, RunManager,
    SystemProcessRunner,
};
use crate::stream::FileStore;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::TerminalPrompter;
use crate::ui::terminal::StdTerminal;

/// Arguments of `rit-run run`.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub formula: PathBuf,
    pub name: Option<String>,
    pub input: InputType,
    pub flags: Vec<String>,
    pub verbose: bool,
}

/// Run a formula to completion.
pub fn run(options: RunOptions, verbosity: Verbosity) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    if let Some(path) = config.loaded_from() {
        debug!(path = %path.display(), "loaded configuration");
    }
    let paths = config.state_paths()?;
    let flags = Flags::parse_pairs(&options.flags)?;

    if options.input != InputType::Flag && !flags.is_empty() {
        output::warn(
            format!("--flag values are ignored with --input {}", options.input),
            verbosity,
        );
    }

    let definition = match options.name {
        Some(name) => FormulaDefinition::new(name, &options.formula),
        None => FormulaDefinition::from_path(&options.formula),
    };

    let runtime = config.runtime();
    let interactive = std::io::stdin().is_terminal();
    let inputs = InputResolver::new()
        .with(InputType::Flag, FlagInput)
        .with(InputType::Stdin, StdinInput::new())
        .with(
            InputType::Prompt,
            PromptInput::new(TerminalPrompter::new(interactive)),
        );

    let builder = InvocationBuilder::new(
        runtime,
        paths.root(),
        StdTerminal,
        inputs,
        FileContextFinder::new(paths.env_file()),
        EnvChannel::new(FileStore::new()),
    );
    let manager = RunManager::new(
        DockerPreRunner::new(runtime, paths.clone(), SystemProcessRunner),
        DockerPostRunner::new(runtime, SystemProcessRunner).keep_images(config.keep_images()),
        builder,
        SystemProcessRunner,
    );

    manager.run(&definition, options.input, options.verbose, &flags)?;
    Ok(())
}
