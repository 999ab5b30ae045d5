//! runner::lifecycle
//!
//! One formula run from preparation to cleanup.
//!
//! # Design
//!
//! ```text
//! pre_run ──► arm CleanupGuard ──► build ──► execute ──► (guard drops) post_run(force)
//!    │
//!    └─ error: return immediately, nothing to clean
//! ```
//!
//! Cleanup is tied to the guard's scope, so it runs exactly once for every
//! run whose preparation succeeded, whichever way the run ends (including
//! an unwinding panic). A cleanup failure is reported and logged but never
//! replaces the run's own result.

use thiserror::Error;
use tracing::{info, warn};

use crate::core::types::{Flags, FormulaDefinition, InputType, Setup};
use crate::ui::output::{DiagnosticSink, StderrSink};

use super::builder::{BuildError, InvocationBuilder};
use super::process::{ExecError, ProcessRunner};
use super::traits::{PostRunner, PreRunner, SetupError};

/// Errors from a formula run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("formula execution failed: {0}")]
    Execute(#[from] ExecError),
}

impl RunError {
    /// Exit code the host process should use for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Execute(e) => e.exit_code().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

/// Runs formulas in containers.
pub struct RunManager {
    pre_runner: Box<dyn PreRunner>,
    post_runner: Box<dyn PostRunner>,
    builder: InvocationBuilder,
    process: Box<dyn ProcessRunner>,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl RunManager {
    /// Cleanup failures go to stderr until [`with_diagnostics`] says
    /// otherwise.
    ///
    /// [`with_diagnostics`]: RunManager::with_diagnostics
    pub fn new(
        pre_runner: impl PreRunner + 'static,
        post_runner: impl PostRunner + 'static,
        builder: InvocationBuilder,
        process: impl ProcessRunner + 'static,
    ) -> Self {
        Self {
            pre_runner: Box::new(pre_runner),
            post_runner: Box::new(post_runner),
            builder,
            process: Box::new(process),
            diagnostics: Box::new(StderrSink),
        }
    }

    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// Run `definition` to completion.
    pub fn run(
        &self,
        definition: &FormulaDefinition,
        input_type: InputType,
        verbose: bool,
        flags: &Flags,
    ) -> Result<(), RunError> {
        let setup = self.pre_runner.pre_run(definition)?;
        let guard = CleanupGuard {
            setup,
            post_runner: self.post_runner.as_ref(),
            diagnostics: self.diagnostics.as_ref(),
        };

        info!(
            formula = %definition.name,
            container = %guard.setup.container_id,
            input = %input_type,
            "running formula"
        );
        let invocation = self
            .builder
            .build(&guard.setup, input_type, verbose, flags)?;
        self.process.run(&invocation)?;
        Ok(())
    }
}

impl std::fmt::Debug for RunManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunManager")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

/// Runs `post_run(setup, true)` when dropped.
struct CleanupGuard<'a> {
    setup: Setup,
    post_runner: &'a dyn PostRunner,
    diagnostics: &'a dyn DiagnosticSink,
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.post_runner.post_run(&self.setup, true) {
            warn!(container = %self.setup.container_id, error = %e, "cleanup failed");
            self.diagnostics.report(&e.to_string());
        }
    }
}
