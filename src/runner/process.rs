//! runner::process
//!
//! Synchronous execution of an [`Invocation`].

use thiserror::Error;
use tracing::debug;

use super::invocation::Invocation;

/// Errors from running a subprocess.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The program ran but did not exit successfully.
    #[error("'{program}' exited with {}", describe_exit(.code))]
    Failed { program: String, code: Option<i32> },
}

impl ExecError {
    /// Exit code of the failed process, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::Failed { code, .. } => *code,
            ExecError::Spawn { .. } => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Runs an invocation to completion.
pub trait ProcessRunner: Send + Sync {
    /// Start the process, block until it exits, and fail on a non-zero
    /// or abnormal exit.
    fn run(&self, invocation: &Invocation) -> Result<(), ExecError>;
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ExecError> {
        debug!(command = %invocation.command_line(), "spawning");
        let status = invocation
            .to_command()
            .status()
            .map_err(|source| ExecError::Spawn {
                program: invocation.program().to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Failed {
                program: invocation.program().to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::invocation::StreamBinding;

    fn quiet(program: &str) -> Invocation {
        let mut inv = Invocation::new(program);
        inv.stdin(StreamBinding::Null)
            .stdout(StreamBinding::Null)
            .stderr(StreamBinding::Null);
        inv
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let inv = quiet("definitely-not-a-real-binary-4f1c");
        let err = SystemProcessRunner.run(&inv).unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
        assert_eq!(err.exit_code(), None);
    }

    #[cfg(unix)]
    #[test]
    fn success_and_failure_exit_codes() {
        SystemProcessRunner.run(&quiet("true")).expect("true succeeds");

        let err = SystemProcessRunner.run(&quiet("false")).unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
        assert!(err.to_string().contains("status 1"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn env_entries_reach_the_child() {
        let mut inv = quiet("sh");
        inv.args(["-c", "test \"$RIT_PROBE\" = yes"]).env("RIT_PROBE", "yes");
        SystemProcessRunner.run(&inv).expect("env var visible to child");
    }
}
