//! runner::builder
//!
//! Turns a prepared [`Setup`] into the runtime [`Invocation`].
//!
//! # Design
//!
//! The resulting command line has a fixed shape:
//!
//! ```text
//! <runtime> run --rm --env-file .env [-it] -v <pwd>:/app -v <state>:/root/.rit [-v <extra>]... --name <id> <id>
//! ```
//!
//! `-it` is only requested when stdout is a terminal and inputs are not
//! piped through stdin (a TTY would swallow the piped data). The runtime is
//! launched from `setup.work_dir`, which is where the relative `.env` path
//! resolves.
//!
//! After the input strategy has added its entries, the five runtime
//! variables are pushed and the whole environment is mirrored into
//! `<work_dir>/.env`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::context::{ContextError, ContextFinder};
use crate::core::paths::{CONTAINER_PWD, CONTAINER_STATE_DIR, ENV_FILE};
use crate::core::types::{Flags, InputType, Mount, Setup};
use crate::stream::StreamError;
use crate::ui::terminal::TerminalProbe;

use super::env_channel::{runtime_vars, EnvChannel};
use super::input::{InputError, InputResolver};
use super::invocation::Invocation;

/// Errors from building an invocation.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("failed to read execution context: {0}")]
    Context(#[from] ContextError),

    #[error("failed to write environment file: {0}")]
    EnvFile(#[from] StreamError),

    #[error("cannot mount '{}': path is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },
}

/// Builds runtime invocations.
pub struct InvocationBuilder {
    runtime: String,
    state_dir: PathBuf,
    terminal: Box<dyn TerminalProbe>,
    inputs: InputResolver,
    context: Box<dyn ContextFinder>,
    env_channel: EnvChannel,
}

impl InvocationBuilder {
    /// `state_dir` is the host directory shared with the container as
    /// `/root/.rit`.
    pub fn new(
        runtime: impl Into<String>,
        state_dir: impl Into<PathBuf>,
        terminal: impl TerminalProbe + 'static,
        inputs: InputResolver,
        context: impl ContextFinder + 'static,
        env_channel: EnvChannel,
    ) -> Self {
        Self {
            runtime: runtime.into(),
            state_dir: state_dir.into(),
            terminal: Box::new(terminal),
            inputs,
            context: Box::new(context),
            env_channel,
        }
    }

    /// Mounts for `setup`: working directory, state directory, then the
    /// formula's extra volumes in declaration order.
    pub fn mounts(&self, setup: &Setup) -> Result<Vec<Mount>, BuildError> {
        let mut mounts = vec![
            Mount::new(host_path(&setup.pwd)?, CONTAINER_PWD),
            Mount::new(host_path(&self.state_dir)?, CONTAINER_STATE_DIR),
        ];
        mounts.extend(setup.config.volumes.iter().cloned());
        Ok(mounts)
    }

    pub fn build(
        &self,
        setup: &Setup,
        input_type: InputType,
        verbose: bool,
        flags: &Flags,
    ) -> Result<Invocation, BuildError> {
        let id = setup.container_id.as_str();

        let mut invocation = Invocation::new(&self.runtime);
        invocation.args(["run", "--rm", "--env-file", ENV_FILE]);
        if self.terminal.stdout_is_terminal() && input_type != InputType::Stdin {
            invocation.arg("-it");
        }
        for mount in self.mounts(setup)? {
            invocation.arg("-v").arg(mount.to_arg());
        }
        invocation
            .args(["--name", id, id])
            .inherit_stdio()
            .current_dir(&setup.work_dir);

        self.inputs
            .resolve(input_type)?
            .inputs(&mut invocation, setup, flags)?;

        let context = self.context.find()?;
        for (key, value) in runtime_vars(&context, verbose) {
            invocation.env(key, &value);
        }

        let target = setup.work_dir.join(ENV_FILE);
        self.env_channel
            .write_all(invocation.env_entries(), &target)?;

        debug!(command = %invocation.command_line(), "built invocation");
        Ok(invocation)
    }
}

fn host_path(path: &Path) -> Result<&str, BuildError> {
    path.to_str().ok_or_else(|| BuildError::NonUtf8Path {
        path: path.to_path_buf(),
    })
}

impl std::fmt::Debug for InvocationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationBuilder")
            .field("runtime", &self.runtime)
            .field("state_dir", &self.state_dir)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticContextFinder;
    use crate::core::formula::{InputKind, InputSpec};
    use crate::runner::inputs::{FlagInput, StdinInput};
    use crate::runner::mock::sample_setup;
    use crate::stream::memory::FailOn;
    use crate::stream::MemoryFileStore;
    use crate::ui::terminal::FixedTerminal;
    use std::io::Cursor;

    fn builder(terminal: bool, store: &MemoryFileStore) -> InvocationBuilder {
        InvocationBuilder::new(
            "docker",
            "/home/user/.rit",
            FixedTerminal(terminal),
            InputResolver::new()
                .with(InputType::Flag, FlagInput)
                .with(InputType::Stdin, StdinInput::from_reader(Cursor::new(String::new()))),
            StaticContextFinder::new("dev"),
            EnvChannel::new(store.clone()),
        )
    }

    #[test]
    fn builds_full_command_line() {
        let store = MemoryFileStore::new();
        let setup = sample_setup();
        let inv = builder(false, &store)
            .build(&setup, InputType::Flag, true, &Flags::new())
            .expect("build");

        assert_eq!(inv.program(), "docker");
        assert_eq!(
            inv.get_args(),
            [
                "run",
                "--rm",
                "--env-file",
                ".env",
                "-v",
                "/work:/app",
                "-v",
                "/home/user/.rit:/root/.rit",
                "-v",
                "/data:/data",
                "--name",
                "run-42",
                "run-42"
            ]
        );
        assert_eq!(inv.get_current_dir(), Some(setup.work_dir.as_path()));
        assert_eq!(
            store.lines(&setup.work_dir.join(".env")),
            [
                "DOCKER_EXECUTION=true",
                "CURRENT_PWD=/app",
                "ENV=dev",
                "CONTEXT=dev",
                "VERBOSE_MODE=true"
            ]
        );
    }

    #[test]
    fn terminal_adds_it_except_for_stdin() {
        let store = MemoryFileStore::new();
        let setup = sample_setup();
        let b = builder(true, &store);

        let flag = b
            .build(&setup, InputType::Flag, false, &Flags::new())
            .expect("flag build");
        assert_eq!(flag.get_args()[4], "-it");

        let stdin = b
            .build(&setup, InputType::Stdin, false, &Flags::new())
            .expect("stdin build");
        assert!(!stdin.get_args().iter().any(|a| a == "-it"));
    }

    #[test]
    fn strategy_entries_precede_runtime_vars() {
        let store = MemoryFileStore::new();
        let mut setup = sample_setup();
        setup.config.inputs = vec![InputSpec {
            name: "name".into(),
            kind: InputKind::Text,
            label: None,
            default: None,
            required: true,
        }];
        let mut flags = Flags::new();
        flags.insert("name", "rit");

        let inv = builder(false, &store)
            .build(&setup, InputType::Flag, false, &flags)
            .expect("build");
        assert_eq!(inv.env_entries()[0], "NAME=rit");
        assert_eq!(inv.env_entries().len(), 6);
        assert_eq!(store.lines(&setup.work_dir.join(".env"))[0], "NAME=rit");
    }

    #[test]
    fn unsupported_mode_fails_before_writing() {
        let store = MemoryFileStore::new();
        let setup = sample_setup();
        let err = builder(false, &store)
            .build(&setup, InputType::Prompt, false, &Flags::new())
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Input(InputError::UnsupportedInputMode(InputType::Prompt))
        ));
        assert!(store.read_to_string(&setup.work_dir.join(".env")).is_none());
    }

    #[test]
    fn env_file_failure_is_build_error() {
        let store = MemoryFileStore::new();
        store.fail_on(FailOn::Write);
        let err = builder(false, &store)
            .build(&sample_setup(), InputType::Flag, false, &Flags::new())
            .unwrap_err();
        assert!(matches!(err, BuildError::EnvFile(_)));
        assert!(err.to_string().starts_with("failed to write environment file"));
    }

    #[test]
    fn no_extra_volumes() {
        let store = MemoryFileStore::new();
        let mut setup = sample_setup();
        setup.config.volumes.clear();
        let b = builder(false, &store);
        let mounts: Vec<_> = b
            .mounts(&setup)
            .expect("mounts")
            .iter()
            .map(Mount::to_arg)
            .collect();
        assert_eq!(mounts, ["/work:/app", "/home/user/.rit:/root/.rit"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_pwd_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let store = MemoryFileStore::new();
        let mut setup = sample_setup();
        setup.pwd = PathBuf::from(OsStr::from_bytes(b"/work/\xff"));

        let err = builder(false, &store)
            .build(&setup, InputType::Flag, false, &Flags::new())
            .unwrap_err();
        assert!(matches!(err, BuildError::NonUtf8Path { ref path } if *path == setup.pwd));
        assert!(store.lines(&setup.work_dir.join(ENV_FILE)).is_empty());
    }
}
