//! runner::invocation
//!
//! Description of the subprocess to launch.
//!
//! An [`Invocation`] is built incrementally (base arguments, then the input
//! strategy, then the environment channel) and only turned into a real
//! [`std::process::Command`] at execution time. Keeping it as plain data
//! lets tests assert the exact argument vector without spawning anything.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// How one standard stream of the child is wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamBinding {
    /// Share the host's stream (full passthrough).
    #[default]
    Inherit,
    /// Discard / provide nothing.
    Null,
}

impl StreamBinding {
    fn to_stdio(self) -> Stdio {
        match self {
            StreamBinding::Inherit => Stdio::inherit(),
            StreamBinding::Null => Stdio::null(),
        }
    }
}

/// A fully described subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    env: Vec<String>,
    current_dir: Option<PathBuf>,
    stdin: StreamBinding,
    stdout: StreamBinding,
    stderr: StreamBinding,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
            stdin: StreamBinding::Inherit,
            stdout: StreamBinding::Inherit,
            stderr: StreamBinding::Inherit,
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a `KEY=VALUE` entry to the process environment.
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.push(format!("{}={}", key, value));
        self
    }

    pub fn current_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Wire all three standard streams to the host's.
    pub fn inherit_stdio(&mut self) -> &mut Self {
        self.stdin = StreamBinding::Inherit;
        self.stdout = StreamBinding::Inherit;
        self.stderr = StreamBinding::Inherit;
        self
    }

    pub fn stdin(&mut self, binding: StreamBinding) -> &mut Self {
        self.stdin = binding;
        self
    }

    pub fn stdout(&mut self, binding: StreamBinding) -> &mut Self {
        self.stdout = binding;
        self
    }

    pub fn stderr(&mut self, binding: StreamBinding) -> &mut Self {
        self.stderr = binding;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Environment entries in insertion order, each `KEY=VALUE`.
    pub fn env_entries(&self) -> &[String] {
        &self.env
    }

    /// Look up the last value set for `key`.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env.iter().rev().find_map(|entry| {
            entry
                .split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// `(stdin, stdout, stderr)` bindings.
    pub fn stdio(&self) -> (StreamBinding, StreamBinding, StreamBinding) {
        (self.stdin, self.stdout, self.stderr)
    }

    /// Build the process command.
    ///
    /// The host environment is inherited and the invocation's entries are
    /// layered on top.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for entry in &self.env {
            if let Some((key, value)) = entry.split_once('=') {
                command.env(key, value);
            }
        }
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
            .stdin(self.stdin.to_stdio())
            .stdout(self.stdout.to_stdio())
            .stderr(self.stderr.to_stdio());
        command
    }

    /// Render a copy-pasteable command line for logs.
    pub fn command_line(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(&self.args))
    }
}
