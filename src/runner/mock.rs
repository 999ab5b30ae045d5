//! runner::mock
//!
//! Recording test doubles for the runner's collaborators.
//!
//! # Design
//!
//! Every mock is a cheap handle over shared state (`Arc<Mutex<...>>`):
//! clone it, hand one clone to the code under test, and inspect the other
//! afterwards. Failures are opted into per mock.
//!
//! # Example
//!
//! ```
//! use formula_runner::runner::mock::{sample_setup, MockPostRunner};
//! use formula_runner::runner::PostRunner;
//!
//! let post = MockPostRunner::new();
//! let setup = sample_setup();
//!
//! post.post_run(&setup, true).unwrap();
//! assert_eq!(post.calls(), vec![(setup.container_id.clone(), true)]);
//! ```

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::formula::FormulaConfig;
use crate::core::types::{ContainerId, FormulaDefinition, Mount, Setup};
use crate::ui::prompts::{parse_yes_no, PromptError, Prompter};

use super::invocation::Invocation;
use super::process::{ExecError, ProcessRunner};
use super::traits::{CleanupError, PostRunner, PreRunner, SetupError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// A setup resembling a real run: pwd `/work`, one extra `/data` mount,
/// container `run-42`.
pub fn sample_setup() -> Setup {
    Setup {
        pwd: PathBuf::from("/work"),
        work_dir: PathBuf::from("/tmp/rit/runs/run-42"),
        config: FormulaConfig {
            inputs: Vec::new(),
            volumes: vec![Mount::new("/data", "/data")],
        },
        container_id: ContainerId::new("run-42").expect("valid container id"),
    }
}

/// Hands out a fixed [`Setup`].
#[derive(Debug, Clone)]
pub struct MockPreRunner {
    inner: Arc<Mutex<PreInner>>,
}

#[derive(Debug)]
struct PreInner {
    setup: Setup,
    failure: Option<String>,
    definitions: Vec<FormulaDefinition>,
}

impl MockPreRunner {
    pub fn new(setup: Setup) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PreInner {
                setup,
                failure: None,
                definitions: Vec::new(),
            })),
        }
    }

    /// Fail every `pre_run` with [`SetupError::Other`].
    pub fn fail_with(&self, message: impl Into<String>) {
        lock(&self.inner).failure = Some(message.into());
    }

    /// Definitions passed to `pre_run`, in call order.
    pub fn definitions(&self) -> Vec<FormulaDefinition> {
        lock(&self.inner).definitions.clone()
    }
}

impl PreRunner for MockPreRunner {
    fn pre_run(&self, definition: &FormulaDefinition) -> Result<Setup, SetupError> {
        let mut inner = lock(&self.inner);
        inner.definitions.push(definition.clone());
        match &inner.failure {
            Some(message) => Err(SetupError::Other(message.clone())),
            None => Ok(inner.setup.clone()),
        }
    }
}

/// Records cleanups.
#[derive(Debug, Clone, Default)]
pub struct MockPostRunner {
    inner: Arc<Mutex<PostInner>>,
}

#[derive(Debug, Default)]
struct PostInner {
    failure: Option<String>,
    calls: Vec<(ContainerId, bool)>,
}

impl MockPostRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `post_run` (after recording it).
    pub fn fail_with(&self, message: impl Into<String>) {
        lock(&self.inner).failure = Some(message.into());
    }

    /// `(container_id, force_remove)` for every `post_run` call.
    pub fn calls(&self) -> Vec<(ContainerId, bool)> {
        lock(&self.inner).calls.clone()
    }
}

impl PostRunner for MockPostRunner {
    fn post_run(&self, setup: &Setup, force_remove: bool) -> Result<(), CleanupError> {
        let mut inner = lock(&self.inner);
        inner
            .calls
            .push((setup.container_id.clone(), force_remove));
        match &inner.failure {
            Some(message) => Err(CleanupError::new(setup.container_id.clone(), message.clone())),
            None => Ok(()),
        }
    }
}

/// Records invocations instead of spawning them.
#[derive(Debug, Clone, Default)]
pub struct MockProcessRunner {
    inner: Arc<Mutex<ProcessInner>>,
}

#[derive(Debug, Default)]
struct ProcessInner {
    exit_code: Option<i32>,
    invocations: Vec<Invocation>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every run exit with `code`.
    pub fn exit_with(&self, code: i32) {
        lock(&self.inner).exit_code = Some(code);
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        lock(&self.inner).invocations.clone()
    }

    /// Argument vectors of every run, for terse assertions.
    pub fn arg_lists(&self) -> Vec<Vec<String>> {
        lock(&self.inner)
            .invocations
            .iter()
            .map(|inv| inv.get_args().to_vec())
            .collect()
    }
}

impl ProcessRunner for MockProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ExecError> {
        let mut inner = lock(&self.inner);
        inner.invocations.push(invocation.clone());
        match inner.exit_code {
            Some(0) | None => Ok(()),
            Some(code) => Err(ExecError::Failed {
                program: invocation.program().to_string(),
                code: Some(code),
            }),
        }
    }
}

/// Answers prompts from a script.
///
/// Each question is recorded as `"<kind>:<message>"`. An exhausted script
/// behaves like the user pressing Ctrl-D.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    inner: Arc<Mutex<PromptInner>>,
}

#[derive(Debug, Default)]
struct PromptInner {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(Mutex::new(PromptInner {
                answers: answers.into_iter().map(Into::into).collect(),
                asked: Vec::new(),
            })),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        lock(&self.inner).asked.clone()
    }

    fn next(&self, kind: &str, message: &str) -> Result<String, PromptError> {
        let mut inner = lock(&self.inner);
        inner.asked.push(format!("{}:{}", kind, message));
        inner.answers.pop_front().ok_or(PromptError::Cancelled)
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let answer = self.next("text", message)?;
        match (answer.is_empty(), default) {
            (true, Some(default)) => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn password(&self, message: &str) -> Result<String, PromptError> {
        self.next("password", message)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        let answer = self.next("confirm", message)?;
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_runner_records_and_fails_on_request() {
        let pre = MockPreRunner::new(sample_setup());
        let def = FormulaDefinition::new("hello", "/formulas/hello");

        let setup = pre.pre_run(&def).expect("setup");
        assert_eq!(setup.container_id.as_str(), "run-42");

        pre.fail_with("boom");
        let err = pre.pre_run(&def).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(pre.definitions().len(), 2);
    }

    #[test]
    fn post_runner_records_failed_calls_too() {
        let post = MockPostRunner::new();
        post.fail_with("rmi failed");
        let err = post.post_run(&sample_setup(), false).unwrap_err();
        assert_eq!(err.failures, vec!["rmi failed".to_string()]);
        assert_eq!(post.calls().len(), 1);
    }

    #[test]
    fn process_runner_exit_codes() {
        let process = MockProcessRunner::new();
        let mut inv = Invocation::new("docker");
        inv.arg("ps");
        process.run(&inv).expect("default succeeds");

        process.exit_with(2);
        let err = process.run(&inv).unwrap_err();
        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(process.arg_lists(), vec![vec!["ps".to_string()]; 2]);
    }

    #[test]
    fn scripted_prompter_defaults() {
        let prompter = ScriptedPrompter::new(["", "maybe"]);
        assert_eq!(prompter.text("Name", Some("rit")).expect("text"), "rit");
        assert!(prompter.confirm("Sure?", true).expect("confirm"));
        assert!(matches!(
            prompter.password("Token"),
            Err(PromptError::Cancelled)
        ));
    }
}
