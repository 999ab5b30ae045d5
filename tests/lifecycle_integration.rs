//! End-to-end tests of a formula run against the real filesystem.
//!
//! The container runtime is replaced by a recording process runner; every
//! other collaborator (env file writer, context file, default pre/post
//! runners) is the production one.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use formula_runner::context::{FileContextFinder, StaticContextFinder};
use formula_runner::core::formula::FormulaConfig;
use formula_runner::core::paths::StatePaths;
use formula_runner::core::types::{ContainerId, Flags, FormulaDefinition, InputType, Mount, Setup};
use formula_runner::runner::env_channel::EnvChannel;
use formula_runner::runner::inputs::{FlagInput, StdinInput};
use formula_runner::runner::mock::{MockPostRunner, MockPreRunner, MockProcessRunner};
use formula_runner::runner::{
    DockerPostRunner, DockerPreRunner, InputResolver, InvocationBuilder, RunError, RunManager,
};
use formula_runner::stream::FileStore;
use formula_runner::ui::output::RecordingSink;
use formula_runner::ui::terminal::FixedTerminal;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read env file")
        .lines()
        .map(str::to_string)
        .collect()
}

fn fixed_setup(work_dir: PathBuf) -> Setup {
    Setup {
        pwd: PathBuf::from("/work"),
        work_dir,
        config: FormulaConfig {
            inputs: Vec::new(),
            volumes: vec![Mount::new("/data", "/data")],
        },
        container_id: ContainerId::new("run-42").expect("valid id"),
    }
}

#[test]
fn flag_run_end_to_end() {
    let tmp = TempDir::new().expect("tempdir");
    let home = tmp.path().join("home");
    let paths = StatePaths::for_home(&home);
    let work_dir = tmp.path().join("run-42");
    fs::create_dir_all(&work_dir).expect("work dir");

    let builder = InvocationBuilder::new(
        "docker",
        paths.root(),
        FixedTerminal(false),
        InputResolver::new().with(InputType::Flag, FlagInput),
        StaticContextFinder::new("prod"),
        EnvChannel::new(FileStore::new()),
    );
    let process = MockProcessRunner::new();
    let post = MockPostRunner::new();
    let manager = RunManager::new(
        MockPreRunner::new(fixed_setup(work_dir.clone())),
        post.clone(),
        builder,
        process.clone(),
    );

    manager
        .run(
            &FormulaDefinition::new("demo/hello", "/formulas/hello"),
            InputType::Flag,
            true,
            &Flags::new(),
        )
        .expect("run");

    let invocations = process.invocations();
    assert_eq!(invocations.len(), 1);
    let state_mount = format!("{}:/root/.rit", home.join(".rit").display());
    assert_eq!(
        invocations[0].get_args(),
        [
            "run",
            "--rm",
            "--env-file",
            ".env",
            "-v",
            "/work:/app",
            "-v",
            state_mount.as_str(),
            "-v",
            "/data:/data",
            "--name",
            "run-42",
            "run-42"
        ]
    );
    assert_eq!(invocations[0].get_current_dir(), Some(work_dir.as_path()));
    assert_eq!(invocations[0].env_value("VERBOSE_MODE"), Some("true"));
    assert_eq!(
        read_lines(&work_dir.join(".env")),
        [
            "DOCKER_EXECUTION=true",
            "CURRENT_PWD=/app",
            "ENV=prod",
            "CONTEXT=prod",
            "VERBOSE_MODE=true"
        ]
    );
    assert_eq!(post.calls().len(), 1);
}

#[test]
fn stale_env_file_is_appended_to() {
    let tmp = TempDir::new().expect("tempdir");
    let work_dir = tmp.path().join("run-42");
    fs::create_dir_all(&work_dir).expect("work dir");
    fs::write(work_dir.join(".env"), "STALE=1\n").expect("stale env file");

    let builder = InvocationBuilder::new(
        "docker",
        tmp.path().join(".rit"),
        FixedTerminal(false),
        InputResolver::new().with(InputType::Flag, FlagInput),
        StaticContextFinder::new(""),
        EnvChannel::new(FileStore::new()),
    );
    let manager = RunManager::new(
        MockPreRunner::new(fixed_setup(work_dir.clone())),
        MockPostRunner::new(),
        builder,
        MockProcessRunner::new(),
    );
    manager
        .run(
            &FormulaDefinition::new("demo/hello", "/formulas/hello"),
            InputType::Flag,
            false,
            &Flags::new(),
        )
        .expect("run");

    let lines = read_lines(&work_dir.join(".env"));
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "STALE=1");
    assert_eq!(lines[3], "ENV=");
}

#[test]
fn default_runners_with_stdin_inputs_and_context_file() {
    let tmp = TempDir::new().expect("tempdir");
    let paths = StatePaths::new(tmp.path().join("state"));
    fs::create_dir_all(paths.root()).expect("state dir");
    fs::write(paths.env_file(), r#"{"current_env": "staging"}"#).expect("context file");

    let formula = tmp.path().join("hello");
    fs::create_dir_all(&formula).expect("formula dir");
    fs::write(
        formula.join("config.json"),
        r#"{"inputs": [{"name": "sample_text", "required": true}]}"#,
    )
    .expect("formula config");

    let process = MockProcessRunner::new();
    let builder = InvocationBuilder::new(
        "podman",
        paths.root(),
        FixedTerminal(true),
        InputResolver::new().with(
            InputType::Stdin,
            StdinInput::from_reader(std::io::Cursor::new(r#"{"sample_text": "hi"}"#)),
        ),
        FileContextFinder::new(paths.env_file()),
        EnvChannel::new(FileStore::new()),
    );
    let manager = RunManager::new(
        DockerPreRunner::new("podman", paths.clone(), process.clone()).with_pwd("/work"),
        DockerPostRunner::new("podman", process.clone()),
        builder,
        process.clone(),
    );

    manager
        .run(
            &FormulaDefinition::from_path(&formula),
            InputType::Stdin,
            false,
            &Flags::new(),
        )
        .expect("run");

    let args = process.arg_lists();
    assert_eq!(args.len(), 3, "build, run, rmi: {:?}", args);
    assert_eq!(args[0][0], "build");
    assert_eq!(args[1][0], "run");
    assert!(!args[1].iter().any(|a| a == "-it"));
    assert_eq!(&args[2][..2], ["rmi", "-f"]);

    let run = &process.invocations()[1];
    assert_eq!(run.program(), "podman");
    assert_eq!(run.env_value("SAMPLE_TEXT"), Some("hi"));
    assert_eq!(run.env_value("CONTEXT"), Some("staging"));

    // The run directory, env file included, is gone after cleanup.
    let remaining = fs::read_dir(paths.runs_dir()).expect("runs dir").count();
    assert_eq!(remaining, 0);
}

#[test]
fn failing_formula_is_cleaned_up_and_reported() {
    let tmp = TempDir::new().expect("tempdir");
    let work_dir = tmp.path().join("run-42");
    fs::create_dir_all(&work_dir).expect("work dir");

    let process = MockProcessRunner::new();
    process.exit_with(7);
    let post = MockPostRunner::new();
    post.fail_with("image in use");
    let sink = RecordingSink::new();

    let builder = InvocationBuilder::new(
        "docker",
        tmp.path().join(".rit"),
        FixedTerminal(false),
        InputResolver::new().with(InputType::Flag, FlagInput),
        StaticContextFinder::new("dev"),
        EnvChannel::new(FileStore::new()),
    );
    let manager = RunManager::new(
        MockPreRunner::new(fixed_setup(work_dir)),
        post.clone(),
        builder,
        process,
    )
    .with_diagnostics(sink.clone());

    let err = manager
        .run(
            &FormulaDefinition::new("demo/hello", "/formulas/hello"),
            InputType::Flag,
            false,
            &Flags::new(),
        )
        .unwrap_err();

    assert!(matches!(err, RunError::Execute(_)));
    assert_eq!(err.exit_code(), 7);
    assert_eq!(post.calls(), vec![(ContainerId::new("run-42").expect("id"), true)]);
    assert_eq!(sink.messages().len(), 1);
    assert!(sink.messages()[0].contains("image in use"));
}
