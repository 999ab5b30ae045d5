//! Architecture enforcement tests.
//!
//! Two boundaries are easy to erode and hard to notice in review:
//!
//! 1. **Process spawning** - only `runner/invocation.rs` turns an
//!    invocation into a `std::process::Command`. Everything else describes
//!    subprocesses as data so tests can assert on them without spawning.
//! 2. **Terminal output** - only `ui/` prints. A stray `println!` in the
//!    runner would interleave with the formula's own stdout.
//!
//! Comment lines are ignored, so doc examples may use either freely.

use std::fs;
use std::path::{Path, PathBuf};

/// Collect every `.rs` file under `dir`, recursively.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).expect("read source dir") {
            let path = entry.expect("dir entry").path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

fn relative(path: &Path) -> String {
    path.strip_prefix(src_dir())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// `(file, line number, line)` for every non-comment line containing
/// `needle` outside the allowed files.
fn violations(needle: &str, allowed: impl Fn(&str) -> bool) -> Vec<String> {
    let mut found = Vec::new();
    for file in rust_files(&src_dir()) {
        let rel = relative(&file);
        if allowed(&rel) {
            continue;
        }
        let content = fs::read_to_string(&file).expect("read source file");
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") {
                continue;
            }
            if trimmed.contains(needle) {
                found.push(format!("{}:{}: {}", rel, idx + 1, trimmed));
            }
        }
    }
    found
}

#[test]
fn only_invocation_spawns_processes() {
    let found = violations("Command::new", |rel| rel == "runner/invocation.rs");
    assert!(
        found.is_empty(),
        "process spawning outside runner/invocation.rs:\n{}",
        found.join("\n")
    );
}

#[test]
fn only_ui_prints() {
    let mut found = violations("println!", |rel| rel.starts_with("ui/"));
    found.extend(violations("print!(", |rel| rel.starts_with("ui/")));
    assert!(
        found.is_empty(),
        "direct printing outside ui/:\n{}",
        found.join("\n")
    );
}

#[test]
fn lint_sees_the_source_tree() {
    let files: Vec<_> = rust_files(&src_dir()).iter().map(|f| relative(f)).collect();
    assert!(files.contains(&"runner/invocation.rs".to_string()));
    assert!(files.contains(&"ui/output.rs".to_string()));
}
