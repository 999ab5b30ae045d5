//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ContainerId`] - Validated per-run container identity
//! - [`InputType`] - How a formula receives its inputs
//! - [`Mount`] - Host-to-container volume binding
//! - [`Flags`] - Parsed `KEY=VALUE` flag values
//! - [`FormulaDefinition`] - Which formula to run
//! - [`Setup`] - Prepared per-run state
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so the invocation builder never has to re-check
//! a container name or a mount spec.
//!
//! # Examples
//!
//! ```
//! use formula_runner::core::types::{ContainerId, InputType, Mount};
//!
//! let id = ContainerId::new("run-42").unwrap();
//! assert_eq!(id.as_str(), "run-42");
//!
//! let mount = Mount::parse("/data:/data").unwrap();
//! assert_eq!(mount.to_arg(), "/data:/data");
//!
//! assert_eq!("flag".parse::<InputType>().unwrap(), InputType::Flag);
//! assert!("carrier-pigeon".parse::<InputType>().is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::formula::FormulaConfig;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid container id: {0}")]
    InvalidContainerId(String),

    #[error("invalid mount '{0}': expected <host>:<container>[:<options>]")]
    InvalidMount(String),

    #[error("invalid flag '{0}': expected KEY=VALUE")]
    InvalidFlag(String),

    #[error("unsupported input mode: {0} (valid: stdin, prompt, flag)")]
    UnsupportedInputMode(String),
}

/// A validated container identity.
///
/// The same value names the container (`--name`) and the image it runs,
/// so it must satisfy the container runtime's name rules:
/// `[a-zA-Z0-9][a-zA-Z0-9_.-]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerId(String);

impl ContainerId {
    /// Prefix used for generated identities.
    pub const PREFIX: &'static str = "rit-";

    /// Create a new validated container id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidContainerId` if the id is empty or
    /// contains characters the runtime rejects.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh, unique id for a run.
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, uuid::Uuid::new_v4().simple()))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        let mut chars = id.chars();
        match chars.next() {
            None => {
                return Err(TypeError::InvalidContainerId(
                    "container id cannot be empty".into(),
                ))
            }
            Some(first) if !first.is_ascii_alphanumeric() => {
                return Err(TypeError::InvalidContainerId(format!(
                    "'{}' must start with a letter or digit",
                    id
                )))
            }
            Some(_) => {}
        }

        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))) {
            return Err(TypeError::InvalidContainerId(format!(
                "'{}' contains invalid character '{}'",
                id, bad
            )));
        }

        // Image references must be lowercase.
        if id.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(TypeError::InvalidContainerId(format!(
                "'{}' must be lowercase",
                id
            )));
        }

        Ok(())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContainerId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContainerId> for String {
    fn from(id: ContainerId) -> Self {
        id.0
    }
}

/// How a formula receives its inputs.
///
/// The set is closed: dispatch over it is an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    /// A JSON object piped on standard input.
    Stdin,
    /// Interactive prompts on the terminal.
    Prompt,
    /// `--flag KEY=VALUE` arguments.
    Flag,
}

impl InputType {
    /// All input types, in a stable order.
    pub const ALL: [InputType; 3] = [InputType::Stdin, InputType::Prompt, InputType::Flag];

    /// The textual name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Stdin => "stdin",
            InputType::Prompt => "prompt",
            InputType::Flag => "flag",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdin" => Ok(InputType::Stdin),
            "prompt" => Ok(InputType::Prompt),
            "flag" | "flags" => Ok(InputType::Flag),
            other => Err(TypeError::UnsupportedInputMode(other.to_string())),
        }
    }
}

/// A volume binding from a host path to a container path.
///
/// Rendered as `host:container` (or `host:container:options`) for the
/// runtime's `-v` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mount {
    host: String,
    container: String,
    options: Option<String>,
}

impl Mount {
    /// Create a mount from its two paths.
    pub fn new(host: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
            options: None,
        }
    }

    /// Parse a `host:container[:options]` spec.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidMount` if either path is missing.
    pub fn parse(spec: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidMount(spec.to_string());

        let (host, rest) = spec.split_once(':').ok_or_else(invalid)?;
        let (container, options) = match rest.split_once(':') {
            Some((container, options)) => (container, Some(options)),
            None => (rest, None),
        };

        if host.trim().is_empty() || container.trim().is_empty() {
            return Err(invalid());
        }
        if options.is_some_and(|o| o.trim().is_empty()) {
            return Err(invalid());
        }

        Ok(Self {
            host: host.to_string(),
            container: container.to_string(),
            options: options.map(str::to_string),
        })
    }

    /// Host side of the binding.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Container side of the binding.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Render the value passed after `-v`.
    pub fn to_arg(&self) -> String {
        match &self.options {
            Some(options) => format!("{}:{}:{}", self.host, self.container, options),
            None => format!("{}:{}", self.host, self.container),
        }
    }
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg())
    }
}

impl TryFrom<String> for Mount {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Mount> for String {
    fn from(mount: Mount) -> Self {
        mount.to_arg()
    }
}

/// Flag values given on the command line, keyed by input name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    values: BTreeMap<String, String>,
}

impl Flags {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `KEY=VALUE` pairs. Later duplicates win.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidFlag` for a pair without `=` or with an
    /// empty key.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            match pair.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    flags.insert(key.trim(), value);
                }
                _ => return Err(TypeError::InvalidFlag(pair.to_string())),
            }
        }
        Ok(flags)
    }

    /// Set a flag value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a flag value by input name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Identifies which formula to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaDefinition {
    /// Human-facing name, e.g. `demo/hello`.
    pub name: String,
    /// Formula directory on the host (holds `Dockerfile` and `config.json`).
    pub path: PathBuf,
}

impl FormulaDefinition {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Build a definition named after the last component of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Prepared per-run state produced by a `PreRunner`.
///
/// Owned by exactly one run and never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Setup {
    /// Host directory mounted as the formula's working directory.
    pub pwd: PathBuf,
    /// Scratch directory for this run; holds the environment file and is
    /// where the runtime is launched from.
    pub work_dir: PathBuf,
    /// Formula configuration (declared inputs, extra mounts).
    pub config: FormulaConfig,
    /// Container name and image target.
    pub container_id: ContainerId,
}
