//! core::formula
//!
//! Per-formula configuration read from `<formula>/config.json`.
//!
//! # Example
//!
//! ```json
//! {
//!   "inputs": [
//!     { "name": "sample_text", "type": "text", "label": "Type : ", "required": true },
//!     { "name": "secret", "type": "password" },
//!     { "name": "loud", "type": "bool", "default": "false" }
//!   ],
//!   "volumes": ["/data:/data"]
//! }
//! ```
//!
//! Both keys are optional. A missing or empty `volumes` list contributes no
//! extra mounts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Mount;

/// File name of the formula configuration inside a formula directory.
pub const FORMULA_CONFIG_FILE: &str = "config.json";

/// Variables an input may not set. The runner writes some of these itself
/// and the container runtime reads the others from its own environment.
pub const RESERVED_ENV_NAMES: [&str; 7] = [
    "PATH",
    "HOME",
    "DOCKER_EXECUTION",
    "CURRENT_PWD",
    "ENV",
    "CONTEXT",
    "VERBOSE_MODE",
];

/// Prefix of the runtime's own configuration variables (`DOCKER_HOST`, ..).
const RESERVED_ENV_PREFIX: &str = "DOCKER_";

/// Whether `env_name` is off limits for formula inputs.
pub fn is_reserved_env_name(env_name: &str) -> bool {
    RESERVED_ENV_NAMES.contains(&env_name) || env_name.starts_with(RESERVED_ENV_PREFIX)
}

/// Errors from loading a formula configuration.
#[derive(Debug, Error)]
pub enum FormulaConfigError {
    #[error("failed to read formula config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse formula config '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid formula config: {0}")]
    Invalid(String),
}

/// Kind of value an input accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    /// Read without echo when prompted.
    Password,
    /// Must be `true` or `false`.
    Bool,
}

/// One declared formula input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSpec {
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: InputKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default)]
    pub required: bool,
}

impl InputSpec {
    /// Name of the environment variable carrying this input.
    pub fn env_name(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// Text shown when prompting for this input.
    pub fn prompt_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Formula configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormulaConfig {
    /// Inputs the formula expects, in prompt order.
    pub inputs: Vec<InputSpec>,

    /// Extra mounts appended after the mandatory ones.
    pub volumes: Vec<Mount>,
}

impl FormulaConfig {
    /// Load `config.json` from a formula directory.
    ///
    /// A directory without `config.json` yields the default (no inputs,
    /// no extra mounts).
    pub fn load(formula_dir: &Path) -> Result<Self, FormulaConfigError> {
        let path = formula_dir.join(FORMULA_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| FormulaConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: FormulaConfig =
            serde_json::from_str(&content).map_err(|e| FormulaConfigError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate input declarations.
    pub fn validate(&self) -> Result<(), FormulaConfigError> {
        let mut seen = std::collections::HashSet::new();
        for input in &self.inputs {
            if input.name.trim().is_empty() {
                return Err(FormulaConfigError::Invalid(
                    "input name cannot be empty".into(),
                ));
            }
            if !input
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(FormulaConfigError::Invalid(format!(
                    "input name '{}' may only contain letters, digits and '_'",
                    input.name
                )));
            }
            if is_reserved_env_name(&input.env_name()) {
                return Err(FormulaConfigError::Invalid(format!(
                    "input name '{}' is reserved for the runner",
                    input.name
                )));
            }
            if !seen.insert(input.env_name()) {
                return Err(FormulaConfigError::Invalid(format!(
                    "duplicate input '{}'",
                    input.name
                )));
            }
            if input.kind == InputKind::Bool {
                if let Some(default) = &input.default {
                    if default != "true" && default != "false" {
                        return Err(FormulaConfigError::Invalid(format!(
                            "bool input '{}' has non-boolean default '{}'",
                            input.name, default
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        fs::write(dir.path().join(FORMULA_CONFIG_FILE), content).expect("write config");
    }

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().expect("temp dir");
        let config = FormulaConfig::load(dir.path()).expect("load");
        assert_eq!(config, FormulaConfig::default());
        assert!(config.volumes.is_empty());
    }

    #[test]
    fn loads_inputs_and_volumes() {
        let dir = TempDir::new().expect("temp dir");
        write_config(
            &dir,
            r#"{
                "inputs": [
                    {"name": "sample_text", "type": "text", "required": true},
                    {"name": "secret", "type": "password"}
                ],
                "volumes": ["/data:/data", "/cache:/cache:ro"]
            }"#,
        );

        let config = FormulaConfig::load(dir.path()).expect("load");
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.inputs[0].env_name(), "SAMPLE_TEXT");
        assert!(config.inputs[0].required);
        assert_eq!(config.inputs[1].kind, InputKind::Password);
        let volumes: Vec<String> = config.volumes.iter().map(Mount::to_arg).collect();
        assert_eq!(volumes, vec!["/data:/data", "/cache:/cache:ro"]);
    }

    #[test]
    fn rejects_bad_volume() {
        let dir = TempDir::new().expect("temp dir");
        write_config(&dir, r#"{"volumes": [""]}"#);

        let err = FormulaConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, FormulaConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn rejects_duplicate_inputs() {
        let dir = TempDir::new().expect("temp dir");
        write_config(
            &dir,
            r#"{"inputs": [{"name": "name"}, {"name": "NAME"}]}"#,
        );

        let err = FormulaConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn rejects_reserved_input_names() {
        let names = ["path", "home", "docker_host", "context", "docker_execution", "Verbose_Mode"];
        for name in names {
            let config = FormulaConfig {
                inputs: vec![InputSpec {
                    name: name.into(),
                    kind: InputKind::Text,
                    label: None,
                    default: None,
                    required: false,
                }],
                volumes: Vec::new(),
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("reserved"), "{name}: {err}");
        }
    }

    #[test]
    fn reserved_name_in_file_fails_load() {
        let dir = TempDir::new().expect("temp dir");
        write_config(&dir, r#"{"inputs": [{"name": "path", "default": "/opt/formula"}]}"#);

        let err = FormulaConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, FormulaConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn rejects_non_boolean_default() {
        let config = FormulaConfig {
            inputs: vec![InputSpec {
                name: "loud".into(),
                kind: InputKind::Bool,
                label: None,
                default: Some("maybe".into()),
                required: false,
            }],
            volumes: Vec::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn prompt_label_falls_back_to_name() {
        let input: InputSpec = serde_json::from_str(r#"{"name": "city"}"#).expect("parse");
        assert_eq!(input.prompt_label(), "city");
        assert_eq!(input.kind, InputKind::Text);
        assert!(!input.required);
    }
}
