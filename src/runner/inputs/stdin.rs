//! runner::inputs::stdin
//!
//! Inputs piped in as a JSON object.
//!
//! ```text
//! echo '{"name": "rit", "loud": true}' | rit-run run ./hello --input stdin
//! ```
//!
//! Strings, booleans and numbers are accepted; `null` counts as absent.

use std::io::{self, Read};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::core::types::{Flags, Setup};
use crate::runner::input::{InputError, InputStrategy};
use crate::runner::invocation::Invocation;

use super::{fallback, push_input};

/// Reads one JSON object mapping input names to values.
pub struct StdinInput {
    reader: Mutex<Box<dyn Read + Send>>,
}

impl StdinInput {
    /// Read from the process's standard input.
    pub fn new() -> Self {
        Self::from_reader(io::stdin())
    }

    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Mutex::new(Box::new(reader)),
        }
    }

    fn read_object(&self) -> Result<Map<String, Value>, InputError> {
        let mut reader = self
            .reader
            .lock()
            .map_err(|_| InputError::Read("stdin reader poisoned".into()))?;
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .map_err(|e| InputError::Read(e.to_string()))?;

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(InputError::Read("expected a JSON object".into())),
            Err(e) => Err(InputError::Read(format!("invalid JSON: {}", e))),
        }
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputStrategy for StdinInput {
    fn inputs(
        &self,
        invocation: &mut Invocation,
        setup: &Setup,
        _flags: &Flags,
    ) -> Result<(), InputError> {
        if setup.config.inputs.is_empty() {
            return Ok(());
        }
        let values = self.read_object()?;

        for spec in &setup.config.inputs {
            let given = match values.get(&spec.name) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Bool(b)) => Some(b.to_string()),
                Some(Value::Number(n)) => Some(n.to_string()),
                Some(_) => {
                    return Err(InputError::InvalidValue {
                        name: spec.name.clone(),
                        message: "expected a string, boolean or number".into(),
                    })
                }
            };
            match given {
                Some(value) => push_input(invocation, spec, &value)?,
                None => {
                    if let Some(value) = fallback(spec)? {
                        push_input(invocation, spec, value)?;
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
    use crate::core::formula::{InputKind, InputSpec};
    use crate::runner::mock::sample_setup;
    use std::io::Cursor;

    fn setup() -> Setup {
        let mut setup = sample_setup();
        setup.config.inputs = vec![
            InputSpec {
                name: "name".into(),
                kind: InputKind::Text,
                label: None,
                default: None,
                required: true,
            },
            InputSpec {
                name: "loud".into(),
                kind: InputKind::Bool,
                label: None,
                default: Some("false".into()),
                required: false,
            },
            InputSpec {
                name: "count".into(),
                kind: InputKind::Text,
                label: None,
                default: None,
                required: false,
            },
        ];
        setup
    }

    fn run(json: &str) -> Result<Invocation, InputError> {
        let strategy = StdinInput::from_reader(Cursor::new(json.to_string()));
        let mut inv = Invocation::new("docker");
        strategy.inputs(&mut inv, &setup(), &Flags::new())?;
        Ok(inv)
    }

    #[test]
    fn reads_scalars() {
        let inv = run(r#"{"name": "rit", "loud": true, "count": 3}"#).expect("inputs");
        assert_eq!(inv.env_entries(), ["NAME=rit", "LOUD=true", "COUNT=3"]);
    }

    #[test]
    fn null_and_absent_use_defaults() {
        let inv = run(r#"{"name": "rit", "loud": null}"#).expect("inputs");
        assert_eq!(inv.env_entries(), ["NAME=rit", "LOUD=false"]);
    }

    #[test]
    fn rejects_non_object() {
        let err = run("[1, 2]").unwrap_err();
        assert!(matches!(err, InputError::Read(_)));
    }

    #[test]
    fn rejects_nested_values() {
        let err = run(r#"{"name": {"first": "rit"}}"#).unwrap_err();
        assert!(matches!(err, InputError::InvalidValue { ref name, .. } if name == "name"));
    }

    #[test]
    fn value_with_newline_cannot_add_variables() {
        let err = run(r#"{"name": "hi\nDOCKER_EXECUTION=false"}"#).unwrap_err();
        assert!(matches!(err, InputError::InvalidValue { ref name, .. } if name == "name"));
    }

    #[test]
    fn empty_stdin_with_required_input_fails() {
        let err = run("").unwrap_err();
        assert!(matches!(err, InputError::MissingInput(ref n) if n == "name"));
    }

    #[test]
    fn no_inputs_does_not_read() {
        let strategy = StdinInput::from_reader(Cursor::new("not json".to_string()));
        let mut inv = Invocation::new("docker");
        strategy
            .inputs(&mut inv, &sample_setup(), &Flags::new())
            .expect("nothing to read");
    }
}
