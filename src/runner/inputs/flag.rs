//! runner::inputs::flag
//!
//! Inputs supplied on the command line.

use crate::core::types::{Flags, Setup};
use crate::runner::input::{InputError, InputStrategy};
use crate::runner::invocation::Invocation;

use super::{fallback, push_input};

/// Reads each declared input from the `--flag` pairs.
///
/// A missing flag falls back to the input's default. Flags naming no
/// declared input are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagInput;

impl InputStrategy for FlagInput {
    fn inputs(
        &self,
        invocation: &mut Invocation,
        setup: &Setup,
        flags: &Flags,
    ) -> Result<(), InputError> {
        for spec in &setup.config.inputs {
            let value = match flags.get(&spec.name) {
                Some(value) => Some(value),
                None => fallback(spec)?,
            };
            if let Some(value) = value {
                push_input(invocation, spec, value)?;
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

    fn setup_with(inputs: Vec<InputSpec>) -> Setup {
        let mut setup = sample_setup();
        setup.config.inputs = inputs;
        setup
    }

    fn input(name: &str, default: Option<&str>, required: bool) -> InputSpec {
        InputSpec {
            name: name.into(),
            kind: InputKind::Text,
            label: None,
            default: default.map(Into::into),
            required,
        }
    }

    #[test]
    fn flags_then_defaults_in_declaration_order() {
        let setup = setup_with(vec![
            input("name", None, true),
            input("color", Some("blue"), false),
            input("extra", None, false),
        ]);
        let mut flags = Flags::new();
        flags.insert("name", "rit");
        flags.insert("unknown", "ignored");

        let mut inv = Invocation::new("docker");
        FlagInput.inputs(&mut inv, &setup, &flags).expect("inputs");
        assert_eq!(inv.env_entries(), ["NAME=rit", "COLOR=blue"]);
    }

    #[test]
    fn missing_required_flag_fails() {
        let setup = setup_with(vec![input("name", None, true)]);
        let mut inv = Invocation::new("docker");
        let err = FlagInput
            .inputs(&mut inv, &setup, &Flags::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required input 'name'");
    }

    #[test]
    fn no_declared_inputs_adds_nothing() {
        let setup = setup_with(Vec::new());
        let mut flags = Flags::new();
        flags.insert("name", "rit");
        let mut inv = Invocation::new("docker");
        FlagInput.inputs(&mut inv, &setup, &flags).expect("inputs");
        assert!(inv.env_entries().is_empty());
    }
}
