//! runner::inputs
//!
//! Built-in input strategies.
//!
//! | Mode     | Strategy        | Source of values                       |
//! |----------|-----------------|----------------------------------------|
//! | `flag`   | [`FlagInput`]   | `--flag KEY=VALUE` pairs               |
//! | `stdin`  | [`StdinInput`]  | one JSON object on host stdin          |
//! | `prompt` | [`PromptInput`] | questions on the controlling terminal  |
//!
//! Every strategy walks the formula's declared inputs in order and pushes
//! one `NAME=value` entry per resolved input, `NAME` being the upper-cased
//! input name.

mod flag;
mod prompt;
mod stdin;

pub use flag::FlagInput;
pub use prompt::PromptInput;
pub use stdin::StdinInput;

use crate::core::formula::{InputKind, InputSpec};

use super::input::InputError;
use super::invocation::Invocation;

/// Check `value` against the input's kind and push it onto the invocation.
fn push_input(
    invocation: &mut Invocation,
    spec: &InputSpec,
    value: &str,
) -> Result<(), InputError> {
    if spec.kind == InputKind::Bool && value != "true" && value != "false" {
        return Err(InputError::InvalidValue {
            name: spec.name.clone(),
            message: format!("expected 'true' or 'false', got '{}'", value),
        });
    }
    // The env file holds one KEY=VALUE per line.
    if value.contains(['\n', '\r']) {
        return Err(InputError::InvalidValue {
            name: spec.name.clone(),
            message: "value must not contain line breaks".into(),
        });
    }
    invocation.env(&spec.env_name(), value);
    Ok(())
}

/// Value to use when the source has nothing for `spec`.
///
/// `Ok(None)` means the input is optional and is left out.
fn fallback(spec: &InputSpec) -> Result<Option<&str>, InputError> {
    match (&spec.default, spec.required) {
        (Some(default), _) => Ok(Some(default.as_str())),
        (None, true) => Err(InputError::MissingInput(spec.name.clone())),
        (None, false) => Ok(None),
    }
}
