//! runner::inputs::prompt
//!
//! Inputs asked for interactively.

use crate::core::formula::InputKind;
use crate::core::types::{Flags, Setup};
use crate::runner::input::{InputError, InputStrategy};
use crate::runner::invocation::Invocation;
use crate::ui::prompts::Prompter;

use super::push_input;

/// Asks for each declared input through a [`Prompter`].
///
/// Password inputs are read masked, bool inputs as a yes/no question.
#[derive(Debug, Clone)]
pub struct PromptInput<P> {
    prompter: P,
}

impl<P: Prompter> PromptInput<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }
}

impl<P: Prompter> InputStrategy for PromptInput<P> {
    fn inputs(
        &self,
        invocation: &mut Invocation,
        setup: &Setup,
        _flags: &Flags,
    ) -> Result<(), InputError> {
        for spec in &setup.config.inputs {
            let label = spec.prompt_label();
            let value = match spec.kind {
                InputKind::Password => self.prompter.password(label)?,
                InputKind::Bool => {
                    let default = spec.default.as_deref() == Some("true");
                    self.prompter.confirm(label, default)?.to_string()
                }
                InputKind::Text => self.prompter.text(label, spec.default.as_deref())?,
            };
            if value.is_empty() && spec.required {
                return Err(InputError::MissingInput(spec.name.clone()));
            }
            push_input(invocation, spec, &value)?;
        }
        Ok(())
    }
}
