//! runner::input
//!
//! Input resolution dispatch.
//!
//! # Design
//!
//! Each [`InputType`] has one strategy slot. [`InputResolver::resolve`]
//! picks the slot with an exhaustive `match`, so adding an input type is a
//! compile error until dispatch handles it. A slot with no registered
//! strategy resolves to [`InputError::UnsupportedInputMode`].
//!
//! # Example
//!
//! ```
//! use formula_runner::core::types::InputType;
//! use formula_runner::runner::input::{InputError, InputResolver};
//! use formula_runner::runner::inputs::FlagInput;
//!
//! let resolver = InputResolver::new().with(InputType::Flag, FlagInput);
//!
//! assert!(resolver.resolve(InputType::Flag).is_ok());
//! assert!(matches!(
//!     resolver.resolve(InputType::Prompt),
//!     Err(InputError::UnsupportedInputMode(InputType::Prompt))
//! ));
//! ```

use std::fmt;

use thiserror::Error;

use crate::core::types::{Flags, InputType, Setup};
use crate::ui::prompts::PromptError;

use super::invocation::Invocation;

/// Errors from resolving or applying inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// No strategy handles this input type.
    #[error("unsupported input mode: {0}")]
    UnsupportedInputMode(InputType),

    /// A required input has no value.
    #[error("missing required input '{0}'")]
    MissingInput(String),

    /// A value does not fit the input's declared kind.
    #[error("invalid value for input '{name}': {message}")]
    InvalidValue { name: String, message: String },

    /// Input could not be read.
    #[error("failed to read inputs: {0}")]
    Read(String),

    /// An interactive prompt failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Extends an invocation with mode-specific inputs.
pub trait InputStrategy: Send + Sync {
    fn inputs(
        &self,
        invocation: &mut Invocation,
        setup: &Setup,
        flags: &Flags,
    ) -> Result<(), InputError>;
}

/// Lookup from input type to strategy.
#[derive(Default)]
pub struct InputResolver {
    stdin: Option<Box<dyn InputStrategy>>,
    prompt: Option<Box<dyn InputStrategy>>,
    flag: Option<Box<dyn InputStrategy>>,
}

impl InputResolver {
    /// Create a resolver with no strategies registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the strategy for `input_type`, replacing any previous one.
    pub fn with(mut self, input_type: InputType, strategy: impl InputStrategy + 'static) -> Self {
        *self.slot_mut(input_type) = Some(Box::new(strategy));
        self
    }

    /// Find the strategy for `input_type`.
    pub fn resolve(&self, input_type: InputType) -> Result<&dyn InputStrategy, InputError> {
        let slot = match input_type {
            InputType::Stdin => &self.stdin,
            InputType::Prompt => &self.prompt,
            InputType::Flag => &self.flag,
        };
        slot.as_deref()
            .ok_or(InputError::UnsupportedInputMode(input_type))
    }

    /// Input types that currently resolve.
    pub fn supported(&self) -> Vec<InputType> {
        InputType::ALL
            .into_iter()
            .filter(|t| self.resolve(*t).is_ok())
            .collect()
    }

    fn slot_mut(&mut self, input_type: InputType) -> &mut Option<Box<dyn InputStrategy>> {
        match input_type {
            InputType::Stdin => &mut self.stdin,
            InputType::Prompt => &mut self.prompt,
            InputType::Flag => &mut self.flag,
        }
    }
}

impl fmt::Debug for InputResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputResolver")
            .field("supported", &self.supported())
            .finish()
    }
}
