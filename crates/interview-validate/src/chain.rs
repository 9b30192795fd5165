//! Ordered validator composition.
//!
//! A `ValidatorChain` reduces a value left-to-right through its stages. Each
//! stage sees the previous stage's *output* value; errors are concatenated
//! in stage order.

use serde_json::Value;

use interview_contracts::validation::ValidationResult;
use interview_core::traits::Validator;

/// An ordered list of validators applied as one.
#[derive(Default)]
pub struct ValidatorChain {
    stages: Vec<Box<dyn Validator>>,
}

impl ValidatorChain {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage to the end of the chain.
    pub fn push(&mut self, stage: Box<dyn Validator>) {
        self.stages.push(stage);
    }

    /// Builder form of [`push`](Self::push).
    pub fn then(mut self, stage: impl Validator + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Validator for ValidatorChain {
    fn validate(&self, value: &Value) -> ValidationResult {
        self.stages.iter().fold(
            ValidationResult::valid(value.clone()),
            |mut acc, stage| {
                let result = stage.validate(&acc.value);
                acc.value = result.value;
                acc.errors.extend(result.errors);
                acc
            },
        )
    }
}

impl std::fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("stages", &self.stages.len())
            .finish()
    }
}
