use crate::features::MarkingContext;
use crate::settings::Settings;
use crate::specification::Specification;
use crate::wire::GraphAnswer;

use super::AnswerToInput;

/// Writes the specification text an answer matches.
pub struct GenerateSpec {
    context: MarkingContext,
}

impl GenerateSpec {
    /// Creates a new `GenerateSpec` operation.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            context: MarkingContext::new(settings),
        }
    }

    /// Executes the operation, returning `\r\n`-separated clauses.
    #[must_use]
    pub fn execute(&self, answer: &GraphAnswer) -> String {
        let input = AnswerToInput::new(answer).execute();
        Specification::generate(&input, &self.context).to_string()
    }
}
