use tracing::info;

use crate::error::Result;
use crate::features::MarkingContext;
use crate::geometry::Input;
use crate::settings::Settings;
use crate::specification::Specification;
use crate::wire::{GraphAnswer, GraphSolutions};

use super::AnswerToInput;

/// Marks an answer against a question's accepted shapes.
///
/// Every graph definition is parsed before any is tested, so a broken definition is reported
/// even when an earlier one would have matched.
pub struct Mark<'a, R> {
    solutions: &'a GraphSolutions<R>,
    context: MarkingContext,
}

impl<'a, R> Mark<'a, R> {
    /// Creates a new `Mark` operation.
    #[must_use]
    pub fn new(solutions: &'a GraphSolutions<R>, settings: &Settings) -> Self {
        Self::with_context(solutions, MarkingContext::new(settings))
    }

    /// Creates a new `Mark` operation with a prepared context.
    #[must_use]
    pub fn with_context(solutions: &'a GraphSolutions<R>, context: MarkingContext) -> Self {
        Self { solutions, context }
    }

    /// Executes the operation, returning the response of the first matching definition or the
    /// unmatched response.
    ///
    /// # Errors
    ///
    /// Returns a `SpecError` if any graph definition cannot be parsed.
    pub fn execute(&self, answer: &GraphAnswer) -> Result<&'a R> {
        self.execute_input(&AnswerToInput::new(answer).execute())
    }

    /// Executes the operation on an already converted answer.
    ///
    /// # Errors
    ///
    /// Returns a `SpecError` if any graph definition cannot be parsed.
    pub fn execute_input(&self, input: &Input) -> Result<&'a R> {
        let specifications = self
            .solutions
            .answers
            .iter()
            .map(|item| Specification::parse(&item.graph_definition))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let matched = specifications
            .iter()
            .position(|specification| specification.matches(input, &self.context));
        match matched {
            Some(index) => {
                info!(index, "answer matched graph definition");
                Ok(&self.solutions.answers[index].response)
            }
            None => {
                info!("answer matched no graph definition");
                Ok(&self.solutions.unmatched_response)
            }
        }
    }
}
