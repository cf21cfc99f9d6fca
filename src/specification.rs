//! Whole specifications: parsing, matching and generating line-oriented clause text.

use std::fmt;

use tracing::info;

use crate::error::SpecError;
use crate::features::{
    split_clause, CurvesCount, Feature, InputFeature, LineFeature, MarkingContext,
};
use crate::geometry::Input;
use crate::selection::{Assignments, LineSelector};

/// Separator between clauses in generated text.
pub const CLAUSE_SEPARATOR: &str = "\r\n";

/// One clause of a specification.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// A feature of the whole answer.
    Input(InputFeature),
    /// A line feature applied through a selector.
    Line(LineSelector, LineFeature),
}

impl Clause {
    /// Tests the clause, narrowing `assignments` if it mentions line names and holds.
    pub fn test(
        &self,
        input: &Input,
        context: &MarkingContext,
        assignments: &mut Assignments,
    ) -> bool {
        match self {
            Self::Input(feature) => feature.test(input, context, assignments),
            Self::Line(selector, feature) => {
                selector.matches(input, assignments, |line| feature.test(line, context))
            }
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(feature) => write!(f, "{feature}"),
            Self::Line(selector, feature) => write!(f, "{selector}{feature}"),
        }
    }
}

/// A parsed specification: every clause must hold for an answer to match.
///
/// When no clause counts curves, relates lines, or addresses a line by number or name, the answer
/// must also have exactly one curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    clauses: Vec<Clause>,
    single_curve: bool,
}

impl Specification {
    /// Creates a specification from clauses.
    #[must_use]
    pub fn new(clauses: Vec<Clause>) -> Self {
        let single_curve = clauses.iter().all(|clause| {
            matches!(clause, Clause::Line(LineSelector::Any, _))
        });
        Self {
            clauses,
            single_curve,
        }
    }

    /// Parses specification text, one clause per line.
    ///
    /// Lines may end in `\r\n` or `\n`; blank lines are ignored. A `line: N;` or `match: name;`
    /// prefix may scope several `;`-separated line clauses.
    ///
    /// # Errors
    ///
    /// Returns a `SpecError` for the first clause that cannot be parsed.
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        let mut clauses = Vec::new();
        for item in text.lines().map(str::trim).filter(|item| !item.is_empty()) {
            if let Some(feature) = InputFeature::try_parse(item)? {
                clauses.push(Clause::Input(feature));
                continue;
            }

            let (tag, selector, rest) = match split_clause(item) {
                Some((tag, data)) if tag == LineSelector::TAG => {
                    let (selector, rest) = LineSelector::parse_nth(data)?;
                    (LineSelector::TAG, selector, rest)
                }
                Some((tag, data)) if tag == LineSelector::MATCH_TAG => {
                    let (selector, rest) = LineSelector::parse_named(data)?;
                    (LineSelector::MATCH_TAG, selector, rest)
                }
                _ => {
                    clauses.push(Clause::Line(LineSelector::Any, LineFeature::parse(item)?));
                    continue;
                }
            };

            let before = clauses.len();
            for sub_item in rest.split(';').map(str::trim).filter(|s| !s.is_empty()) {
                clauses.push(Clause::Line(selector.clone(), LineFeature::parse(sub_item)?));
            }
            if clauses.len() == before {
                return Err(SpecError::invalid(tag, item, "no line clause follows the selector"));
            }
        }
        Ok(Self::new(clauses))
    }

    /// Describes `input` as a specification it matches.
    ///
    /// Clauses come in a fixed order: the curve count and line crossings, then for each line its
    /// sector path, slope, symmetry and stationary points. Lines are addressed by number, and
    /// also by name when they share some x.
    #[must_use]
    pub fn generate(input: &Input, context: &MarkingContext) -> Self {
        let mut clauses: Vec<Clause> = InputFeature::generate_all(input, context)
            .into_iter()
            .map(Clause::Input)
            .collect();
        for (selector, line) in LineSelector::for_generation(input) {
            clauses.extend(
                LineFeature::generate_all(line, context)
                    .into_iter()
                    .map(|feature| Clause::Line(selector.clone(), feature)),
            );
        }
        Self::new(clauses)
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns `true` if the implicit single curve check applies.
    #[must_use]
    pub fn expects_single_curve(&self) -> bool {
        self.single_curve
    }

    /// Tests `input` against every clause in order, logging the ones that fail.
    ///
    /// Line names are bound afresh for each answer and shared by all clauses.
    #[must_use]
    pub fn matches(&self, input: &Input, context: &MarkingContext) -> bool {
        let mut assignments = Assignments::default();
        let mut failed: Vec<String> = self
            .clauses
            .iter()
            .filter(|clause| !clause.test(input, context, &mut assignments))
            .map(ToString::to_string)
            .collect();

        if self.single_curve && !CurvesCount::new(1).test(input, context) {
            failed.push(format!("{}: 1 (implicit)", CurvesCount::TAG));
        }

        if failed.is_empty() {
            true
        } else {
            info!(failed = %failed.join("; "), "specification did not match");
            false
        }
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(CLAUSE_SEPARATOR)?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
