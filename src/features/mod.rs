mod curves;
mod intersects;
mod points;
mod slope;
mod symmetry;
mod through;

pub use curves::CurvesCount;
pub use intersects::Intersects;
pub use points::Points;
pub use slope::{Gradient, Position, Slope};
pub use symmetry::{Symmetry, SymmetryType};
pub use through::Through;

use std::fmt;

use crate::error::SpecError;
use crate::geometry::{Input, Line, Region, SectorClassifier};
use crate::selection::Assignments;
use crate::settings::Settings;

/// Shared state for testing and generating features: the settings and the regions built from
/// them.
#[derive(Debug, Clone)]
pub struct MarkingContext {
    settings: Settings,
    classifier: SectorClassifier,
    relaxed_origin: Region,
}

impl MarkingContext {
    /// Builds the context for `settings` with the default sector order.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::with_classifier(settings, SectorClassifier::new(settings))
    }

    /// Builds the context with a custom classifier.
    #[must_use]
    pub fn with_classifier(settings: &Settings, classifier: SectorClassifier) -> Self {
        Self {
            settings: *settings,
            classifier,
            relaxed_origin: Region::relaxed_origin(settings),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn classifier(&self) -> &SectorClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn relaxed_origin(&self) -> &Region {
        &self.relaxed_origin
    }
}

impl Default for MarkingContext {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

/// One kind of clause in a specification.
///
/// A feature parses from the data after its tag, prints back to the same data, tests a subject
/// and, where it can, describes a subject.
pub trait Feature: Sized {
    /// The tag in front of the clause, e.g. `through`.
    const TAG: &'static str;

    /// What the feature is tested against: a [`Line`] or a whole [`Input`].
    type Subject: ?Sized;

    /// Parses the clause data (the text after `TAG:`).
    ///
    /// # Errors
    ///
    /// Returns a `SpecError` if the data is malformed.
    fn deserialize(data: &str) -> Result<Self, SpecError>;

    /// Prints the clause data, the inverse of [`deserialize`](Self::deserialize).
    fn serialize(&self) -> String;

    /// Tests whether `subject` has this feature.
    fn test(&self, subject: &Self::Subject, context: &MarkingContext) -> bool;

    /// Describes `subject`, or `None` if this feature has nothing to say about it.
    fn generate(subject: &Self::Subject, context: &MarkingContext) -> Option<Self>;
}

/// Splits `tag: data` into a lower-cased tag and the data.
pub(crate) fn split_clause(clause: &str) -> Option<(String, &str)> {
    let (tag, data) = clause.split_once(':')?;
    Some((tag.trim().to_ascii_lowercase(), data))
}

/// A clause tested against a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineFeature {
    Through(Through),
    Slope(Slope),
    Symmetry(Symmetry),
    Points(Points),
}

impl LineFeature {
    /// Parses a `tag: data` clause.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::UnknownFeature` if the tag is not a line feature, or the feature's
    /// own error if its data is malformed.
    pub fn parse(clause: &str) -> Result<Self, SpecError> {
        let unknown = || SpecError::UnknownFeature(clause.trim().to_owned());
        let (tag, data) = split_clause(clause).ok_or_else(unknown)?;
        match tag.as_str() {
            t if t == Through::TAG => Through::deserialize(data).map(Self::Through),
            t if t == Slope::TAG => Slope::deserialize(data).map(Self::Slope),
            t if t == Symmetry::TAG => Symmetry::deserialize(data).map(Self::Symmetry),
            t if t == Points::TAG => Points::deserialize(data).map(Self::Points),
            _ => Err(unknown()),
        }
    }

    /// Tests whether `line` has this feature.
    #[must_use]
    pub fn test(&self, line: &Line, context: &MarkingContext) -> bool {
        match self {
            Self::Through(feature) => feature.test(line, context),
            Self::Slope(feature) => feature.test(line, context),
            Self::Symmetry(feature) => feature.test(line, context),
            Self::Points(feature) => feature.test(line, context),
        }
    }

    /// Describes `line` with every line feature that applies, in through, slope, symmetry,
    /// points order.
    #[must_use]
    pub fn generate_all(line: &Line, context: &MarkingContext) -> Vec<Self> {
        [
            Through::generate(line, context).map(Self::Through),
            Slope::generate(line, context).map(Self::Slope),
            Symmetry::generate(line, context).map(Self::Symmetry),
            Points::generate(line, context).map(Self::Points),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Returns the clause tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Through(_) => Through::TAG,
            Self::Slope(_) => Slope::TAG,
            Self::Symmetry(_) => Symmetry::TAG,
            Self::Points(_) => Points::TAG,
        }
    }

    fn data(&self) -> String {
        match self {
            Self::Through(feature) => feature.serialize(),
            Self::Slope(feature) => feature.serialize(),
            Self::Symmetry(feature) => feature.serialize(),
            Self::Points(feature) => feature.serialize(),
        }
    }
}

impl fmt::Display for LineFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.tag(), self.data())
    }
}

/// A clause tested against the whole answer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputFeature {
    Curves(CurvesCount),
    Intersects(Intersects),
}

impl InputFeature {
    /// Parses a clause if its tag names an input feature.
    ///
    /// Returns `Ok(None)` for any other tag.
    ///
    /// # Errors
    ///
    /// Returns the feature's error if its data is malformed.
    pub fn try_parse(clause: &str) -> Result<Option<Self>, SpecError> {
        let Some((tag, data)) = split_clause(clause) else {
            return Ok(None);
        };
        match tag.as_str() {
            t if t == CurvesCount::TAG => {
                CurvesCount::deserialize(data).map(|f| Some(Self::Curves(f)))
            }
            t if t == Intersects::TAG => {
                Intersects::deserialize(data).map(|f| Some(Self::Intersects(f)))
            }
            _ => Ok(None),
        }
    }

    /// Tests whether `input` has this feature under the shared line name bindings.
    pub fn test(
        &self,
        input: &Input,
        context: &MarkingContext,
        assignments: &mut Assignments,
    ) -> bool {
        match self {
            Self::Curves(feature) => feature.test(input, context),
            Self::Intersects(feature) => feature.test_bound(input, context, assignments),
        }
    }

    /// Describes `input` with every input feature that applies: the curve count, then each
    /// crossing pair of lines.
    #[must_use]
    pub fn generate_all(input: &Input, context: &MarkingContext) -> Vec<Self> {
        CurvesCount::generate(input, context)
            .map(Self::Curves)
            .into_iter()
            .chain(
                Intersects::generate_each(input, context)
                    .into_iter()
                    .map(Self::Intersects),
            )
            .collect()
    }
}

impl fmt::Display for InputFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Curves(feature) => write!(f, "{}: {}", CurvesCount::TAG, feature.serialize()),
            Self::Intersects(feature) => write!(f, "{}: {}", Intersects::TAG, feature.serialize()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_case_insensitive() {
        let feature = LineFeature::parse("  THROUGH : topLeft, topRight").unwrap();
        assert_eq!(feature.tag(), "through");
        assert!(matches!(LineFeature::parse("Slope: start=up"), Ok(LineFeature::Slope(_))));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!(matches!(
            LineFeature::parse("colour: red"),
            Err(SpecError::UnknownFeature(_))
        ));
        assert!(matches!(
            LineFeature::parse("no tag at all"),
            Err(SpecError::UnknownFeature(_))
        ));
    }

    #[test]
    fn input_features_ignore_other_tags() {
        assert!(InputFeature::try_parse("through: origin").unwrap().is_none());
        assert!(matches!(
            InputFeature::try_parse("Curves: 2"),
            Ok(Some(InputFeature::Curves(_)))
        ));
        assert!(InputFeature::try_parse("curves: two").is_err());
        assert!(matches!(
            InputFeature::try_parse("Intersects: a to b at origin"),
            Ok(Some(InputFeature::Intersects(_)))
        ));
        assert!(InputFeature::try_parse("intersects: 1 to 2 at origin").is_err());
    }

    #[test]
    fn display_prefixes_tag() {
        let feature = LineFeature::parse("symmetry:odd").unwrap();
        assert_eq!(feature.to_string(), "symmetry: odd");
        let feature = InputFeature::try_parse("curves:3").unwrap().unwrap();
        assert_eq!(feature.to_string(), "curves: 3");
        let feature = InputFeature::try_parse("intersects:a to b nowhere").unwrap().unwrap();
        assert_eq!(feature.to_string(), "intersects: a to b nowhere");
    }
}
