use crate::error::SpecError;
use crate::geometry::{Line, PointKind, Sector};

use super::{Feature, MarkingContext};

/// The line's stationary points, left to right, are of these kinds and in these sectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Points {
    expected: Vec<(PointKind, Sector)>,
}

impl Points {
    #[must_use]
    pub fn new(expected: Vec<(PointKind, Sector)>) -> Self {
        Self { expected }
    }

    #[must_use]
    pub fn expected(&self) -> &[(PointKind, Sector)] {
        &self.expected
    }
}

impl Feature for Points {
    const TAG: &'static str = "points";
    type Subject = Line;

    fn deserialize(data: &str) -> Result<Self, SpecError> {
        data.split(',')
            .map(|item| {
                let (kind, sector) = split_preposition(item.trim()).ok_or_else(|| {
                    SpecError::invalid(Self::TAG, data, format!("`{}` is not `kind in sector`", item.trim()))
                })?;
                let kind = PointKind::from_name(kind).ok_or_else(|| {
                    SpecError::invalid(Self::TAG, data, format!("unknown point kind `{}`", kind.trim()))
                })?;
                Ok((kind, Sector::from_name(sector)?))
            })
            .collect::<Result<Vec<_>, SpecError>>()
            .map(Self::new)
    }

    fn serialize(&self) -> String {
        self.expected
            .iter()
            .map(|(kind, sector)| format!("{kind} {} {sector}", preposition(*sector)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn test(&self, line: &Line, context: &MarkingContext) -> bool {
        let actual = line.points_of_interest();
        actual.len() == self.expected.len()
            && self.expected.iter().zip(actual).all(|((kind, sector), poi)| {
                *kind == poi.kind && sector.region(context.settings()).contains(&poi.point)
            })
    }

    fn generate(line: &Line, context: &MarkingContext) -> Option<Self> {
        let expected: Vec<(PointKind, Sector)> = line
            .points_of_interest()
            .iter()
            .filter_map(|poi| {
                context
                    .classifier()
                    .classify(&poi.point)
                    .map(|sector| (poi.kind, sector))
            })
            .collect();
        (!expected.is_empty()).then(|| Self::new(expected))
    }
}

/// Splits `maxima in topLeft` (or `on`, `at`) into kind and sector at the first preposition.
fn split_preposition(item: &str) -> Option<(&str, &str)> {
    [" in ", " on ", " at "]
        .into_iter()
        .filter_map(|word| item.find(word).map(|at| (at, word.len())))
        .min_by_key(|(at, _)| *at)
        .map(|(at, len)| (&item[..at], &item[at + len..]))
}

fn preposition(sector: Sector) -> &'static str {
    match sector {
        Sector::Origin | Sector::RelaxedOrigin => "at",
        _ => "in",
    }
}
