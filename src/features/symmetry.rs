use std::fmt;

use crate::error::SpecError;
use crate::geometry::{Line, Region};
use crate::math::Vector2;
use crate::selection::split_at_stationary_points;

use super::{Feature, MarkingContext};

/// How a line mirrors itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryType {
    None,
    /// Rotationally symmetric about the origin.
    Odd,
    /// Mirrored in the y axis.
    Even,
    /// Mirrored in a vertical line through its middle stationary point(s).
    Symmetric,
    /// Rotationally symmetric about its middle stationary point(s).
    Antisymmetric,
}

impl SymmetryType {
    const ALL: [SymmetryType; 5] = [
        SymmetryType::None,
        SymmetryType::Odd,
        SymmetryType::Even,
        SymmetryType::Symmetric,
        SymmetryType::Antisymmetric,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Odd => "odd",
            Self::Even => "even",
            Self::Symmetric => "symmetric",
            Self::Antisymmetric => "antisymmetric",
        }
    }

    fn about_centre(self) -> Self {
        match self {
            Self::Even => Self::Symmetric,
            Self::Odd => Self::Antisymmetric,
            other => other,
        }
    }

    /// Works out the symmetry of `line`.
    ///
    /// Symmetry about the axes is tried first. Failing that, a line with points of interest is
    /// moved so its middle point of interest (or the midpoint of the middle two) is at the origin
    /// and tried again.
    #[must_use]
    pub fn of(line: &Line, context: &MarkingContext) -> Self {
        let standard = standard_symmetry(line, context);
        if standard != Self::None {
            return standard;
        }

        let pois = line.points_of_interest();
        if pois.is_empty() {
            return standard;
        }
        let middle = pois.len() / 2;
        let centre: Vector2 = if pois.len() % 2 == 1 {
            pois[middle].point.coords
        } else {
            (pois[middle - 1].point.coords + pois[middle].point.coords) * 0.5
        };
        standard_symmetry(&line.shifted_by(&centre), context).about_centre()
    }
}

impl fmt::Display for SymmetryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn standard_symmetry(line: &Line, context: &MarkingContext) -> SymmetryType {
    let mut lefts = split_at_stationary_points(&Region::left_of_x(0.0).clip(line));
    let rights = split_at_stationary_points(&Region::right_of_x(0.0).clip(line));
    if lefts.len() != rights.len() {
        return SymmetryType::None;
    }
    lefts.reverse();

    let mut found: Option<SymmetryType> = None;
    for (left, right) in lefts.iter().zip(&rights) {
        let Some(section) = section_symmetry(left, right, found.is_none(), context) else {
            continue;
        };
        match found {
            None => found = Some(section),
            Some(symmetry) if symmetry != section => return SymmetryType::None,
            Some(_) => {}
        }
    }
    found.unwrap_or(SymmetryType::None)
}

/// Compares one section left of the centre with its mirror on the right. `None` if both are
/// points.
#[allow(clippy::float_cmp)]
fn section_symmetry(
    left: &Line,
    right: &Line,
    innermost: bool,
    context: &MarkingContext,
) -> Option<SymmetryType> {
    let l = left.size();
    let r = right.size();
    if l.x == 0.0 && l.y == 0.0 && r.x == 0.0 && r.y == 0.0 {
        return None;
    }

    let tolerance = context.settings().symmetry_tolerance;
    let x_difference = (r.x - l.x) / r.x;
    let y_difference_odd = (r.y - l.y) / r.y;
    let y_difference_even = (r.y + l.y) / r.y;

    if x_difference.abs() >= tolerance || x_difference.is_nan() {
        return Some(SymmetryType::None);
    }
    if r.y == 0.0 && l.y == 0.0 {
        return Some(SymmetryType::Even);
    }
    if y_difference_odd.abs() < tolerance {
        // An odd line has to pass through the origin.
        let meets_at_origin = left
            .points()
            .last()
            .is_some_and(|p| context.relaxed_origin().contains(p))
            && right
                .points()
                .first()
                .is_some_and(|p| context.relaxed_origin().contains(p));
        return Some(if !innermost || meets_at_origin {
            SymmetryType::Odd
        } else {
            SymmetryType::None
        });
    }
    if y_difference_even.abs() < tolerance {
        return Some(SymmetryType::Even);
    }
    Some(SymmetryType::None)
}

/// The line has the given symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symmetry {
    symmetry: SymmetryType,
}

impl Symmetry {
    #[must_use]
    pub fn new(symmetry: SymmetryType) -> Self {
        Self { symmetry }
    }

    #[must_use]
    pub fn symmetry(&self) -> SymmetryType {
        self.symmetry
    }
}

impl Feature for Symmetry {
    const TAG: &'static str = "symmetry";
    type Subject = Line;

    fn deserialize(data: &str) -> Result<Self, SpecError> {
        SymmetryType::ALL
            .into_iter()
            .find(|symmetry| symmetry.name().eq_ignore_ascii_case(data.trim()))
            .map(Self::new)
            .ok_or_else(|| SpecError::invalid(Self::TAG, data, "unknown symmetry"))
    }

    fn serialize(&self) -> String {
        self.symmetry.name().to_owned()
    }

    fn test(&self, line: &Line, context: &MarkingContext) -> bool {
        SymmetryType::of(line, context) == self.symmetry
    }

    fn generate(line: &Line, context: &MarkingContext) -> Option<Self> {
        match SymmetryType::of(line, context) {
            SymmetryType::None => None,
            symmetry => Some(Self::new(symmetry)),
        }
    }
}
