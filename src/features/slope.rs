use std::fmt;

use crate::error::SpecError;
use crate::geometry::Line;
use crate::settings::Settings;

use super::{Feature, MarkingContext};

/// Which end of a line a slope is measured at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Position {
    Start,
    End,
}

impl Position {
    const ALL: [Position; 2] = [Position::Start, Position::End];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|position| position.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognisable slope. Anything between steep and flat has no gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gradient {
    /// Nearly horizontal.
    Flat,
    /// Nearly vertical, rising left to right.
    Up,
    /// Nearly vertical, falling left to right.
    Down,
}

impl Gradient {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        [Self::Flat, Self::Up, Self::Down]
            .into_iter()
            .find(|gradient| gradient.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Measures the gradient at one end of `line`, or `None` if it is neither flat nor steep.
    #[must_use]
    pub fn measure(line: &Line, position: Position, settings: &Settings) -> Option<Self> {
        let end = match position {
            Position::Start => line.head(settings.slope_window),
            Position::End => line.tail(settings.slope_window),
        };
        let size = end.size();
        let width = size.x.abs();
        let height = size.y;

        if (width / height).abs() > settings.slope_threshold {
            return Some(Self::Flat);
        }
        let steepness = height / width;
        if steepness.abs() > settings.slope_threshold {
            return Some(if steepness > 0.0 { Self::Up } else { Self::Down });
        }
        None
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The line is flat, or steeply rising or falling, at its start and/or end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slope {
    // Sorted by position, at most one entry per position.
    expected: Vec<(Position, Gradient)>,
}

impl Slope {
    /// Returns the expected gradient at `position`, if one is stated.
    #[must_use]
    pub fn at(&self, position: Position) -> Option<Gradient> {
        self.expected
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, gradient)| *gradient)
    }
}

impl Feature for Slope {
    const TAG: &'static str = "slope";
    type Subject = Line;

    fn deserialize(data: &str) -> Result<Self, SpecError> {
        let mut expected: Vec<(Position, Gradient)> = Vec::with_capacity(2);
        for item in data.split(',') {
            let (position, gradient) = item.split_once('=').ok_or_else(|| {
                SpecError::invalid(Self::TAG, data, format!("`{}` is not position=slope", item.trim()))
            })?;
            let position = Position::from_name(position).ok_or_else(|| {
                SpecError::invalid(Self::TAG, data, format!("unknown position `{}`", position.trim()))
            })?;
            let gradient = Gradient::from_name(gradient).ok_or_else(|| {
                SpecError::invalid(Self::TAG, data, format!("unknown slope `{}`", gradient.trim()))
            })?;
            if expected.iter().any(|(p, _)| *p == position) {
                return Err(SpecError::invalid(
                    Self::TAG,
                    data,
                    format!("{position} given more than once"),
                ));
            }
            expected.push((position, gradient));
        }
        expected.sort_by_key(|(position, _)| *position);
        Ok(Self { expected })
    }

    fn serialize(&self) -> String {
        self.expected
            .iter()
            .map(|(position, gradient)| format!("{position}={gradient}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn test(&self, line: &Line, context: &MarkingContext) -> bool {
        self.expected.iter().all(|(position, gradient)| {
            Gradient::measure(line, *position, context.settings()) == Some(*gradient)
        })
    }

    fn generate(line: &Line, context: &MarkingContext) -> Option<Self> {
        let expected: Vec<(Position, Gradient)> = Position::ALL
            .into_iter()
            .filter_map(|position| {
                Gradient::measure(line, position, context.settings()).map(|g| (position, g))
            })
            .collect();
        (!expected.is_empty()).then_some(Self { expected })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn sampled(f: impl Fn(f64) -> f64, from: f64, to: f64, steps: u32) -> Line {
        Line::from_points(
            (0..=steps)
                .map(|i| {
                    let x = from + (to - from) * f64::from(i) / f64::from(steps);
                    Point2::new(x, f(x))
                })
                .collect(),
        )
    }

    fn measure(line: &Line, position: Position) -> Option<Gradient> {
        Gradient::measure(line, position, &Settings::default())
    }

    #[test]
    fn exponential_is_flat_then_steep() {
        let line = sampled(f64::exp, -5.0, 5.0, 100);
        assert_eq!(measure(&line, Position::Start), Some(Gradient::Flat));
        assert_eq!(measure(&line, Position::End), Some(Gradient::Up));
    }

    #[test]
    fn falling_steeply() {
        let line = sampled(|x| -x.exp(), -5.0, 5.0, 100);
        assert_eq!(measure(&line, Position::End), Some(Gradient::Down));
    }

    #[test]
    fn diagonal_has_no_gradient() {
        let line = sampled(|x| x, -1.0, 1.0, 10);
        assert_eq!(measure(&line, Position::Start), None);
        assert!(Slope::generate(&line, &MarkingContext::default()).is_none());
    }

    #[test]
    fn vertical_line_is_steep() {
        let line = Line::from_points(vec![Point2::new(1.0, 0.0), Point2::new(1.0, 2.0)]);
        assert_eq!(measure(&line, Position::Start), Some(Gradient::Up));
    }

    #[test]
    fn single_point_has_no_gradient() {
        let line = Line::from_points(vec![Point2::new(1.0, 0.0)]);
        assert_eq!(measure(&line, Position::Start), None);
    }

    #[test]
    fn parses_in_either_order() {
        let slope = Slope::deserialize(" END = up, start=FLAT").unwrap();
        assert_eq!(slope.at(Position::Start), Some(Gradient::Flat));
        assert_eq!(slope.at(Position::End), Some(Gradient::Up));
        assert_eq!(slope.serialize(), "start=flat, end=up");
    }

    #[test]
    fn rejects_malformed_clauses() {
        assert!(Slope::deserialize("start=up, start=down").is_err());
        assert!(Slope::deserialize("middle=up").is_err());
        assert!(Slope::deserialize("start=sideways").is_err());
        assert!(Slope::deserialize("start").is_err());
    }

    #[test]
    fn generated_slope_matches_its_line() {
        let context = MarkingContext::default();
        let line = sampled(f64::exp, -5.0, 5.0, 100);
        let slope = Slope::generate(&line, &context).unwrap();
        assert_eq!(slope.serialize(), "start=flat, end=up");
        assert!(Slope::deserialize(&slope.serialize()).unwrap().test(&line, &context));
        assert!(!Slope::deserialize("end=down").unwrap().test(&line, &context));
    }
}
