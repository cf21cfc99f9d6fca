use crate::geometry::{Input, Line, PointKind, PointOfInterest};
use crate::math::Point2;
use crate::wire::{Curve, GraphAnswer, WirePoint};

/// Converts a sketched answer into canonical [`Input`].
///
/// Each curve becomes a line drawn left to right, and lines are ordered by where they start.
pub struct AnswerToInput<'a> {
    answer: &'a GraphAnswer,
}

impl<'a> AnswerToInput<'a> {
    /// Creates a new `AnswerToInput` conversion.
    #[must_use]
    pub fn new(answer: &'a GraphAnswer) -> Self {
        Self { answer }
    }

    /// Executes the conversion.
    #[must_use]
    pub fn execute(&self) -> Input {
        Input::canonical(self.answer.curves.iter().map(Line::from).collect())
    }
}

fn to_point(p: &WirePoint) -> Point2 {
    Point2::new(p.x, p.y)
}

impl From<&Curve> for Line {
    /// Keeps the curve's own maxima and minima; if it lists neither, turning points are found
    /// from the drawn points.
    fn from(curve: &Curve) -> Self {
        let points: Vec<Point2> = curve.pts.iter().map(to_point).collect();
        if curve.maxima.is_none() && curve.minima.is_none() {
            return Line::with_turning_points(points);
        }

        let flagged = |list: &Option<Vec<WirePoint>>, kind: PointKind| -> Vec<PointOfInterest> {
            list.iter()
                .flatten()
                .map(|p| PointOfInterest::new(to_point(p), kind))
                .collect()
        };
        let mut points_of_interest = flagged(&curve.maxima, PointKind::Maxima);
        points_of_interest.extend(flagged(&curve.minima, PointKind::Minima));
        Line::new(points, points_of_interest)
    }
}
