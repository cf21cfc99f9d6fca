use std::fmt;

use crate::math::intersect_2d::{lerp_2d, line_line_params_2d};
use crate::math::{Point2, Vector2};

/// Crossings closer than this are reported once.
const SAME_CROSSING: f64 = 1e-9;

/// The kind of a stationary point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Maxima,
    Minima,
}

impl PointKind {
    /// Returns the name used in specification text.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Maxima => "maxima",
            Self::Minima => "minima",
        }
    }

    /// Parses a kind name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Maxima, Self::Minima]
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A vertex flagged as a local maximum or minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    pub point: Point2,
    pub kind: PointKind,
}

impl PointOfInterest {
    /// Creates a new point of interest.
    #[must_use]
    pub fn new(point: Point2, kind: PointKind) -> Self {
        Self { point, kind }
    }

    /// Returns this point of interest moved by `-offset`.
    #[must_use]
    pub fn shifted_by(&self, offset: &Vector2) -> Self {
        Self::new(self.point - offset, self.kind)
    }
}

/// One drawn curve as a polyline.
///
/// Consecutive points are joined by straight segments, not by the Bezier curves used for display.
/// Points of interest are kept sorted by ascending x. Equality only considers `points`.
#[derive(Debug, Clone, Default)]
pub struct Line {
    points: Vec<Point2>,
    points_of_interest: Vec<PointOfInterest>,
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Line {
    /// Creates a line, sorting `points_of_interest` by x.
    #[must_use]
    pub fn new(points: Vec<Point2>, mut points_of_interest: Vec<PointOfInterest>) -> Self {
        points_of_interest.sort_by(|a, b| a.point.x.total_cmp(&b.point.x));
        Self {
            points,
            points_of_interest,
        }
    }

    /// Creates a line with no points of interest.
    #[must_use]
    pub fn from_points(points: Vec<Point2>) -> Self {
        Self::new(points, Vec::new())
    }

    /// Creates a line, flagging every interior turning point in y as a point of interest.
    ///
    /// A flat run at a turning point is flagged at its first vertex.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn with_turning_points(points: Vec<Point2>) -> Self {
        let mut points_of_interest = Vec::new();
        let mut previous_delta = 0.0_f64;
        for (i, pair) in points.windows(2).enumerate() {
            let delta = pair[1].y - pair[0].y;
            if delta == 0.0 {
                continue;
            }
            if previous_delta > 0.0 && delta < 0.0 {
                points_of_interest.push(PointOfInterest::new(
                    turning_vertex(&points, i),
                    PointKind::Maxima,
                ));
            } else if previous_delta < 0.0 && delta > 0.0 {
                points_of_interest.push(PointOfInterest::new(
                    turning_vertex(&points, i),
                    PointKind::Minima,
                ));
            }
            previous_delta = delta;
        }
        Self::new(points, points_of_interest)
    }

    /// Returns the polyline vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Returns the points of interest, sorted by x.
    #[must_use]
    pub fn points_of_interest(&self) -> &[PointOfInterest] {
        &self.points_of_interest
    }

    /// Returns `true` if the line has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the first point is to the right of the last point.
    #[must_use]
    pub fn runs_right_to_left(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.x > last.x,
            _ => false,
        }
    }

    /// Returns the line drawn left to right.
    #[must_use]
    pub fn left_to_right(mut self) -> Self {
        if self.runs_right_to_left() {
            self.points.reverse();
        }
        self
    }

    /// Returns the line with every point and point of interest moved by `-offset`.
    #[must_use]
    pub fn shifted_by(&self, offset: &Vector2) -> Self {
        Self::new(
            self.points.iter().map(|p| p - offset).collect(),
            self.points_of_interest
                .iter()
                .map(|poi| poi.shifted_by(offset))
                .collect(),
        )
    }

    /// Returns the line restricted to the first `count` points, without points of interest.
    #[must_use]
    pub fn head(&self, count: usize) -> Self {
        let count = count.min(self.points.len());
        Self::from_points(self.points[..count].to_vec())
    }

    /// Returns the line restricted to the last `count` points, without points of interest.
    #[must_use]
    pub fn tail(&self, count: usize) -> Self {
        let start = self.points.len().saturating_sub(count);
        Self::from_points(self.points[start..].to_vec())
    }

    /// Returns the signed size of the bounding box.
    ///
    /// The width is positive when the line starts left of the box centre and the height is
    /// positive when it starts below the centre. An empty line has zero size.
    #[must_use]
    pub fn size(&self) -> Vector2 {
        let Some(first) = self.points.first() else {
            return Vector2::zeros();
        };

        let mut min = Point2::new(f64::MAX, f64::MAX);
        let mut max = Point2::new(-f64::MAX, -f64::MAX);
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        let centre = nalgebra::center(&min, &max);
        let diff = max - min;
        Vector2::new(
            if first.x < centre.x { diff.x } else { -diff.x },
            if first.y < centre.y { diff.y } else { -diff.y },
        )
    }

    /// Returns the smallest and largest x, or `None` for an empty line.
    #[must_use]
    pub fn horizontal_span(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first.x, first.x), |(min, max), p| (min.min(p.x), max.max(p.x))),
        )
    }

    /// Returns every point where this line crosses `other`, in order along this line.
    ///
    /// Parallel segments never cross, and a crossing found twice (at a shared vertex) is
    /// reported once.
    #[must_use]
    pub fn intersections(&self, other: &Line) -> Vec<Point2> {
        let mut found: Vec<Point2> = Vec::new();
        for a in self.points.windows(2) {
            let mut along: Vec<(f64, Point2)> = other
                .points
                .windows(2)
                .filter(|b| boxes_overlap(a, b))
                .filter_map(|b| line_line_params_2d(&a[0], &a[1], &b[0], &b[1]))
                .filter(|(t, u)| (0.0..=1.0).contains(t) && (0.0..=1.0).contains(u))
                .map(|(t, _)| (t, lerp_2d(&a[0], &a[1], t)))
                .collect();
            along.sort_by(|x, y| x.0.total_cmp(&y.0));
            for (_, p) in along {
                if found.iter().all(|q| (p - q).norm() > SAME_CROSSING) {
                    found.push(p);
                }
            }
        }
        found
    }
}

fn boxes_overlap(a: &[Point2], b: &[Point2]) -> bool {
    let (a_min, a_max) = (a[0].inf(&a[1]), a[0].sup(&a[1]));
    let (b_min, b_max) = (b[0].inf(&b[1]), b[0].sup(&b[1]));
    a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
}

#[allow(clippy::float_cmp)]
fn turning_vertex(points: &[Point2], segment_index: usize) -> Point2 {
    // Walk back over a flat run to its first vertex.
    let mut i = segment_index;
    while i > 0 && points[i - 1].y == points[i].y {
        i -= 1;
    }
    points[i]
}

/// One full answer: its lines in canonical order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    lines: Vec<Line>,
}

impl Input {
    /// Creates an input from lines that are already in the desired order.
    #[must_use]
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Creates an input in canonical order.
    ///
    /// Every line is made to run left to right, then lines are stably sorted by the x of their
    /// first point (a line with no points sorts as if it started at x = 0).
    #[must_use]
    pub fn canonical(lines: Vec<Line>) -> Self {
        let mut lines: Vec<Line> = lines.into_iter().map(Line::left_to_right).collect();
        lines.sort_by(|a, b| first_x(a).total_cmp(&first_x(b)));
        Self { lines }
    }

    /// Re-applies canonicalisation.
    #[must_use]
    pub fn canonicalised(&self) -> Self {
        Self::canonical(self.lines.clone())
    }

    /// Returns the lines.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns `true` if any two lines share some x; empty lines are ignored.
    #[must_use]
    pub fn lines_overlap_horizontally(&self) -> bool {
        let spans: Vec<(f64, f64)> = self.lines.iter().filter_map(Line::horizontal_span).collect();
        spans.iter().enumerate().any(|(i, (min, max))| {
            spans[..i]
                .iter()
                .any(|(other_min, other_max)| min <= other_max && max >= other_min)
        })
    }
}

fn first_x(line: &Line) -> f64 {
    line.points().first().map_or(0.0, |p| p.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn line_of(coords: &[(f64, f64)]) -> Line {
        Line::from_points(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[test]
    fn equality_ignores_points_of_interest() {
        let plain = line_of(&[(0.0, 0.0), (1.0, 1.0)]);
        let flagged = Line::new(
            plain.points().to_vec(),
            vec![PointOfInterest::new(Point2::new(1.0, 1.0), PointKind::Maxima)],
        );
        assert_eq!(plain, flagged);
    }

    #[test]
    fn points_of_interest_are_sorted_by_x() {
        let line = Line::new(
            vec![Point2::new(0.0, 0.0)],
            vec![
                PointOfInterest::new(Point2::new(3.0, 0.0), PointKind::Minima),
                PointOfInterest::new(Point2::new(-1.0, 2.0), PointKind::Maxima),
            ],
        );
        assert_relative_eq!(line.points_of_interest()[0].point.x, -1.0);
        assert_relative_eq!(line.points_of_interest()[1].point.x, 3.0);
    }

    #[test]
    fn turning_points_are_detected() {
        let line = Line::with_turning_points(
            [(-2.0, 0.0), (-1.0, 1.0), (0.0, 0.0), (1.0, -1.0), (2.0, 0.0)]
                .iter()
                .map(|&(x, y)| Point2::new(x, y))
                .collect(),
        );
        let pois = line.points_of_interest();
        assert_eq!(pois.len(), 2);
        assert_eq!(pois[0].kind, PointKind::Maxima);
        assert_relative_eq!(pois[0].point.x, -1.0);
        assert_eq!(pois[1].kind, PointKind::Minima);
        assert_relative_eq!(pois[1].point.x, 1.0);
    }

    #[test]
    fn flat_turning_point_is_flagged_once() {
        let line = Line::with_turning_points(
            [(-2.0, 2.0), (-1.0, 0.0), (1.0, 0.0), (2.0, 2.0)]
                .iter()
                .map(|&(x, y)| Point2::new(x, y))
                .collect(),
        );
        let pois = line.points_of_interest();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].kind, PointKind::Minima);
        assert_relative_eq!(pois[0].point.x, -1.0);
    }

    #[test]
    fn size_is_signed_by_start() {
        let rising = line_of(&[(0.0, 0.0), (2.0, 3.0)]);
        let size = rising.size();
        assert_relative_eq!(size.x, 2.0);
        assert_relative_eq!(size.y, 3.0);

        let falling = line_of(&[(0.0, 3.0), (2.0, 0.0)]);
        let size = falling.size();
        assert_relative_eq!(size.x, 2.0);
        assert_relative_eq!(size.y, -3.0);
    }

    #[test]
    fn size_of_empty_line_is_zero() {
        let size = Line::default().size();
        assert_relative_eq!(size.x, 0.0);
        assert_relative_eq!(size.y, 0.0);
    }

    #[test]
    fn head_and_tail_are_clamped() {
        let line = line_of(&[(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
        assert_eq!(line.head(5).points().len(), 3);
        assert_eq!(line.head(2).points().len(), 2);
        assert_relative_eq!(line.tail(1).points()[0].x, 2.0);
    }

    #[test]
    fn crossing_diagonals_meet_once() {
        let rising = line_of(&[(-2.0, -2.0), (-1.0, -1.0), (1.0, 1.0), (2.0, 2.0)]);
        let falling = line_of(&[(-2.0, 2.0), (0.0, 0.0), (2.0, -2.0)]);
        let crossings = rising.intersections(&falling);
        assert_eq!(crossings.len(), 1);
        assert_relative_eq!(crossings[0].x, 0.0);
        assert_relative_eq!(crossings[0].y, 0.0);
    }

    #[test]
    fn crossings_follow_the_first_line() {
        let wave = line_of(&[(-2.0, 1.0), (0.0, -1.0), (2.0, 1.0)]);
        let flat = line_of(&[(3.0, 0.0), (-3.0, 0.0)]);
        let crossings = wave.intersections(&flat);
        assert_eq!(crossings.len(), 2);
        assert_relative_eq!(crossings[0].x, -1.0);
        assert_relative_eq!(crossings[1].x, 1.0);

        let reversed = flat.intersections(&wave);
        assert_relative_eq!(reversed[0].x, 1.0);
        assert_relative_eq!(reversed[1].x, -1.0);
    }

    #[test]
    fn parallel_and_distant_lines_do_not_cross() {
        let low = line_of(&[(0.0, 0.0), (1.0, 0.0)]);
        let high = line_of(&[(0.0, 1.0), (1.0, 1.0)]);
        let far = line_of(&[(5.0, -1.0), (6.0, 1.0)]);
        assert!(low.intersections(&high).is_empty());
        assert!(low.intersections(&far).is_empty());
        assert!(low.intersections(&Line::default()).is_empty());
    }

    #[test]
    fn horizontal_overlap_needs_shared_x() {
        let apart = Input::new(vec![
            line_of(&[(-3.0, 0.0), (-1.0, 1.0)]),
            line_of(&[(1.0, 0.0), (3.0, 1.0)]),
            Line::default(),
        ]);
        assert!(!apart.lines_overlap_horizontally());

        let touching = Input::new(vec![
            line_of(&[(-3.0, 0.0), (1.0, 1.0)]),
            line_of(&[(1.0, 5.0), (3.0, 1.0)]),
        ]);
        assert!(touching.lines_overlap_horizontally());
        assert_eq!(touching.lines()[1].horizontal_span(), Some((1.0, 3.0)));
    }

    #[test]
    fn canonical_orders_lines_and_points() {
        let right = line_of(&[(10.0, 10.0), (0.0, 0.0)]);
        let left = line_of(&[(0.0, 0.0), (-10.0, -10.0)]);
        let input = Input::canonical(vec![right, left]);

        assert_relative_eq!(input.lines()[0].points()[0].x, -10.0);
        assert_relative_eq!(input.lines()[1].points()[0].x, 0.0);
        assert_relative_eq!(input.lines()[1].points()[1].x, 10.0);
    }

    #[test]
    fn canonicalisation_is_idempotent() {
        let input = Input::canonical(vec![
            line_of(&[(5.0, 1.0), (1.0, 2.0), (3.0, 0.0)]),
            line_of(&[(-1.0, 0.0), (-4.0, 0.0)]),
            Line::default(),
        ]);
        assert_eq!(input.canonicalised(), input);
    }
}
