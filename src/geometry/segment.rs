use crate::math::intersect_2d::{lerp_2d, line_line_params_2d};
use crate::math::{cross_2d, Point2, Vector2};

use super::line::Line;

/// Which side of a directed boundary counts as inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Anticlockwise of the direction of travel.
    Left,
    /// Clockwise of the direction of travel.
    Right,
}

/// A crossing found by [`Segment::intersection_param`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionParam {
    /// Parameter along the *other* segment where the crossing occurs.
    pub t: f64,
    /// Whether the other segment's end point lies on the inside of this segment.
    pub inside: bool,
}

/// A directed boundary: a closed segment, a half-line or a full line.
///
/// Every variant is defined by two points. The direction of travel is `start -> end`, and the
/// inside is the half plane on its `side`. A closed segment treats the left as inside and also
/// restricts the inside to the strip between the perpendiculars at its two ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Bounded at both ends.
    Closed { start: Point2, end: Point2 },
    /// Bounded at `start`, extending through `end` to infinity.
    OpenOneEnd {
        start: Point2,
        end: Point2,
        side: Side,
    },
    /// The infinite line through `start` and `end`.
    OpenBothEnds {
        start: Point2,
        end: Point2,
        side: Side,
    },
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    #[must_use]
    pub fn closed(start: Point2, end: Point2) -> Self {
        Self::Closed { start, end }
    }

    /// Creates a half-line from `origin` in `direction`, with `side` considered inside.
    #[must_use]
    pub fn open_one_end(origin: Point2, direction: Vector2, side: Side) -> Self {
        Self::OpenOneEnd {
            start: origin,
            end: origin + direction,
            side,
        }
    }

    /// Creates a half-line from `origin` in `direction`, with the side containing
    /// `origin + inside` considered inside.
    #[must_use]
    pub fn open_one_end_towards(origin: Point2, direction: Vector2, inside: Vector2) -> Self {
        let left = Self::open_one_end(origin, direction, Side::Left);
        if left.inside(&(origin + inside)) {
            left
        } else {
            Self::open_one_end(origin, direction, Side::Right)
        }
    }

    /// Creates the full line through `origin` in `direction`, with `side` considered inside.
    #[must_use]
    pub fn open_both_ends(origin: Point2, direction: Vector2, side: Side) -> Self {
        Self::OpenBothEnds {
            start: origin,
            end: origin + direction,
            side,
        }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        match self {
            Self::Closed { start, .. }
            | Self::OpenOneEnd { start, .. }
            | Self::OpenBothEnds { start, .. } => start,
        }
    }

    /// Returns the end point (the direction point for open variants).
    #[must_use]
    pub fn end(&self) -> &Point2 {
        match self {
            Self::Closed { end, .. } | Self::OpenOneEnd { end, .. } | Self::OpenBothEnds { end, .. } => {
                end
            }
        }
    }

    /// Returns the side considered inside.
    #[must_use]
    pub fn side(&self) -> Side {
        match self {
            Self::Closed { .. } => Side::Left,
            Self::OpenOneEnd { side, .. } | Self::OpenBothEnds { side, .. } => *side,
        }
    }

    fn bounded_at_start(&self) -> bool {
        !matches!(self, Self::OpenBothEnds { .. })
    }

    fn bounded_at_end(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }

    fn direction(&self) -> Vector2 {
        self.end() - self.start()
    }

    fn is_on_inside(&self, offset: &Vector2) -> bool {
        let cross = cross_2d(&self.direction(), offset);
        match self.side() {
            Side::Left => cross >= 0.0,
            Side::Right => cross <= 0.0,
        }
    }

    /// Tests whether `p` is on the inside of this boundary.
    ///
    /// The point must be on the inside side, and its projection onto the boundary must fall
    /// within the bounded extent (`[0, 1]` for closed, `[0, inf)` for a half-line).
    #[must_use]
    pub fn inside(&self, p: &Point2) -> bool {
        let direction = self.direction();
        let offset = p - self.start();
        if !self.is_on_inside(&offset) {
            return false;
        }

        let coefficient = offset.dot(&direction) / direction.dot(&direction);
        (!self.bounded_at_start() || coefficient >= 0.0) && (!self.bounded_at_end() || coefficient <= 1.0)
    }

    /// Finds where `other` crosses this boundary.
    ///
    /// Returns `None` for parallel (including collinear) boundaries, or when the crossing falls
    /// outside either extent.
    #[must_use]
    pub fn intersection_param(&self, other: &Segment) -> Option<IntersectionParam> {
        let (t, u) = line_line_params_2d(self.start(), self.end(), other.start(), other.end())?;

        if self.bounded_at_start() && t < 0.0 {
            return None;
        }
        if self.bounded_at_end() && t > 1.0 {
            return None;
        }
        if other.bounded_at_start() && u < 0.0 {
            return None;
        }
        if other.bounded_at_end() && u > 1.0 {
            return None;
        }

        Some(IntersectionParam {
            t: u,
            inside: self.is_on_inside(&(other.end() - self.start())),
        })
    }

    /// Tests whether `other` crosses this boundary.
    #[must_use]
    pub fn intersects(&self, other: &Segment) -> bool {
        self.intersection_param(other).is_some()
    }

    /// Returns the point at parameter `t` along `start -> end`.
    #[must_use]
    pub fn at_parameter(&self, t: f64) -> Point2 {
        lerp_2d(self.start(), self.end(), t)
    }

    /// Clips a closed segment to the inside of this boundary.
    ///
    /// Returns `None` when nothing of `segment` is inside.
    #[must_use]
    pub fn clip_segment(&self, segment: &Segment) -> Option<Segment> {
        let Some(crossing) = self.intersection_param(segment) else {
            return self.inside(segment.start()).then_some(*segment);
        };

        let p = segment.at_parameter(crossing.t);
        if !crossing.inside {
            return Some(Segment::closed(*segment.start(), p));
        }
        if self.inside(segment.start()) {
            Some(*segment)
        } else {
            Some(Segment::closed(p, *segment.end()))
        }
    }

    /// Clips a polyline to the inside of this boundary.
    ///
    /// Any gaps left by clipping are bridged by straight segments. Points of interest outside the
    /// boundary are dropped.
    #[must_use]
    pub fn clip_line(&self, line: &Line) -> Line {
        let mut points: Vec<Point2> = Vec::with_capacity(line.points().len());
        for pair in line.points().windows(2) {
            let Some(clipped) = self.clip_segment(&Segment::closed(pair[0], pair[1])) else {
                continue;
            };
            for p in [clipped.start(), clipped.end()] {
                if points.last() != Some(p) {
                    points.push(*p);
                }
            }
        }

        let points_of_interest = line
            .points_of_interest()
            .iter()
            .filter(|poi| self.inside(&poi.point))
            .copied()
            .collect();

        Line::new(points, points_of_interest)
    }
}
