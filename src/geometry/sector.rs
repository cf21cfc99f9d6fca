use std::fmt;

use crate::error::SpecError;
use crate::math::{Point2, Vector2, DOWN, LEFT, RIGHT, UP};
use crate::settings::Settings;

use super::line::Line;
use super::segment::{IntersectionParam, Segment, Side};

/// A named region of the graph: a quadrant, a band along half an axis, the origin, or one of the
/// coarser regions (half planes, the relaxed origin and the whole plane).
///
/// The first nine sectors cover the plane. Regions overlap along the axes, so a point is assigned
/// to one sector by priority (see [`SectorClassifier`](super::classifier::SectorClassifier)). The
/// coarser sectors are never produced by classification; they can only be named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sector {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    OnAxisWithPositiveX,
    OnAxisWithNegativeX,
    OnAxisWithPositiveY,
    OnAxisWithNegativeY,
    Origin,
    RelaxedOrigin,
    LeftHalf,
    RightHalf,
    TopHalf,
    BottomHalf,
    Any,
}

impl Sector {
    /// Every sector.
    pub const ALL: [Sector; 15] = [
        Sector::TopLeft,
        Sector::TopRight,
        Sector::BottomLeft,
        Sector::BottomRight,
        Sector::OnAxisWithPositiveX,
        Sector::OnAxisWithNegativeX,
        Sector::OnAxisWithPositiveY,
        Sector::OnAxisWithNegativeY,
        Sector::Origin,
        Sector::RelaxedOrigin,
        Sector::LeftHalf,
        Sector::RightHalf,
        Sector::TopHalf,
        Sector::BottomHalf,
        Sector::Any,
    ];

    /// Returns the name used in specification text.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
            Self::OnAxisWithPositiveX => "onAxisWithPositiveX",
            Self::OnAxisWithNegativeX => "onAxisWithNegativeX",
            Self::OnAxisWithPositiveY => "onAxisWithPositiveY",
            Self::OnAxisWithNegativeY => "onAxisWithNegativeY",
            Self::Origin => "origin",
            Self::RelaxedOrigin => "relaxedOrigin",
            Self::LeftHalf => "left",
            Self::RightHalf => "right",
            Self::TopHalf => "top",
            Self::BottomHalf => "bottom",
            Self::Any => "any",
        }
    }

    fn alias(self) -> Option<&'static str> {
        match self {
            Self::OnAxisWithPositiveX => Some("+Xaxis"),
            Self::OnAxisWithNegativeX => Some("-Xaxis"),
            Self::OnAxisWithPositiveY => Some("+Yaxis"),
            Self::OnAxisWithNegativeY => Some("-Yaxis"),
            _ => None,
        }
    }

    /// Parses a sector by its name or short axis alias (e.g. `+Xaxis`), ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::UnknownSector` if no sector has that name.
    pub fn from_name(name: &str) -> Result<Self, SpecError> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|sector| {
                sector.name().eq_ignore_ascii_case(name)
                    || sector.alias().is_some_and(|alias| alias.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| SpecError::UnknownSector(name.to_owned()))
    }

    /// Builds the region this sector covers.
    #[must_use]
    pub fn region(self, settings: &Settings) -> Region {
        let slop = settings.axis_slop;
        match self {
            Self::TopRight => Region::quadrant(RIGHT, UP),
            Self::TopLeft => Region::quadrant(LEFT, UP),
            Self::BottomLeft => Region::quadrant(LEFT, DOWN),
            Self::BottomRight => Region::quadrant(RIGHT, DOWN),
            Self::OnAxisWithPositiveY => Region::axis_band(LEFT, RIGHT, UP, slop),
            Self::OnAxisWithNegativeY => Region::axis_band(RIGHT, LEFT, DOWN, slop),
            Self::OnAxisWithPositiveX => Region::axis_band(UP, DOWN, RIGHT, slop),
            Self::OnAxisWithNegativeX => Region::axis_band(DOWN, UP, LEFT, slop),
            Self::Origin => Region::square(settings.origin_slop),
            Self::RelaxedOrigin => Region::relaxed_origin(settings),
            Self::LeftHalf => Region::left_of_x(0.0),
            Self::RightHalf => Region::right_of_x(0.0),
            Self::TopHalf => Region::half_plane(RIGHT, Side::Left),
            Self::BottomHalf => Region::half_plane(RIGHT, Side::Right),
            Self::Any => Region::new(Vec::new()),
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a line relates to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    /// Every vertex is inside and no segment crosses the boundary.
    Inside,
    /// Some vertex is inside, or some segment crosses the boundary.
    Intersects,
    /// Nothing touches the region.
    Outside,
}

/// A convex region bounded by directed segments; a point is in the region when it is inside
/// every boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    boundaries: Vec<Segment>,
}

impl Region {
    /// Creates a region from its boundaries.
    #[must_use]
    pub fn new(boundaries: Vec<Segment>) -> Self {
        Self { boundaries }
    }

    /// The infinite wedge from the origin between `axis1` and `axis2`.
    #[must_use]
    pub fn quadrant(axis1: Vector2, axis2: Vector2) -> Self {
        let origin = Point2::origin();
        Self::new(vec![
            Segment::open_one_end_towards(origin, axis1, axis2),
            Segment::open_one_end_towards(origin, axis2, axis1),
        ])
    }

    /// The strip between `left * slop` and `right * slop`, extending to infinity along `axis`.
    #[must_use]
    pub fn axis_band(left: Vector2, right: Vector2, axis: Vector2, slop: f64) -> Self {
        let left = Point2::from(left * slop);
        let right = Point2::from(right * slop);
        Self::new(vec![
            Segment::closed(left, right),
            Segment::open_one_end(left, axis, Side::Right),
            Segment::open_one_end(right, axis, Side::Left),
        ])
    }

    /// The square of half-width `size` centred on the origin.
    #[must_use]
    pub fn square(size: f64) -> Self {
        let corners = [
            Point2::new(size, size),
            Point2::new(-size, size),
            Point2::new(-size, -size),
            Point2::new(size, -size),
        ];
        Self::new(
            corners
                .iter()
                .zip(corners.iter().cycle().skip(1))
                .map(|(a, b)| Segment::closed(*a, *b))
                .collect(),
        )
    }

    /// The looser origin square used by symmetry checks.
    #[must_use]
    pub fn relaxed_origin(settings: &Settings) -> Self {
        Self::square(settings.relaxed_origin_slop)
    }

    /// The half plane through the origin on `side` of `direction`.
    #[must_use]
    pub fn half_plane(direction: Vector2, side: Side) -> Self {
        Self::new(vec![Segment::open_both_ends(Point2::origin(), direction, side)])
    }

    /// The half plane `x <= x0`.
    #[must_use]
    pub fn left_of_x(x0: f64) -> Self {
        Self::new(vec![Segment::open_both_ends(Point2::new(x0, 0.0), UP, Side::Left)])
    }

    /// The half plane `x >= x0`.
    #[must_use]
    pub fn right_of_x(x0: f64) -> Self {
        Self::new(vec![Segment::open_both_ends(Point2::new(x0, 0.0), UP, Side::Right)])
    }

    /// Tests whether `p` is inside every boundary.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        self.boundaries.iter().all(|boundary| boundary.inside(p))
    }

    /// Tests whether `segment` crosses any boundary.
    #[must_use]
    pub fn crosses(&self, segment: &Segment) -> bool {
        self.boundaries.iter().any(|boundary| boundary.intersects(segment))
    }

    /// Measures whether a line is inside, outside or crossing this region.
    #[must_use]
    pub fn intersects(&self, line: &Line) -> Intersection {
        let mut all_inside = true;
        let mut some_inside = false;
        let mut any_crossing = false;
        for (i, p) in line.points().iter().enumerate() {
            if self.contains(p) {
                some_inside = true;
            } else {
                all_inside = false;
            }
            if i > 0 {
                any_crossing |= self.crosses(&Segment::closed(line.points()[i - 1], *p));
            }
        }

        if all_inside && !any_crossing {
            Intersection::Inside
        } else if some_inside || any_crossing {
            Intersection::Intersects
        } else {
            Intersection::Outside
        }
    }

    /// Returns every boundary crossing of `segment`, ordered along it.
    #[must_use]
    pub fn intersection_params(&self, segment: &Segment) -> Vec<IntersectionParam> {
        let mut params: Vec<IntersectionParam> = self
            .boundaries
            .iter()
            .filter_map(|boundary| boundary.intersection_param(segment))
            .collect();
        params.sort_by(|a, b| a.t.total_cmp(&b.t));
        params
    }

    /// Clips a line to this region, bridging any gaps with straight segments.
    #[must_use]
    pub fn clip(&self, line: &Line) -> Line {
        self.boundaries
            .iter()
            .fold(line.clone(), |clipped, boundary| boundary.clip_line(&clipped))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn line_of(coords: &[(f64, f64)]) -> Line {
        Line::from_points(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn region(sector: Sector) -> Region {
        sector.region(&Settings::default())
    }

    #[test]
    fn names_and_aliases_parse() {
        assert_eq!(Sector::from_name("topLeft").unwrap(), Sector::TopLeft);
        assert_eq!(Sector::from_name(" BottomRight ").unwrap(), Sector::BottomRight);
        assert_eq!(Sector::from_name("+Xaxis").unwrap(), Sector::OnAxisWithPositiveX);
        assert_eq!(Sector::from_name("-yaxis").unwrap(), Sector::OnAxisWithNegativeY);
        assert_eq!(
            Sector::from_name("onAxisWithNegativeX").unwrap(),
            Sector::OnAxisWithNegativeX
        );
        assert!(Sector::from_name("middle").is_err());
    }

    #[test]
    fn names_round_trip() {
        for sector in Sector::ALL {
            assert_eq!(Sector::from_name(&sector.to_string()).unwrap(), sector);
        }
    }

    #[test]
    fn coarse_sectors_are_nameable() {
        assert_eq!(Sector::from_name("relaxedOrigin").unwrap(), Sector::RelaxedOrigin);
        assert_eq!(Sector::from_name("left").unwrap(), Sector::LeftHalf);
        assert_eq!(Sector::from_name("Right").unwrap(), Sector::RightHalf);
        assert_eq!(Sector::from_name("top").unwrap(), Sector::TopHalf);
        assert_eq!(Sector::from_name("bottom").unwrap(), Sector::BottomHalf);
        assert_eq!(Sector::from_name("any").unwrap(), Sector::Any);
    }

    #[test]
    fn coarse_sectors_cover_their_halves() {
        assert!(region(Sector::LeftHalf).contains(&Point2::new(-1.0, 5.0)));
        assert!(!region(Sector::LeftHalf).contains(&Point2::new(1.0, 5.0)));
        assert!(region(Sector::RightHalf).contains(&Point2::new(1.0, -5.0)));
        assert!(!region(Sector::RightHalf).contains(&Point2::new(-1.0, -5.0)));
        assert!(region(Sector::TopHalf).contains(&Point2::new(-5.0, 1.0)));
        assert!(!region(Sector::TopHalf).contains(&Point2::new(-5.0, -1.0)));
        assert!(region(Sector::BottomHalf).contains(&Point2::new(5.0, -1.0)));
        assert!(!region(Sector::BottomHalf).contains(&Point2::new(5.0, 1.0)));
        assert!(region(Sector::RelaxedOrigin).contains(&Point2::new(0.08, -0.08)));
        assert!(!region(Sector::Origin).contains(&Point2::new(0.08, -0.08)));
        assert!(region(Sector::Any).contains(&Point2::new(1e6, -1e6)));
    }

    #[test]
    fn quadrants_contain_their_points() {
        assert!(region(Sector::TopRight).contains(&Point2::new(1.0, 1.0)));
        assert!(region(Sector::TopLeft).contains(&Point2::new(-1.0, 1.0)));
        assert!(region(Sector::BottomLeft).contains(&Point2::new(-1.0, -1.0)));
        assert!(region(Sector::BottomRight).contains(&Point2::new(1.0, -1.0)));
        assert!(!region(Sector::TopRight).contains(&Point2::new(-1.0, 1.0)));
        assert!(!region(Sector::BottomRight).contains(&Point2::new(1.0, 1.0)));
    }

    #[test]
    fn axis_bands_have_slop() {
        let positive_x = region(Sector::OnAxisWithPositiveX);
        assert!(positive_x.contains(&Point2::new(3.0, 0.01)));
        assert!(positive_x.contains(&Point2::new(3.0, -0.01)));
        assert!(!positive_x.contains(&Point2::new(3.0, 0.03)));
        assert!(!positive_x.contains(&Point2::new(-3.0, 0.0)));

        let negative_y = region(Sector::OnAxisWithNegativeY);
        assert!(negative_y.contains(&Point2::new(0.015, -5.0)));
        assert!(!negative_y.contains(&Point2::new(0.0, 5.0)));
    }

    #[test]
    fn origin_is_a_small_square() {
        let origin = region(Sector::Origin);
        assert!(origin.contains(&Point2::new(0.04, -0.04)));
        assert!(!origin.contains(&Point2::new(0.06, 0.0)));
        assert!(Region::relaxed_origin(&Settings::default()).contains(&Point2::new(0.06, 0.0)));
    }

    #[test]
    fn half_planes_split_on_x() {
        assert!(Region::left_of_x(2.0).contains(&Point2::new(1.0, 100.0)));
        assert!(Region::left_of_x(2.0).contains(&Point2::new(2.0, -100.0)));
        assert!(!Region::left_of_x(2.0).contains(&Point2::new(3.0, 0.0)));
        assert!(Region::right_of_x(2.0).contains(&Point2::new(3.0, 0.0)));
        assert!(Region::right_of_x(2.0).contains(&Point2::new(2.0, 0.0)));
        assert!(!Region::right_of_x(2.0).contains(&Point2::new(1.0, 0.0)));
    }

    #[test]
    fn line_inside_outside_and_crossing() {
        let top_right = region(Sector::TopRight);
        assert_eq!(
            top_right.intersects(&line_of(&[(1.0, 1.0), (2.0, 3.0)])),
            Intersection::Inside
        );
        assert_eq!(
            top_right.intersects(&line_of(&[(-1.0, -1.0), (-2.0, -3.0)])),
            Intersection::Outside
        );
        assert_eq!(
            top_right.intersects(&line_of(&[(-1.0, 1.0), (1.0, 1.0)])),
            Intersection::Intersects
        );
        assert_eq!(
            top_right.intersects(&line_of(&[(-1.0, 0.5), (0.5, -1.0)])),
            Intersection::Outside
        );
    }

    #[test]
    fn intersection_params_are_ordered() {
        let origin = region(Sector::Origin);
        let through = Segment::closed(Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0));
        let params = origin.intersection_params(&through);
        assert_eq!(params.len(), 2);
        assert!(params[0].t < params[1].t);
        assert!(params[0].inside);
        assert!(!params[1].inside);
        assert_relative_eq!(params[0].t, 0.475, epsilon = 1e-12);
        assert_relative_eq!(params[1].t, 0.525, epsilon = 1e-12);
    }

    #[test]
    fn clip_keeps_region_part() {
        let line = line_of(&[(-2.0, 1.0), (2.0, 1.0)]);
        let clipped = Region::right_of_x(0.0).clip(&line);
        assert_eq!(clipped.points().len(), 2);
        assert_relative_eq!(clipped.points()[0].x, 0.0);
        assert_relative_eq!(clipped.points()[1].x, 2.0);
    }
}
