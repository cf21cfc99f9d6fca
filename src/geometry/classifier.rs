use std::collections::{BTreeSet, VecDeque};

use crate::math::Point2;
use crate::settings::Settings;

use super::line::Line;
use super::sector::{Region, Sector};
use super::segment::{IntersectionParam, Segment};

/// The set of sectors a point or a stretch of line is in at once.
pub type SectorSet = BTreeSet<Sector>;

/// Pairs of sectors a point can only be in both of by touching a shared boundary.
const CONTRADICTORY: [[Sector; 2]; 6] = [
    [Sector::TopRight, Sector::BottomRight],
    [Sector::TopLeft, Sector::BottomLeft],
    [Sector::TopRight, Sector::TopLeft],
    [Sector::BottomRight, Sector::BottomLeft],
    [Sector::OnAxisWithPositiveX, Sector::OnAxisWithNegativeX],
    [Sector::OnAxisWithPositiveY, Sector::OnAxisWithNegativeY],
];

/// Maps points and lines onto sectors.
///
/// Sectors are held in priority order: where regions overlap, the earliest sector wins.
#[derive(Debug, Clone)]
pub struct SectorClassifier {
    regions: Vec<(Sector, Region)>,
}

impl SectorClassifier {
    /// Origin first, then the axes, then the quadrants.
    pub const DEFAULT_ORDER: [Sector; 9] = [
        Sector::Origin,
        Sector::OnAxisWithPositiveX,
        Sector::OnAxisWithPositiveY,
        Sector::OnAxisWithNegativeX,
        Sector::OnAxisWithNegativeY,
        Sector::TopRight,
        Sector::TopLeft,
        Sector::BottomLeft,
        Sector::BottomRight,
    ];

    /// Creates a classifier using [`DEFAULT_ORDER`](Self::DEFAULT_ORDER).
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::with_order(settings, &Self::DEFAULT_ORDER)
    }

    /// Creates a classifier over `order`, highest priority first. Repeated sectors are ignored.
    #[must_use]
    pub fn with_order(settings: &Settings, order: &[Sector]) -> Self {
        let mut regions: Vec<(Sector, Region)> = Vec::with_capacity(order.len());
        for &sector in order {
            if regions.iter().all(|(s, _)| *s != sector) {
                regions.push((sector, sector.region(settings)));
            }
        }
        Self { regions }
    }

    /// Returns the sectors in priority order.
    pub fn order(&self) -> impl Iterator<Item = Sector> + '_ {
        self.regions.iter().map(|(sector, _)| *sector)
    }

    /// Returns every sector whose region contains `p`.
    #[must_use]
    pub fn classify_all(&self, p: &Point2) -> SectorSet {
        self.regions
            .iter()
            .filter(|(_, region)| region.contains(p))
            .map(|(sector, _)| *sector)
            .collect()
    }

    /// Returns the highest priority sector containing `p`.
    #[must_use]
    pub fn classify(&self, p: &Point2) -> Option<Sector> {
        self.regions
            .iter()
            .find(|(_, region)| region.contains(p))
            .map(|(sector, _)| *sector)
    }

    /// Returns the highest priority member of `sectors`.
    #[must_use]
    pub fn most_important(&self, sectors: &SectorSet) -> Option<Sector> {
        self.order().find(|sector| sectors.contains(sector))
    }

    /// Walks `line` and records every distinct set of sectors it passes through.
    ///
    /// Each vertex contributes the sectors containing it, and each segment contributes the sets
    /// it is in after every boundary crossing. Contradictory pairs are removed from each set and
    /// consecutive duplicates are dropped. Sets may be empty.
    #[must_use]
    pub fn sector_sets(&self, line: &Line) -> Vec<SectorSet> {
        let mut sets = Vec::new();
        let mut previous: Option<&Point2> = None;
        for p in line.points() {
            if let Some(start) = previous {
                self.classify_segment(&mut sets, &Segment::closed(*start, *p));
            }
            add_sectors(&mut sets, self.classify_all(p));
            previous = Some(p);
        }
        sets
    }

    /// Returns the path of sectors `line` takes, one sector per distinct stretch.
    #[must_use]
    pub fn convert_line_to_sector_list(&self, line: &Line) -> Vec<Sector> {
        let mut sectors: Vec<Sector> = Vec::new();
        for set in self.sector_sets(line) {
            let Some(sector) = self.most_important(&set) else {
                continue;
            };
            if sectors.last() != Some(&sector) {
                sectors.push(sector);
            }
        }
        sectors
    }

    #[allow(clippy::float_cmp)]
    fn classify_segment(&self, sets: &mut Vec<SectorSet>, segment: &Segment) {
        let mut crossings: Vec<VecDeque<IntersectionParam>> = self
            .regions
            .iter()
            .map(|(_, region)| region.intersection_params(segment).into())
            .collect();
        let mut inside: Vec<bool> = self
            .regions
            .iter()
            .map(|(_, region)| region.contains(segment.start()))
            .collect();

        while let Some(index) = earliest(&crossings) {
            let Some(crossing) = crossings[index].pop_front() else {
                break;
            };
            inside[index] = crossing.inside;

            // Crossings at the same parameter are one event.
            while let Some(next) = earliest(&crossings) {
                let Some(now_inside) = crossings[next]
                    .front()
                    .filter(|simultaneous| simultaneous.t == crossing.t)
                    .map(|simultaneous| simultaneous.inside)
                else {
                    break;
                };
                inside[next] = now_inside;
                crossings[next].pop_front();
            }

            let current = self
                .regions
                .iter()
                .zip(&inside)
                .filter(|(_, is_inside)| **is_inside)
                .map(|((sector, _), _)| *sector)
                .collect();
            add_sectors(sets, current);
        }
    }
}

/// Index of the queue whose next crossing comes first; ties go to the lower index.
fn earliest(crossings: &[VecDeque<IntersectionParam>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, queue) in crossings.iter().enumerate() {
        let Some(front) = queue.front() else {
            continue;
        };
        match best {
            Some((_, t)) if front.t >= t => {}
            _ => best = Some((index, front.t)),
        }
    }
    best.map(|(index, _)| index)
}

fn add_sectors(sets: &mut Vec<SectorSet>, mut sectors: SectorSet) {
    let contradicted: Vec<[Sector; 2]> = CONTRADICTORY
        .iter()
        .filter(|pair| pair.iter().all(|sector| sectors.contains(sector)))
        .copied()
        .collect();
    for pair in contradicted {
        for sector in pair {
            sectors.remove(&sector);
        }
    }

    if sets.last() != Some(&sectors) {
        sets.push(sectors);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sampled(f: impl Fn(f64) -> f64, from: f64, to: f64, steps: u32) -> Line {
        let points = (0..=steps)
            .map(|i| {
                let x = from + (to - from) * f64::from(i) / f64::from(steps);
                Point2::new(x, f(x))
            })
            .collect();
        Line::from_points(points)
    }

    fn classifier() -> SectorClassifier {
        SectorClassifier::new(&Settings::default())
    }

    #[test]
    fn diagonal_passes_through_origin() {
        let line = sampled(|x| x, -1.0, 1.0, 4);
        assert_eq!(
            classifier().convert_line_to_sector_list(&line),
            vec![Sector::BottomLeft, Sector::Origin, Sector::TopRight]
        );
    }

    #[test]
    fn parabola_crosses_three_axes() {
        let line = sampled(|x| x * x - 2.0, -2.0, 2.0, 40);
        assert_eq!(
            classifier().convert_line_to_sector_list(&line),
            vec![
                Sector::TopLeft,
                Sector::OnAxisWithNegativeX,
                Sector::BottomLeft,
                Sector::OnAxisWithNegativeY,
                Sector::BottomRight,
                Sector::OnAxisWithPositiveX,
                Sector::TopRight,
            ]
        );
    }

    #[test]
    fn long_diagonal_passes_through_origin() {
        let line = sampled(|x| x, -10.0, 10.0, 99);
        assert_eq!(
            classifier().convert_line_to_sector_list(&line),
            vec![Sector::BottomLeft, Sector::Origin, Sector::TopRight]
        );
    }

    #[test]
    fn wide_parabola_crosses_three_axes() {
        let line = sampled(|x| x * x - 2.0, -5.0, 5.0, 99);
        assert_eq!(
            classifier().convert_line_to_sector_list(&line),
            vec![
                Sector::TopLeft,
                Sector::OnAxisWithNegativeX,
                Sector::BottomLeft,
                Sector::OnAxisWithNegativeY,
                Sector::BottomRight,
                Sector::OnAxisWithPositiveX,
                Sector::TopRight,
            ]
        );
    }

    #[test]
    fn grazing_a_corner_does_not_enter_the_origin() {
        // The second segment passes exactly through the corner (0.05, -0.05) of the origin square.
        let line = Line::from_points(vec![
            Point2::new(0.75, -0.25),
            Point2::new(0.0, -0.25),
            Point2::new(0.25, 0.75),
        ]);
        assert_eq!(
            classifier().convert_line_to_sector_list(&line),
            vec![
                Sector::BottomRight,
                Sector::OnAxisWithNegativeY,
                Sector::BottomRight,
                Sector::OnAxisWithPositiveX,
                Sector::TopRight,
            ]
        );
    }

    #[test]
    fn horizontal_line_crosses_positive_y() {
        let line = sampled(|_| 1.0, -1.0, 1.0, 3);
        assert_eq!(
            classifier().convert_line_to_sector_list(&line),
            vec![Sector::TopLeft, Sector::OnAxisWithPositiveY, Sector::TopRight]
        );
    }

    #[test]
    fn every_point_has_a_sector() {
        let classifier = classifier();
        for i in -20..=20 {
            for j in -20..=20 {
                let p = Point2::new(f64::from(i) * 0.013, f64::from(j) * 0.29);
                assert!(classifier.classify(&p).is_some(), "{p:?} unclassified");
            }
        }
    }

    #[test]
    fn axis_point_is_in_both_quadrants_but_classified_as_axis() {
        let classifier = classifier();
        let p = Point2::new(1.0, 0.0);
        let all = classifier.classify_all(&p);
        assert!(all.contains(&Sector::TopRight));
        assert!(all.contains(&Sector::BottomRight));
        assert!(all.contains(&Sector::OnAxisWithPositiveX));
        assert_eq!(classifier.classify(&p), Some(Sector::OnAxisWithPositiveX));
    }

    #[test]
    fn custom_order_changes_priority() {
        let classifier = SectorClassifier::with_order(
            &Settings::default(),
            &[Sector::TopRight, Sector::OnAxisWithPositiveX, Sector::TopRight],
        );
        assert_eq!(classifier.order().count(), 2);
        assert_eq!(classifier.classify(&Point2::new(1.0, 0.0)), Some(Sector::TopRight));
        assert_eq!(classifier.classify(&Point2::new(-1.0, -1.0)), None);
    }

    #[test]
    fn contradictory_pairs_are_dropped() {
        let mut sets = Vec::new();
        add_sectors(
            &mut sets,
            [Sector::TopRight, Sector::BottomRight, Sector::OnAxisWithPositiveX]
                .into_iter()
                .collect(),
        );
        assert_eq!(sets, vec![[Sector::OnAxisWithPositiveX].into_iter().collect()]);

        add_sectors(&mut sets, [Sector::OnAxisWithPositiveX].into_iter().collect());
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn sector_sets_record_both_sides_of_a_crossing() {
        let line = sampled(|_| 1.0, -1.0, 1.0, 1);
        let sets = classifier().sector_sets(&line);
        assert_eq!(sets.first().unwrap(), &[Sector::TopLeft].into_iter().collect());
        assert_eq!(sets.last().unwrap(), &[Sector::TopRight].into_iter().collect());
        assert!(sets
            .iter()
            .any(|set| set.contains(&Sector::OnAxisWithPositiveY)));
    }
}
