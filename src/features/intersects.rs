use crate::error::SpecError;
use crate::geometry::{Input, Line, Sector};
use crate::selection::{is_line_name, standard_line_name, Assignments};

use super::{Feature, MarkingContext};

/// Two named lines cross exactly at points in these sectors, in order along the first line.
///
/// Written `A to B at origin, topRight`, or `A to B nowhere` for lines that never cross. The
/// names are bound the same way as `match:` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intersects {
    line_a: String,
    line_b: String,
    sectors: Vec<Sector>,
}

impl Intersects {
    #[must_use]
    pub fn new(line_a: String, line_b: String, sectors: Vec<Sector>) -> Self {
        Self {
            line_a,
            line_b,
            sectors,
        }
    }

    #[must_use]
    pub fn lines(&self) -> (&str, &str) {
        (&self.line_a, &self.line_b)
    }

    #[must_use]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Tests the pair `a`, `b` directly, without binding names.
    #[must_use]
    pub fn test_pair(&self, a: &Line, b: &Line, context: &MarkingContext) -> bool {
        a.intersections(b)
            .iter()
            .map(|p| context.classifier().classify(p))
            .eq(self.sectors.iter().copied().map(Some))
    }

    /// Tests `input` under the shared name bindings, narrowing them on success.
    pub fn test_bound(
        &self,
        input: &Input,
        context: &MarkingContext,
        assignments: &mut Assignments,
    ) -> bool {
        let lines = input.lines();
        assignments.refine(
            &[self.line_a.as_str(), self.line_b.as_str()],
            lines.len(),
            |bound| self.test_pair(&lines[bound[0]], &lines[bound[1]], context),
        )
    }

    /// Describes every pair of lines that crosses, naming lines by their position.
    #[must_use]
    pub fn generate_each(input: &Input, context: &MarkingContext) -> Vec<Self> {
        let lines = input.lines();
        let mut found = Vec::new();
        for (i, a) in lines.iter().enumerate() {
            for (j, b) in lines.iter().enumerate().skip(i + 1) {
                let crossings = a.intersections(b);
                if crossings.is_empty() {
                    continue;
                }
                let sectors = crossings
                    .iter()
                    .filter_map(|p| context.classifier().classify(p))
                    .collect();
                found.push(Self::new(standard_line_name(i), standard_line_name(j), sectors));
            }
        }
        found
    }
}

/// Splits off the first whitespace-separated word.
fn next_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    (&text[..end], text[end..].trim_start())
}

impl Feature for Intersects {
    const TAG: &'static str = "intersects";
    type Subject = Input;

    fn deserialize(data: &str) -> Result<Self, SpecError> {
        let malformed = |reason: &str| SpecError::invalid(Self::TAG, data, reason);

        let (line_a, rest) = next_word(data);
        let (to, rest) = next_word(rest);
        let (line_b, rest) = next_word(rest);
        if to != "to" || !is_line_name(line_a) || !is_line_name(line_b) {
            return Err(malformed("expected `A to B`"));
        }
        if line_a == line_b {
            return Err(malformed("a line cannot intersect itself"));
        }

        let (preposition, list) = next_word(rest);
        let sectors = match preposition {
            "nowhere" if list.is_empty() => Vec::new(),
            "at" | "in" | "on" => list
                .split(',')
                .map(Sector::from_name)
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(malformed("expected `at` and a list of sectors, or `nowhere`")),
        };
        Ok(Self::new(line_a.to_owned(), line_b.to_owned(), sectors))
    }

    fn serialize(&self) -> String {
        if self.sectors.is_empty() {
            return format!("{} to {} nowhere", self.line_a, self.line_b);
        }
        let sectors: Vec<&str> = self.sectors.iter().map(|sector| sector.name()).collect();
        format!("{} to {} at {}", self.line_a, self.line_b, sectors.join(", "))
    }

    fn test(&self, input: &Input, context: &MarkingContext) -> bool {
        self.test_bound(input, context, &mut Assignments::default())
    }

    /// Describes the first crossing pair; see [`Intersects::generate_each`] for all of them.
    fn generate(input: &Input, context: &MarkingContext) -> Option<Self> {
        Self::generate_each(input, context).into_iter().next()
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

    fn crossing_diagonals() -> Input {
        Input::new(vec![
            sampled(|x| x, -10.0, 10.0, 99),
            sampled(|x| -x, -10.0, 10.0, 99),
        ])
    }

    #[test]
    fn parses_and_serializes() {
        let feature = Intersects::deserialize(" a  to b at origin,  +Xaxis").unwrap();
        assert_eq!(feature.lines(), ("a", "b"));
        assert_eq!(feature.sectors(), &[Sector::Origin, Sector::OnAxisWithPositiveX]);
        assert_eq!(feature.serialize(), "a to b at origin, onAxisWithPositiveX");

        let feature = Intersects::deserialize("A to B nowhere").unwrap();
        assert!(feature.sectors().is_empty());
        assert_eq!(feature.serialize(), "A to B nowhere");

        assert!(Intersects::deserialize("A to B in topLeft").is_ok());
    }

    #[test]
    fn rejects_malformed_clauses() {
        assert!(Intersects::deserialize("1 to 2 at origin").is_err());
        assert!(Intersects::deserialize("a to b at foo").is_err());
        assert!(Intersects::deserialize("a and b at origin").is_err());
        assert!(Intersects::deserialize("a to a at origin").is_err());
        assert!(Intersects::deserialize("a to b").is_err());
        assert!(Intersects::deserialize("a to b at").is_err());
        assert!(Intersects::deserialize("a to b nowhere near").is_err());
    }

    #[test]
    fn crossing_diagonals_meet_at_origin() {
        let context = MarkingContext::default();
        let input = crossing_diagonals();
        assert!(Intersects::deserialize("a to b at origin")
            .unwrap()
            .test(&input, &context));
        assert!(!Intersects::deserialize("a to b at topRight")
            .unwrap()
            .test(&input, &context));
        assert!(!Intersects::deserialize("a to b nowhere")
            .unwrap()
            .test(&input, &context));
    }

    #[test]
    fn lines_that_never_cross_are_nowhere() {
        let context = MarkingContext::default();
        let input = Input::new(vec![
            sampled(|x| x * x + 1.0, -2.0, 2.0, 20),
            sampled(|x| -x * x - 1.0, -2.0, 2.0, 20),
        ]);
        assert!(Intersects::deserialize("a to b nowhere")
            .unwrap()
            .test(&input, &context));
        assert!(Intersects::generate_each(&input, &context).is_empty());
    }

    #[test]
    fn generates_each_crossing_pair() {
        let context = MarkingContext::default();
        let generated = Intersects::generate_each(&crossing_diagonals(), &context);
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].serialize(), "A to B at origin");
        assert!(generated[0].test(&crossing_diagonals(), &context));
    }

    #[test]
    fn bound_names_are_shared() {
        let context = MarkingContext::default();
        let input = Input::new(vec![
            sampled(|_| 3.0, -10.0, 10.0, 99),
            sampled(|x| x, -10.0, 10.0, 99),
            sampled(|x| -x, -10.0, 10.0, 99),
        ]);
        let mut assignments = Assignments::default();
        for clause in ["a to b at topRight", "a to c at topLeft", "b to c at origin"] {
            assert!(
                Intersects::deserialize(clause)
                    .unwrap()
                    .test_bound(&input, &context, &mut assignments),
                "{clause}"
            );
        }
        assert_eq!(assignments.bindings(), &[vec![0, 1, 2]]);
    }
}
