//! Choosing which lines of an answer a line feature is tested against.

use std::fmt;

use crate::error::SpecError;
use crate::geometry::{Input, Line, Region};

/// Picks the lines a line feature applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSelector {
    /// Matches if any line matches. Used when a clause has no `line:` prefix.
    Any,
    /// Matches if the given line (1-based) exists and matches.
    Nth(usize),
    /// Matches if some line the name can still stand for matches; the name then stands only
    /// for the lines that did. Names are shared by every clause of a specification.
    Named(String),
}

impl LineSelector {
    /// Tag of the line scoping prefix.
    pub const TAG: &'static str = "line";

    /// Tag of the named line prefix.
    pub const MATCH_TAG: &'static str = "match";

    /// Parses the data after `line:`, returning the selector and the clauses it scopes.
    ///
    /// The data has the form `N; clause[; clause]...` with `N >= 1`.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::InvalidLineSelector` if the index is missing, zero or not a number.
    pub fn parse_nth(data: &str) -> Result<(Self, &str), SpecError> {
        let (index, rest) = data
            .split_once(';')
            .ok_or_else(|| SpecError::InvalidLineSelector(data.trim().to_owned()))?;
        let index = index.trim();
        match index.parse::<usize>() {
            Ok(n) if n >= 1 && !index.starts_with('+') => Ok((Self::Nth(n), rest)),
            _ => Err(SpecError::InvalidLineSelector(index.to_owned())),
        }
    }

    /// Parses the data after `match:`, of the form `name; clause[; clause]...`.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::InvalidLineSelector` unless the name is one or more ASCII letters.
    pub fn parse_named(data: &str) -> Result<(Self, &str), SpecError> {
        let (name, rest) = data
            .split_once(';')
            .ok_or_else(|| SpecError::InvalidLineSelector(data.trim().to_owned()))?;
        let name = name.trim();
        if is_line_name(name) {
            Ok((Self::Named(name.to_owned()), rest))
        } else {
            Err(SpecError::InvalidLineSelector(name.to_owned()))
        }
    }

    /// Returns the text this selector puts in front of a line feature clause.
    #[must_use]
    pub fn prefix(&self) -> String {
        match self {
            Self::Any => String::new(),
            Self::Nth(n) => format!("{}: {n}; ", Self::TAG),
            Self::Named(name) => format!("{}: {name}; ", Self::MATCH_TAG),
        }
    }

    /// Tests `input` by applying `test` to the selected lines.
    ///
    /// A named selector narrows `assignments` when it matches and leaves them alone otherwise.
    pub fn matches(
        &self,
        input: &Input,
        assignments: &mut Assignments,
        mut test: impl FnMut(&Line) -> bool,
    ) -> bool {
        match self {
            Self::Any => input.lines().iter().any(test),
            Self::Nth(n) => n
                .checked_sub(1)
                .and_then(|i| input.lines().get(i))
                .is_some_and(test),
            Self::Named(name) => {
                assignments.refine(&[name.as_str()], input.lines().len(), |bound| {
                    test(&input.lines()[bound[0]])
                })
            }
        }
    }

    /// Returns the selectors generation uses for `input`, paired with their lines.
    ///
    /// A single line needs no prefix; otherwise every line is addressed by number. When lines
    /// share some x, every line is also addressed by its standard name.
    #[must_use]
    pub fn for_generation(input: &Input) -> Vec<(Self, &Line)> {
        match input.lines() {
            [only] => vec![(Self::Any, only)],
            lines => {
                let mut selectors: Vec<(Self, &Line)> = lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| (Self::Nth(i + 1), line))
                    .collect();
                if input.lines_overlap_horizontally() {
                    selectors.extend(
                        lines
                            .iter()
                            .enumerate()
                            .map(|(i, line)| (Self::Named(standard_line_name(i)), line)),
                    );
                }
                selectors
            }
        }
    }
}

/// Returns the name generation gives the line at `index`: `A` to `Z`, then `AA`, `AB` and so on.
#[must_use]
pub fn standard_line_name(index: usize) -> String {
    const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut letters = Vec::new();
    let mut rest = index + 1;
    while rest > 0 {
        rest -= 1;
        letters.push(char::from(LETTERS[rest % 26]));
        rest /= 26;
    }
    letters.iter().rev().collect()
}

pub(crate) fn is_line_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}

/// The ways line names can still be bound to the lines of one answer.
///
/// Each binding gives every known name a different line. Clauses that mention names narrow the
/// bindings to those under which they hold; a clause that holds under none leaves them as they
/// were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignments {
    names: Vec<String>,
    bindings: Vec<Vec<usize>>,
}

impl Default for Assignments {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            bindings: vec![Vec::new()],
        }
    }
}

impl Assignments {
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns every remaining binding, one line index per name in [`names`](Self::names) order.
    #[must_use]
    pub fn bindings(&self) -> &[Vec<usize>] {
        &self.bindings
    }

    /// Keeps the bindings under which `holds` is true, binding any new name in `names` to each
    /// unused line of `line_count` in turn.
    ///
    /// `holds` receives the lines bound to `names`, in the same order. Returns `false`, leaving
    /// the bindings unchanged, if none survive.
    pub fn refine(
        &mut self,
        names: &[&str],
        line_count: usize,
        mut holds: impl FnMut(&[usize]) -> bool,
    ) -> bool {
        let mut all_names = self.names.clone();
        for name in names {
            if !all_names.iter().any(|known| known == name) {
                all_names.push((*name).to_owned());
            }
        }

        let mut bindings = self.bindings.clone();
        for _ in self.names.len()..all_names.len() {
            bindings = bindings
                .into_iter()
                .flat_map(|binding| {
                    (0..line_count)
                        .filter(|line| !binding.contains(line))
                        .map(|line| {
                            let mut extended = binding.clone();
                            extended.push(line);
                            extended
                        })
                        .collect::<Vec<_>>()
                })
                .collect();
        }

        let positions: Vec<usize> = names
            .iter()
            .filter_map(|name| all_names.iter().position(|known| known == name))
            .collect();
        let mut bound = Vec::with_capacity(positions.len());
        bindings.retain(|binding| {
            bound.clear();
            bound.extend(positions.iter().map(|&position| binding[position]));
            holds(&bound)
        });

        if bindings.is_empty() {
            return false;
        }
        self.names = all_names;
        self.bindings = bindings;
        true
    }
}

impl fmt::Display for LineSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

/// Cuts a line at the x of each of its points of interest.
///
/// Neighbouring pieces share the cut point. A line without points of interest is returned whole.
#[must_use]
pub fn split_at_stationary_points(line: &Line) -> Vec<Line> {
    let mut pieces = Vec::with_capacity(line.points_of_interest().len() + 1);
    let mut remainder = line.clone();
    for poi in line.points_of_interest() {
        let x = poi.point.x;
        pieces.push(Region::left_of_x(x).clip(&remainder));
        remainder = Region::right_of_x(x).clip(&remainder);
    }
    pieces.push(remainder);
    pieces
}
