use tracing::debug;

use crate::error::SpecError;
use crate::geometry::{Line, Sector, SectorSet};

use super::{Feature, MarkingContext};

/// The line passes through exactly these sectors, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Through {
    sectors: Vec<Sector>,
}

impl Through {
    /// Creates the feature from a non-empty sector path.
    #[must_use]
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self { sectors }
    }

    #[must_use]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }
}

impl Feature for Through {
    const TAG: &'static str = "through";
    type Subject = Line;

    fn deserialize(data: &str) -> Result<Self, SpecError> {
        let sectors = data
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Sector::from_name)
            .collect::<Result<Vec<_>, _>>()?;
        if sectors.is_empty() {
            return Err(SpecError::invalid(Self::TAG, data, "no sectors listed"));
        }
        Ok(Self::new(sectors))
    }

    fn serialize(&self) -> String {
        self.sectors
            .iter()
            .map(|sector| sector.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn test(&self, line: &Line, context: &MarkingContext) -> bool {
        let actual = context.classifier().sector_sets(line);
        debug!(?actual, "line passed through sectors");
        follows_path(&self.sectors, &actual)
    }

    fn generate(line: &Line, context: &MarkingContext) -> Option<Self> {
        let sectors = context.classifier().convert_line_to_sector_list(line);
        (!sectors.is_empty()).then(|| Self::new(sectors))
    }
}

/// Tests whether `actual` walks through `expected` in order.
///
/// Each expected sector must cover one or more consecutive sets containing it, one set may be
/// covered by two neighbouring expected sectors, and empty sets are skipped.
fn follows_path(expected: &[Sector], actual: &[SectorSet]) -> bool {
    let (e, a) = (expected.len(), actual.len());
    // matched[i][j]: expected[i..] can be matched against actual[j..].
    let mut matched = vec![vec![false; a + 1]; e + 1];
    matched[e][a] = true;
    for j in (0..a).rev() {
        matched[e][j] = actual[j].is_empty() && matched[e][j + 1];
    }

    for i in (0..e).rev() {
        for j in (0..a).rev() {
            matched[i][j] = if actual[j].is_empty() {
                matched[i][j + 1]
            } else if actual[j].contains(&expected[i]) {
                matched[i][j + 1] || matched[i + 1][j] || matched[i + 1][j + 1]
            } else {
                false
            };
        }
    }

    matched[0][0]
}
