use crate::error::SpecError;
use crate::geometry::Input;

use super::{Feature, MarkingContext};

/// The answer has exactly this many curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurvesCount {
    count: usize,
}

impl CurvesCount {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Feature for CurvesCount {
    const TAG: &'static str = "curves";
    type Subject = Input;

    fn deserialize(data: &str) -> Result<Self, SpecError> {
        data.trim()
            .parse()
            .map(Self::new)
            .map_err(|e| SpecError::invalid(Self::TAG, data, format!("not a number: {e}")))
    }

    fn serialize(&self) -> String {
        self.count.to_string()
    }

    fn test(&self, input: &Input, _context: &MarkingContext) -> bool {
        input.lines().len() == self.count
    }

    fn generate(input: &Input, _context: &MarkingContext) -> Option<Self> {
        let count = input.lines().len();
        (count >= 2).then_some(Self::new(count))
    }
}
