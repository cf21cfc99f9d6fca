pub mod classifier;
pub mod line;
pub mod sector;
pub mod segment;

pub use classifier::{SectorClassifier, SectorSet};
pub use line::{Input, Line, PointKind, PointOfInterest};
pub use sector::{Intersection, Region, Sector};
pub use segment::{IntersectionParam, Segment, Side};
