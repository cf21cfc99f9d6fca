pub mod error;
pub mod features;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod selection;
pub mod settings;
pub mod specification;
pub mod wire;

pub use error::{GraphmarkError, Result};
pub use settings::Settings;
pub use specification::Specification;
