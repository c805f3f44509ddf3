pub mod engine;
pub mod render;
pub mod requirement;
pub mod synthesizer;

pub use crate::domain::model::{DependencyEntry, Environment, Manifest, Requirement};
pub use crate::domain::ports::AvailabilityChecker;
pub use crate::utils::error::Result;
