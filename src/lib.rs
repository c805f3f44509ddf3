pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::forge::{ForgeChecker, ForgeConfig};
pub use crate::core::engine::{EnvironmentEngine, ManifestSet};
pub use crate::domain::model::{DependencyEntry, Environment, Manifest, Requirement};
pub use crate::utils::error::{BeniError, Result};
