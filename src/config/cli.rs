use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "beni", version)]
#[command(about = "Generate an environment.yml from flit config files")]
pub struct CliConfig {
    /// flit config files
    #[arg(value_name = "pyproject.toml", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Conda packages to ignore
    #[arg(long, value_name = "PACKAGE", num_args = 0..)]
    pub ignore: Vec<String>,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for path in &self.paths {
            validate_path("paths", &path.to_string_lossy())?;
        }
        for name in &self.ignore {
            validate_non_empty_string("ignore", name)?;
        }
        Ok(())
    }
}
