use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const CONDA_FORGE_CHANNEL: &str = "conda-forge";

/// A parsed dependency specifier: `name[extras] specifier ; marker` or
/// `name[extras] @ url ; marker`. Markers are validated but not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub extras: Vec<String>,
    pub specifier: Specifier,
    pub url: Option<String>,
}

impl Requirement {
    /// The string placed in the environment: name plus version constraint.
    pub fn environment_entry(&self) -> String {
        format!("{}{}", self.name, self.specifier)
    }
}

/// Set of version clauses such as `>=1.0` and `<2`.
///
/// Displays as the clauses sorted and comma-joined, and as an empty string
/// when unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specifier {
    clauses: BTreeSet<String>,
}

impl Specifier {
    pub fn from_clauses<I: IntoIterator<Item = String>>(clauses: I) -> Self {
        Self {
            clauses: clauses.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for clause in &self.clauses {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(clause)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    Package(String),
    Pip { pip: Vec<String> },
}

impl DependencyEntry {
    /// `{pip: [flit]}`, always the first dependency.
    pub fn pip_bootstrap() -> Self {
        DependencyEntry::Pip {
            pip: vec!["flit".to_string()],
        }
    }

    pub fn as_package(&self) -> Option<&str> {
        match self {
            DependencyEntry::Package(name) => Some(name),
            DependencyEntry::Pip { .. } => None,
        }
    }
}

/// Conda environment description, serialized as `environment.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub channels: Vec<String>,
    pub dependencies: Vec<DependencyEntry>,
}

impl Environment {
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().filter_map(DependencyEntry::as_package)
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.packages().any(|p| p == package)
    }
}

/// Declared metadata of one manifest, as read from `pyproject.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestMetadata {
    pub requires_python: Option<String>,
    pub requires_dist: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub module: String,
    pub metadata: ManifestMetadata,
}
