//! Reads flit `pyproject.toml` files.
//!
//! Two layouts are understood: the flit metadata table
//! (`[tool.flit.metadata]`) and the standard `[project]` table. Both are
//! reduced to a [`Manifest`]: the import name of the module, the optional
//! `requires_python` constraint and the flat `requires_dist` list, with
//! extras folded in behind an `extra == "..."` marker.

use crate::domain::model::{Manifest, ManifestMetadata};
use crate::utils::error::{BeniError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    tool: Option<ToolTable>,
    project: Option<ProjectTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    flit: Option<FlitTable>,
}

#[derive(Debug, Default, Deserialize)]
struct FlitTable {
    metadata: Option<FlitMetadata>,
    module: Option<FlitModule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FlitMetadata {
    module: Option<String>,
    requires_python: Option<String>,
    requires: Option<Vec<String>>,
    requires_extra: Option<BTreeMap<String, Vec<String>>>,
    dev_requires: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FlitModule {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ProjectTable {
    name: Option<String>,
    requires_python: Option<String>,
    dependencies: Option<Vec<String>>,
    optional_dependencies: Option<BTreeMap<String, Vec<String>>>,
}

impl Manifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| BeniError::ManifestReadError {
                path: path.display().to_string(),
                source,
            })?;
        parse_manifest(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_manifest(content, "<string>")
    }
}

fn parse_manifest(content: &str, origin: &str) -> Result<Manifest> {
    let fail = |message: String| BeniError::ManifestError {
        path: origin.to_string(),
        message,
    };

    let pyproject: PyProject =
        toml::from_str(content).map_err(|e| fail(format!("TOML parsing error: {}", e)))?;

    let flit = pyproject.tool.and_then(|t| t.flit).unwrap_or_default();

    if let Some(metadata) = flit.metadata {
        return from_flit_metadata(metadata).map_err(fail);
    }

    if let Some(project) = pyproject.project {
        let module_override = flit.module.and_then(|m| m.name);
        return from_project_table(project, module_override).map_err(fail);
    }

    Err(fail(
        "neither [tool.flit.metadata] nor [project] table found".to_string(),
    ))
}

fn from_flit_metadata(md: FlitMetadata) -> std::result::Result<Manifest, String> {
    let module = md
        .module
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| "[tool.flit.metadata] is missing 'module'".to_string())?;

    let mut extras = md.requires_extra.unwrap_or_default();
    if let Some(dev) = md.dev_requires {
        if extras.contains_key("dev") {
            return Err(
                "dev-requires occurs together with its replacement requires-extra.dev".to_string(),
            );
        }
        extras.insert("dev".to_string(), dev);
    }

    let mut requires_dist = md.requires.unwrap_or_default();
    requires_dist.extend(expand_extras(&extras));

    Ok(Manifest {
        module,
        metadata: ManifestMetadata {
            requires_python: md.requires_python,
            requires_dist,
        },
    })
}

fn from_project_table(
    project: ProjectTable,
    module_override: Option<String>,
) -> std::result::Result<Manifest, String> {
    let module = match module_override {
        Some(name) => name,
        None => project
            .name
            .as_deref()
            .map(module_name_from_dist)
            .ok_or_else(|| "[project] is missing 'name'".to_string())?,
    };
    if module.trim().is_empty() {
        return Err("module name is empty".to_string());
    }

    let mut requires_dist = project.dependencies.unwrap_or_default();
    requires_dist.extend(expand_extras(
        &project.optional_dependencies.unwrap_or_default(),
    ));

    Ok(Manifest {
        module,
        metadata: ManifestMetadata {
            requires_python: project.requires_python,
            requires_dist,
        },
    })
}

/// `my-package` and `my.package` are imported as `my_package`.
fn module_name_from_dist(name: &str) -> String {
    name.replace(['-', '.'], "_")
}

fn expand_extras(extras: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    let mut expanded = Vec::new();
    for (extra, requirements) in extras {
        for requirement in requirements {
            match requirement.split_once(';') {
                Some((req, marker)) => expanded.push(format!(
                    "{} ; extra == \"{}\" and ({})",
                    req, extra, marker
                )),
                None => expanded.push(format!("{} ; extra == \"{}\"", requirement, extra)),
            }
        }
    }
    expanded
}
