//! Dependency specifiers, parsed with `pep508_rs`.
//!
//! The PEP 508 grammar, PEP 440 versions and operator rules (wildcards,
//! `~=` segment counts) and environment markers are all validated by the
//! parser; this module only reduces the result to what an environment
//! entry needs. The name is kept as written, not normalized.

use crate::domain::model::{Requirement, Specifier};
use crate::utils::error::{BeniError, Result};
use pep508_rs::VersionOrUrl;
use std::str::FromStr;

type Pep508Requirement = pep508_rs::Requirement;

pub fn parse_requirement(input: &str) -> Result<Requirement> {
    let parsed =
        Pep508Requirement::from_str(input).map_err(|e| BeniError::RequirementError {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

    let (specifier, url) = match &parsed.version_or_url {
        Some(VersionOrUrl::VersionSpecifier(specifiers)) => {
            // Equal clauses (`>=1.0` and `>=1.0.0`) collapse to the first one.
            let mut unique = Vec::new();
            for clause in specifiers.iter() {
                if !unique.contains(&clause) {
                    unique.push(clause);
                }
            }
            (
                Specifier::from_clauses(unique.into_iter().map(|c| c.to_string())),
                None,
            )
        }
        Some(VersionOrUrl::Url(url)) => (Specifier::default(), Some(url.to_string())),
        None => (Specifier::default(), None),
    };

    Ok(Requirement {
        name: name_as_written(input).to_string(),
        extras: parsed.extras.iter().map(|e| e.to_string()).collect(),
        specifier,
        url,
    })
}

// Only called on input the parser accepted, so the leading run of name
// characters is the distribution name.
fn name_as_written(input: &str) -> &str {
    let trimmed = input.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

impl FromStr for Requirement {
    type Err = BeniError;

    fn from_str(s: &str) -> Result<Self> {
        parse_requirement(s)
    }
}
