use crate::utils::error::{BeniError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// PEP 508 distribution name.
const PACKAGE_NAME_PATTERN: &str = r"[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?";

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}$", PACKAGE_NAME_PATTERN)).expect("package name regex")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BeniError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BeniError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BeniError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BeniError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BeniError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BeniError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

/// Package names end up in a URL path, so anything outside the PEP 508
/// name alphabet is rejected before a request is built.
pub fn validate_package_name(field_name: &str, name: &str) -> Result<()> {
    if is_valid_package_name(name) {
        Ok(())
    } else {
        Err(BeniError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Not a valid package name".to_string(),
        })
    }
}
