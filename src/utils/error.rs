use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeniError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read manifest {path}: {source}")]
    ManifestReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {message}")]
    ManifestError { path: String, message: String },

    #[error("Invalid requirement '{input}': {reason}")]
    RequirementError { input: String, reason: String },

    #[error("YAML serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Output,
    Configuration,
}

impl BeniError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BeniError::HttpError(_) | BeniError::UrlError(_) => ErrorCategory::Network,
            BeniError::ManifestReadError { .. }
            | BeniError::ManifestError { .. }
            | BeniError::RequirementError { .. } => ErrorCategory::Input,
            BeniError::SerializationError(_) | BeniError::IoError(_) => ErrorCategory::Output,
            BeniError::InvalidConfigValueError { .. }
            | BeniError::ValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BeniError::HttpError(e) if e.is_connect() => {
                "Could not reach the conda-forge package index".to_string()
            }
            BeniError::HttpError(e) if e.is_timeout() => {
                "Timed out while checking conda-forge".to_string()
            }
            BeniError::ManifestReadError { path, .. } => {
                format!("Could not read config file {}", path)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and run beni again",
            ErrorCategory::Input => {
                "Fix the pyproject.toml file (module name and requirement specifiers) and retry"
            }
            ErrorCategory::Output => "Check that standard output is writable and retry",
            ErrorCategory::Configuration => "Check the command line arguments and BENI_* variables",
        }
    }
}

pub type Result<T> = std::result::Result<T, BeniError>;
