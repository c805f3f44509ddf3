use crate::domain::model::Environment;
use crate::utils::error::Result;

pub fn to_yaml(environment: &Environment) -> Result<String> {
    Ok(serde_yaml::to_string(environment)?)
}

pub fn from_yaml(content: &str) -> Result<Environment> {
    Ok(serde_yaml::from_str(content)?)
}
