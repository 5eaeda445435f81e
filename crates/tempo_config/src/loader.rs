//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// The project file name looked up inside a project directory.
pub const CONFIG_FILE_NAME: &str = "tempo.toml";

/// Loads and validates a `tempo.toml` configuration from a project directory.
///
/// Reads `<project_dir>/tempo.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a `tempo.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks the structural rules that do not need layer or profile resolution.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }

    for (index, entry) in config.stackup.iter().enumerate() {
        match (&entry.copper, &entry.dielectric) {
            (Some(_), None) | (None, Some(_)) => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "stackup[{index}] must set exactly one of 'copper' or 'dielectric'"
                )))
            }
        }
    }
    if !config.stackup.iter().any(|entry| entry.copper.is_some()) {
        return Err(ConfigError::ValidationError(
            "stackup has no copper layer".to_string(),
        ));
    }

    for (index, profile) in config.profiles.iter().enumerate() {
        if profile.name.is_empty() {
            return Err(ConfigError::MissingField(format!("profiles[{index}].name")));
        }
    }
    for (index, class) in config.net_classes.iter().enumerate() {
        if class.name.is_empty() {
            return Err(ConfigError::MissingField(format!(
                "net_classes[{index}].name"
            )));
        }
    }
    Ok(())
}
