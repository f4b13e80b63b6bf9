//! Configuration validation.

use crate::config::SensorConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

static COMPONENT_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9._-]+$").expect("component name regex should compile"));

/// Validate the entire sensor configuration.
pub fn validate_config(config: &SensorConfig) -> Result<(), ValidationError> {
    let filter = &config.components;
    for name in filter.include.iter().flatten().chain(&filter.exclude) {
        validate_component_name(name)?;
    }

    if let Some(name) = filter.include.iter().flatten().find(|name| filter.exclude.contains(name)) {
        return Err(ValidationError::Conflicting { name: name.clone() });
    }

    if config.sample_interval_secs == 0 {
        return Err(ValidationError::NotPositive {
            field: "sampleIntervalSecs".to_string(),
        });
    }

    if config.trail_capacity == 0 {
        return Err(ValidationError::NotPositive {
            field: "trailCapacity".to_string(),
        });
    }

    debug!("validated sensor configuration");
    Ok(())
}

/// Validate a provider name used in a component filter.
pub fn validate_component_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InvalidComponentName {
            name: name.to_string(),
            reason: "Component name cannot be empty".to_string(),
        });
    }

    if !COMPONENT_NAME_REGEX.is_match(name) {
        return Err(ValidationError::InvalidComponentName {
            name: name.to_string(),
            reason: "Component name must contain only lowercase letters, numbers, dots, underscores, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Errors that can occur during validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid component name '{name}': {reason}")]
    InvalidComponentName { name: String, reason: String },

    #[error("Component '{name}' is both included and excluded")]
    Conflicting { name: String },

    #[error("'{field}' must be greater than zero")]
    NotPositive { field: String },
}
