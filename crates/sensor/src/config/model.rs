//! Data models for sensor configuration.

use crate::trail::DEFAULT_TRAIL_CAPACITY;
use sensord_types::ProcessRole;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default sampling period for `sensord run`, in seconds.
pub const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 5;

/// Sensor configuration file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SensorConfig {
    /// Which providers take part in selection.
    #[serde(default)]
    pub components: ComponentFilter,

    /// Role of this process. The command line overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ProcessRole>,

    /// Seconds between two sampling rounds.
    #[serde(default = "default_sample_interval_secs")]
    pub sample_interval_secs: u64,

    /// Maximum number of selection decisions kept for diagnostics.
    #[serde(default = "default_trail_capacity")]
    pub trail_capacity: usize,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            components: ComponentFilter::default(),
            role: None,
            sample_interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
        }
    }
}

impl SensorConfig {
    /// The configured role, falling back to `Application`.
    pub fn role_or_default(&self) -> ProcessRole {
        self.role.unwrap_or_default()
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }
}

fn default_sample_interval_secs() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_SECS
}

fn default_trail_capacity() -> usize {
    DEFAULT_TRAIL_CAPACITY
}

/// Include/exclude lists applied to the provider catalog before selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentFilter {
    /// When present, only these providers are kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// Providers that are never kept.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl ComponentFilter {
    /// Whether the filter lets every provider through.
    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_empty()
    }

    pub fn allows(&self, provider: &str) -> bool {
        if self.exclude.iter().any(|name| name == provider) {
            return false;
        }
        match &self.include {
            Some(include) => include.iter().any(|name| name == provider),
            None => true,
        }
    }
}

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] crate::config::ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_camel_case_config() {
        let json = r#"{
          "components": { "include": ["heartbeat", "resusage"], "exclude": ["file"] },
          "role": "coordinator",
          "sampleIntervalSecs": 2,
          "trailCapacity": 32
        }"#;

        let cfg: SensorConfig = serde_json::from_str(json).expect("config deserializes");
        assert_eq!(cfg.components.include.as_deref(), Some(&["heartbeat".to_string(), "resusage".to_string()][..]));
        assert_eq!(cfg.components.exclude, vec!["file".to_string()]);
        assert_eq!(cfg.role, Some(ProcessRole::Coordinator));
        assert_eq!(cfg.sample_interval(), Duration::from_secs(2));
        assert_eq!(cfg.trail_capacity, 32);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: SensorConfig = serde_json::from_str("{}").expect("config deserializes");
        assert_eq!(cfg, SensorConfig::default());
        assert_eq!(cfg.role_or_default(), ProcessRole::Application);
        assert!(cfg.components.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<SensorConfig>(r#"{ "sampleInterval": 3 }"#).is_err());
    }

    #[test]
    fn filter_applies_exclude_over_include() {
        let filter = ComponentFilter {
            include: Some(vec!["heartbeat".into(), "loadavg".into()]),
            exclude: vec!["loadavg".into()],
        };
        assert!(filter.allows("heartbeat"));
        assert!(!filter.allows("loadavg"));
        assert!(!filter.allows("resusage"));

        let exclude_only = ComponentFilter {
            include: None,
            exclude: vec!["file".into()],
        };
        assert!(exclude_only.allows("resusage"));
        assert!(!exclude_only.allows("file"));
    }
}
