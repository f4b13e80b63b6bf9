//! Configuration IO helpers.

use crate::config::{ConfigError, SensorConfig, validate_config};
use dirs_next::{config_dir, home_dir};
use std::env;
use std::fs;
use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the configuration path.
pub const CONFIG_PATH_ENV: &str = "SENSORD_CONFIG_PATH";

/// Returns the default path for the sensor configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("sensord").join("sensors.json")
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Loads and validates configuration from a specific path.
///
/// A missing file yields the defaults. `.yaml`/`.yml` files are read as YAML, anything else as JSON.
pub fn load_config_from_path(path: &Path) -> Result<SensorConfig, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no sensor configuration file, using defaults");
        return Ok(SensorConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: SensorConfig = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    validate_config(&config)?;
    debug!(path = %path.display(), "loaded sensor configuration");
    Ok(config)
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_config_to_path(config: &SensorConfig, path: &Path) -> Result<(), ConfigError> {
    validate_config(config)?;
    if let Some(parent_directory) = path.parent() {
        create_dir_all(parent_directory)?;
    }

    let content = if is_yaml(path) {
        serde_yaml::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    write(path, content)?;
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(path.extension().and_then(|ext| ext.to_str()), Some("yaml" | "yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentFilter;
    use sensord_types::ProcessRole;
    use tempfile::tempdir;

    #[test]
    fn default_path_honors_environment_override() {
        let override_path = "~/custom/sensord/sensors.json";
        temp_env::with_var(CONFIG_PATH_ENV, Some(override_path), || {
            let path = default_config_path();
            let expected = expand_tilde(override_path);
            assert_eq!(path, expected);
        });
    }

    #[test]
    fn blank_override_falls_back_to_config_dir() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("   "), || {
            assert!(default_config_path().ends_with("sensord/sensors.json"));
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, SensorConfig::default());
    }

    #[test]
    fn save_then_load_json_and_yaml() {
        let dir = tempdir().unwrap();
        let config = SensorConfig {
            components: ComponentFilter {
                include: None,
                exclude: vec!["loadavg".into()],
            },
            role: Some(ProcessRole::Daemon),
            sample_interval_secs: 1,
            trail_capacity: 8,
        };

        for name in ["nested/sensors.json", "sensors.yaml"] {
            let path = dir.path().join(name);
            save_config_to_path(&config, &path).unwrap();
            assert_eq!(load_config_from_path(&path).unwrap(), config);
        }
    }

    #[test]
    fn invalid_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sensors.json");
        fs::write(&path, r#"{ "sampleIntervalSecs": 0 }"#).unwrap();
        assert!(matches!(load_config_from_path(&path), Err(ConfigError::Validation(_))));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_config_from_path(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn expands_home_prefix() {
        let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
        assert_eq!(expand_tilde("~/a/b"), home.join("a/b"));
        assert_eq!(expand_tilde("/etc/sensord.json"), PathBuf::from("/etc/sensord.json"));
    }
}
