//! Configuration for the sensor framework.
//! This module handles parsing and validation of the
//! ~/.config/sensord/sensors.json configuration file.

mod io;
mod model;
mod validation;

pub use io::{CONFIG_PATH_ENV, default_config_path, expand_tilde, load_config_from_path, save_config_to_path};
pub use model::{ComponentFilter, ConfigError, DEFAULT_SAMPLE_INTERVAL_SECS, SensorConfig};
pub use validation::{ValidationError, validate_component_name, validate_config};
