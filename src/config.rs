//! Configuration System using Figment
//!
//! Configuration is loaded from:
//! 1. `config/ev3-sound.toml` (base configuration, optional)
//! 2. Environment variables (prefixed with `EV3_SOUND_`, nested keys split
//!    on `__`)
//!
//! Every field has a default, so a missing file yields a working
//! configuration for the sensor on input port 1.
//!
//! # Example
//! ```no_run
//! use ev3_sound::config::Ev3Config;
//!
//! let config = Ev3Config::load()?;
//! config.validate()?;
//! println!("Sound sensor on {}", config.sensor.port);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use ev3_core::{Ev3Error, Ev3Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/ev3-sound.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EV3_SOUND_";

/// Accepted log levels
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ev3Config {
    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Sound sensor binding
    #[serde(default)]
    pub sensor: SensorConfig,
}

/// Where the sound sensor lives and how it behaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Port address (`ev3-ports:in2`) or its suffix (`in2`)
    #[serde(default = "default_port")]
    pub port: String,
    /// Device directory (`/sys/class/lego-sensor/sensorN`); skips the port
    /// lookup when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_dir: Option<PathBuf>,
    /// Whether reads switch the device mode automatically
    #[serde(default = "default_auto_switch_mode")]
    pub auto_switch_mode: bool,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_port() -> String {
    "in1".to_string()
}

fn default_auto_switch_mode() -> bool {
    true
}

impl Default for Ev3Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            sensor: SensorConfig::default(),
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            device_dir: None,
            auto_switch_mode: default_auto_switch_mode(),
        }
    }
}

impl Ev3Config {
    /// Load configuration from [`DEFAULT_CONFIG_PATH`] and environment variables
    ///
    /// Environment variables override the file, e.g.
    /// `EV3_SOUND_LOG_LEVEL=debug` or `EV3_SOUND_SENSOR__PORT=in3`.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific file path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    /// Layered providers: defaults, then the file, then the environment
    pub fn figment<P: AsRef<Path>>(path: P) -> Figment {
        Figment::from(Serialized::defaults(Ev3Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Ev3Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Ev3Error::Configuration(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        self.sensor.validate()
    }
}

impl SensorConfig {
    /// Validate the sensor section
    pub fn validate(&self) -> Ev3Result<()> {
        if self.port.trim().is_empty() {
            return Err(Ev3Error::Configuration(
                "sensor.port must not be empty".to_string(),
            ));
        }
        if self
            .device_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            return Err(Ev3Error::Configuration(
                "sensor.device_dir must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }
}
