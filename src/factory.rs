//! Config-driven construction of sound sensors.
//!
//! ```rust,ignore
//! use ev3_core::SensorFactory;
//! use ev3_sound::SoundSensorFactory;
//!
//! let config = toml::toml! {
//!     port = "in2"
//!     auto_switch_mode = false
//! };
//! let sensor = SoundSensorFactory.build(config.into())?;
//! ```

use crate::config::SensorConfig;
use crate::sound_sensor::{SoundSensor, DRIVER_NAME};
use ev3_core::{Ev3Error, Ev3Result, SensorFactory};
use ev3_driver_sysfs::SysfsPort;

/// Factory for [`SoundSensor`] instances bound to sysfs ports.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundSensorFactory;

impl SoundSensorFactory {
    fn parse(config: toml::Value) -> Ev3Result<SensorConfig> {
        config
            .try_into()
            .map_err(|e| Ev3Error::Configuration(format!("Invalid sound sensor config: {}", e)))
    }
}

impl SensorFactory for SoundSensorFactory {
    type Sensor = SoundSensor<SysfsPort>;

    fn driver_name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn name(&self) -> &'static str {
        "LEGO NXT Sound Sensor"
    }

    fn validate(&self, config: &toml::Value) -> Ev3Result<()> {
        Self::parse(config.clone())?.validate()
    }

    fn build(&self, config: toml::Value) -> Ev3Result<Self::Sensor> {
        let cfg = Self::parse(config)?;
        cfg.validate()?;
        SoundSensor::open(&cfg)
    }
}
