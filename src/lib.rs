//! `ev3-sound`
//!
//! Typed accessor for the LEGO NXT sound sensor on an EV3 running ev3dev.
//!
//! The sensor wrapper checks at construction that the port really drives a
//! `lego-nxt-sound` device, then exposes two readings. Each read makes sure
//! the device is in the mode the reading needs (switching it when
//! auto-switch is enabled), reads `value0` and parses it as a float.
//!
//! ## Crates
//!
//! - `ev3-core`: [`SensorPort`], mode guard, measurements, [`Ev3Error`]
//! - `ev3-driver-sysfs`: [`SysfsPort`] over `/sys/class/lego-sensor`
//! - `ev3-driver-mock`: in-memory port for tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use ev3_sound::{config::Ev3Config, logging, SoundSensor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Ev3Config::load()?;
//! config.validate()?;
//! logging::init_from_config(&config)?;
//!
//! let sensor = SoundSensor::open(&config.sensor)?;
//! println!("{:.1} %", sensor.read_sound_pressure()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod factory;
pub mod logging;
pub mod sound_sensor;

pub use ev3_core::{Ev3Error, Ev3Result, SensorPort};
pub use ev3_driver_sysfs::SysfsPort;
pub use factory::SoundSensorFactory;
pub use sound_sensor::{
    SoundMode, SoundSensor, DRIVER_NAME, SOUND_PRESSURE, SOUND_PRESSURE_LOW,
    SOUND_PRESSURE_LOW_REQUIRED_MODE, SOUND_PRESSURE_LOW_VALUE_INDEX,
    SOUND_PRESSURE_REQUIRED_MODE, SOUND_PRESSURE_VALUE_INDEX,
};
