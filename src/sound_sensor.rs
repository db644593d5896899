//! LEGO NXT Sound Sensor
//!
//! Reference: ev3dev `lego-nxt-sound` driver
//!
//! Modes:
//! - `DB`  = sound pressure, flat weighting, percent
//! - `DBA` = sound pressure, A-weighting (levels up to ~55 dB), percent
//!
//! Both modes report their reading in `value0`; the mode decides which
//! filter the sensor applies to the shared channel.
//!
//! # Concurrency
//!
//! A read is "query mode, maybe switch, read `value0`". That sequence is not
//! atomic with respect to another handle on the same device switching the
//! mode in between. Callers sharing a sensor between threads must serialize
//! access themselves, e.g. with a `Mutex<SoundSensor<_>>`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev3_driver_sysfs::SysfsPort;
//! use ev3_sound::SoundSensor;
//!
//! let port = SysfsPort::find("in2")?;
//! let mut sensor = SoundSensor::new(port)?;
//!
//! let flat = sensor.read_sound_pressure()?;
//! let weighted = sensor.read_sound_pressure_low()?;
//!
//! // Fail with InvalidMode instead of switching modes silently
//! sensor.set_auto_switch_mode(false);
//! ```

use crate::config::SensorConfig;
use ev3_core::{Ev3Error, Ev3Result, Measurement, SensorPort};
use ev3_driver_sysfs::SysfsPort;
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument, warn};

/// Sound pressure required mode
pub const SOUND_PRESSURE_REQUIRED_MODE: &str = "DB";

/// Sound pressure value index
pub const SOUND_PRESSURE_VALUE_INDEX: u8 = 0;

/// Sound pressure low (A-weighted) required mode
pub const SOUND_PRESSURE_LOW_REQUIRED_MODE: &str = "DBA";

/// Sound pressure low (A-weighted) value index
pub const SOUND_PRESSURE_LOW_VALUE_INDEX: u8 = 0;

/// Driver name of the NXT sound sensor
pub const DRIVER_NAME: &str = "lego-nxt-sound";

/// Flat-weighted sound pressure
pub const SOUND_PRESSURE: Measurement = Measurement::new(
    "sound pressure",
    SOUND_PRESSURE_REQUIRED_MODE,
    SOUND_PRESSURE_VALUE_INDEX,
);

/// A-weighted sound pressure
pub const SOUND_PRESSURE_LOW: Measurement = Measurement::new(
    "sound pressure low",
    SOUND_PRESSURE_LOW_REQUIRED_MODE,
    SOUND_PRESSURE_LOW_VALUE_INDEX,
);

/// Operating modes of the NXT sound sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundMode {
    /// Flat weighting
    Db,
    /// A-weighting
    Dba,
}

impl SoundMode {
    /// All modes, in the order ev3dev lists them.
    pub const ALL: [SoundMode; 2] = [SoundMode::Db, SoundMode::Dba];

    /// Mode token written to the `mode` attribute.
    pub const fn token(&self) -> &'static str {
        match self {
            SoundMode::Db => SOUND_PRESSURE_REQUIRED_MODE,
            SoundMode::Dba => SOUND_PRESSURE_LOW_REQUIRED_MODE,
        }
    }

    /// Measurement read in this mode.
    pub const fn measurement(&self) -> Measurement {
        match self {
            SoundMode::Db => SOUND_PRESSURE,
            SoundMode::Dba => SOUND_PRESSURE_LOW,
        }
    }
}

impl fmt::Display for SoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SoundMode {
    type Err = Ev3Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundMode::ALL
            .into_iter()
            .find(|mode| mode.token() == s)
            .ok_or_else(|| Ev3Error::UnknownMode {
                expected: format!(
                    "{}|{}",
                    SOUND_PRESSURE_REQUIRED_MODE, SOUND_PRESSURE_LOW_REQUIRED_MODE
                ),
                actual: s.to_string(),
            })
    }
}

/// LEGO NXT sound sensor bound to a port.
///
/// Generic over the port so the caller decides ownership: pass a
/// `SysfsPort` by value, `&port`, or an `Arc` shared with other code.
#[derive(Debug)]
pub struct SoundSensor<P: SensorPort> {
    port: P,
    auto_switch_mode: bool,
}

impl<P: SensorPort> SoundSensor<P> {
    /// Bind to `port` after checking that it drives an NXT sound sensor.
    ///
    /// Auto-switch mode starts enabled.
    ///
    /// # Errors
    /// - `InvalidPort` if the port is not bound (from the port)
    /// - `InvalidSensor` if the bound driver is not `lego-nxt-sound`
    /// - `Io` if the driver name cannot be read
    pub fn new(port: P) -> Ev3Result<Self> {
        let driver_name = port.driver_name()?;
        if driver_name != DRIVER_NAME {
            warn!(
                port = port.address(),
                driver = %driver_name,
                "port is not connected to a sound sensor"
            );
            return Err(Ev3Error::InvalidSensor {
                expected: DRIVER_NAME.to_string(),
                actual: driver_name,
            });
        }

        info!(port = port.address(), "NXT sound sensor bound");
        Ok(Self {
            port,
            auto_switch_mode: true,
        })
    }

    /// Sound pressure level in percent, flat weighting (mode `DB`).
    ///
    /// The value is returned as parsed; it is not clamped to 0-100.
    ///
    /// # Errors
    /// - `InvalidMode` if the device is in another mode and auto-switch is off
    /// - `Parse` if `value0` is not a number
    /// - `Io` on attribute access failure
    #[instrument(skip(self), fields(port = self.port.address()), err)]
    pub fn read_sound_pressure(&self) -> Ev3Result<f32> {
        self.read(SoundMode::Db)
    }

    /// Sound pressure level in percent, A-weighting (mode `DBA`).
    ///
    /// Same errors as [`read_sound_pressure`](Self::read_sound_pressure).
    #[instrument(skip(self), fields(port = self.port.address()), err)]
    pub fn read_sound_pressure_low(&self) -> Ev3Result<f32> {
        self.read(SoundMode::Dba)
    }

    /// Read the measurement of `mode`, switching to it if allowed.
    pub fn read(&self, mode: SoundMode) -> Ev3Result<f32> {
        mode.measurement().read(&self.port, self.auto_switch_mode)
    }

    /// Mode the device currently reports.
    ///
    /// Fails with `UnknownMode` if the device reports a token this wrapper
    /// does not know.
    pub fn current_mode(&self) -> Ev3Result<SoundMode> {
        self.port.mode()?.parse()
    }

    /// Enable or disable auto-switch mode. (Default: enabled)
    pub fn set_auto_switch_mode(&mut self, enabled: bool) {
        self.auto_switch_mode = enabled;
    }

    /// Whether auto-switch mode is enabled.
    pub fn is_auto_switch_mode(&self) -> bool {
        self.auto_switch_mode
    }

    /// The port this sensor reads from.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Release the port.
    pub fn into_port(self) -> P {
        self.port
    }
}

impl SoundSensor<SysfsPort> {
    /// Bind to the configured device directory, or look up the configured
    /// port when none is given.
    ///
    /// Applies `auto_switch_mode` from the configuration.
    pub fn open(config: &SensorConfig) -> Ev3Result<Self> {
        let port = match &config.device_dir {
            Some(dir) => SysfsPort::open(dir)?,
            None => SysfsPort::find(&config.port)?,
        };
        let mut sensor = Self::new(port)?;
        sensor.set_auto_switch_mode(config.auto_switch_mode);
        Ok(sensor)
    }
}
