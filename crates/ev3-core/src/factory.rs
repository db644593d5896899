//! Sensor factory
//!
//! Config-driven construction of sensor wrappers. A factory parses a TOML
//! table, checks it, and binds the wrapper to the port the table names.
//!
//! # Example: Implementing a Sensor Factory
//!
//! ```rust,ignore
//! use ev3_core::{Ev3Error, Ev3Result, SensorFactory};
//!
//! pub struct TouchSensorFactory;
//!
//! impl SensorFactory for TouchSensorFactory {
//!     type Sensor = TouchSensor<SysfsPort>;
//!
//!     fn driver_name(&self) -> &'static str { "lego-ev3-touch" }
//!     fn name(&self) -> &'static str { "LEGO EV3 Touch Sensor" }
//!
//!     fn validate(&self, config: &toml::Value) -> Ev3Result<()> {
//!         let table = config.as_table().ok_or_else(|| Ev3Error::Configuration("expected table".into()))?;
//!         if !table.contains_key("port") {
//!             return Err(Ev3Error::Configuration("missing 'port' field".into()));
//!         }
//!         Ok(())
//!     }
//!
//!     fn build(&self, config: toml::Value) -> Ev3Result<Self::Sensor> {
//!         self.validate(&config)?;
//!         TouchSensor::open(&config.try_into().map_err(|e| Ev3Error::Configuration(format!("{e}")))?)
//!     }
//! }
//! ```

use crate::error::Ev3Result;

/// Builds a sensor wrapper from a TOML configuration table.
pub trait SensorFactory {
    /// Wrapper type produced by this factory
    type Sensor;

    /// Driver name the produced wrapper requires on its port.
    fn driver_name(&self) -> &'static str;

    /// Human-readable device name.
    fn name(&self) -> &'static str;

    /// Check a configuration table without touching hardware.
    fn validate(&self, config: &toml::Value) -> Ev3Result<()>;

    /// Validate the table, bind the port and construct the wrapper.
    fn build(&self, config: toml::Value) -> Ev3Result<Self::Sensor>;
}
