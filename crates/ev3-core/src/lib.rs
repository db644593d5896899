//! `ev3-core`
//!
//! Core trait definitions and types for ev3dev sensor accessors.
//!
//! ## Layers
//!
//! - **SensorPort**: attribute I/O for one device bound to a port (sysfs, mock)
//! - **ModeGuard**: makes sure the device is in the mode a measurement needs
//! - **Measurement**: mode + `valueN` attribute + float parsing
//! - **Sensor wrappers** (in their own crates): validate the driver name and
//!   expose typed reads built from measurements
//!
//! ## Key Types
//!
//! - [`SensorPort`]: capability trait consumed by sensor wrappers
//! - [`ModeGuard`] / [`ensure_mode`]: required-mode policy with auto-switch
//! - [`Measurement`]: descriptor of one readable quantity
//! - [`Ev3Error`]: error taxonomy shared by every layer
//! - [`SensorFactory`]: config-driven construction

pub mod error;
pub mod factory;
pub mod measurement;
pub mod mode;
pub mod port;

pub use error::{Ev3Error, Ev3Result};
pub use factory::SensorFactory;
pub use measurement::{parse_value, Measurement, VALUE_ATTRIBUTE_PREFIX};
pub use mode::{ensure_mode, ModeAction, ModeGuard};
pub use port::SensorPort;
