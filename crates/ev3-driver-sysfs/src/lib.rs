//! ev3dev sysfs driver for ev3 sensor accessors.
//!
//! This crate provides [`SysfsPort`], the [`ev3_core::SensorPort`]
//! implementation that reads and writes the attribute files ev3dev exposes
//! under `/sys/class/lego-sensor`, using `ev3dev-lang-rust` for port lookup
//! and attribute access.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev3_driver_sysfs::SysfsPort;
//!
//! // By port name
//! let port = SysfsPort::find("in2")?;
//!
//! // By device directory
//! let port = SysfsPort::open("/sys/class/lego-sensor/sensor0")?;
//! ```

pub mod port;

pub use port::{SysfsPort, LEGO_SENSOR_CLASS, LEGO_SENSOR_CLASS_DIR};
