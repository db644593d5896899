//! Port capability
//!
//! A sensor wrapper never talks to the filesystem directly. It consumes a
//! [`SensorPort`]: anything that can report the bound driver, get and set the
//! operating mode, and read a named attribute. The sysfs driver crate and the
//! mock driver crate both implement this trait.
//!
//! # Contract
//!
//! - Every call is synchronous and blocking.
//! - Failures are reported as [`Ev3Error`]; raw I/O failures use
//!   [`Ev3Error::Io`] and are never reinterpreted.
//! - An unbound port reports [`Ev3Error::InvalidPort`].
//! - Implementations give no atomicity across calls. A `mode()` followed by
//!   `attribute()` may observe a mode change made through another handle to
//!   the same device.
//!
//! # Example
//!
//! ```rust,ignore
//! fn describe<P: SensorPort>(port: &P) -> Ev3Result<String> {
//!     Ok(format!("{} on {} in {}", port.driver_name()?, port.address(), port.mode()?))
//! }
//! ```

use crate::error::Ev3Result;
use std::sync::Arc;

/// Capability: attribute access to one device bound to a port.
pub trait SensorPort {
    /// Port address used for log fields and error messages (e.g. `ev3-ports:in2`).
    fn address(&self) -> &str;

    /// Name of the driver currently bound to the port.
    fn driver_name(&self) -> Ev3Result<String>;

    /// Current operating mode token.
    fn mode(&self) -> Ev3Result<String>;

    /// Select a new operating mode.
    ///
    /// Fails with an I/O error when the device rejects the token.
    fn set_mode(&self, mode: &str) -> Ev3Result<()>;

    /// Raw textual content of a named attribute.
    fn attribute(&self, name: &str) -> Ev3Result<String>;
}

impl<T: SensorPort + ?Sized> SensorPort for &T {
    fn address(&self) -> &str {
        (**self).address()
    }

    fn driver_name(&self) -> Ev3Result<String> {
        (**self).driver_name()
    }

    fn mode(&self) -> Ev3Result<String> {
        (**self).mode()
    }

    fn set_mode(&self, mode: &str) -> Ev3Result<()> {
        (**self).set_mode(mode)
    }

    fn attribute(&self, name: &str) -> Ev3Result<String> {
        (**self).attribute(name)
    }
}

impl<T: SensorPort + ?Sized> SensorPort for Box<T> {
    fn address(&self) -> &str {
        (**self).address()
    }

    fn driver_name(&self) -> Ev3Result<String> {
        (**self).driver_name()
    }

    fn mode(&self) -> Ev3Result<String> {
        (**self).mode()
    }

    fn set_mode(&self, mode: &str) -> Ev3Result<()> {
        (**self).set_mode(mode)
    }

    fn attribute(&self, name: &str) -> Ev3Result<String> {
        (**self).attribute(name)
    }
}

impl<T: SensorPort + ?Sized> SensorPort for Arc<T> {
    fn address(&self) -> &str {
        (**self).address()
    }

    fn driver_name(&self) -> Ev3Result<String> {
        (**self).driver_name()
    }

    fn mode(&self) -> Ev3Result<String> {
        (**self).mode()
    }

    fn set_mode(&self, mode: &str) -> Ev3Result<()> {
        (**self).set_mode(mode)
    }

    fn attribute(&self, name: &str) -> Ev3Result<String> {
        (**self).attribute(name)
    }
}
