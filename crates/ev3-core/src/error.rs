//! Error types shared by every ev3dev sensor accessor.
//!
//! `Ev3Error` is the single error type returned by ports, guards and sensors.
//! It is built with `thiserror` so that lower-level failures convert into it
//! with the `?` operator.
//!
//! ## Error Categories
//!
//! 1. **Binding errors** - `InvalidPort`, `InvalidSensor`
//!    - Raised while attaching a sensor wrapper to a port
//!    - Permanent: the port is unbound or drives a different device
//!    - Recovery: fix the wiring or the configured port, then construct again
//!
//! 2. **Mode errors** - `InvalidMode`, `UnknownMode`
//!    - `InvalidMode` is raised by a read while the device sits in another
//!      mode and auto-switch is disabled. Recoverable: switch the mode
//!      manually or enable auto-switch
//!    - `UnknownMode` means the device reports a mode the wrapper does not
//!      drive. Not recoverable through auto-switch
//!
//! 3. **Device data errors** - `Io`, `Parse`
//!    - `Io` is the untouched `std::io::Error` of the attribute access
//!    - `Parse` means the driver returned text that is not a number
//!
//! 4. **Configuration errors** - `Configuration`

use std::num::ParseFloatError;
use thiserror::Error;

/// Convenience alias for results using [`Ev3Error`].
pub type Ev3Result<T> = std::result::Result<T, Ev3Error>;

/// Primary error type for ev3dev sensor access.
#[derive(Error, Debug)]
pub enum Ev3Error {
    /// The port reference is not bound to a device or does not exist.
    ///
    /// **Error Type**: Permanent for this port handle.
    #[error("Invalid port '{address}': {reason}")]
    InvalidPort {
        /// Port address (e.g. `ev3-ports:in2`) or device path
        address: String,
        /// Why the port could not be used
        reason: String,
    },

    /// The device bound to the port is not the one the wrapper drives.
    ///
    /// **Error Type**: Permanent. The wrapper is never constructed.
    #[error("Invalid sensor: expected driver '{expected}', found '{actual}'")]
    InvalidSensor {
        /// Driver name the wrapper requires
        expected: String,
        /// Driver name reported by the port
        actual: String,
    },

    /// A measurement was requested in the wrong mode with auto-switch off.
    ///
    /// **Error Type**: Recoverable by the caller.
    ///
    /// **Recovery Strategy**: set the mode to `required` or enable
    /// auto-switch, then read again.
    #[error("[Auto-switch is off] Mode '{required}' is required, device is in '{actual}'")]
    InvalidMode {
        /// Mode token the measurement needs
        required: String,
        /// Mode token the device currently reports
        actual: String,
    },

    /// The device reports a mode token the wrapper does not know.
    ///
    /// **Error Type**: Not recoverable by toggling auto-switch; another
    /// program selected a mode outside the wrapper's set.
    #[error("Unknown mode '{actual}', expected one of {expected}")]
    UnknownMode {
        /// Mode tokens the wrapper drives (e.g. `DB|DBA`)
        expected: String,
        /// Mode token the device currently reports
        actual: String,
    },

    /// Attribute I/O failed.
    ///
    /// Carries the `std::io::Error` reported by the port unchanged so callers
    /// can inspect it.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An attribute did not contain a valid floating point number.
    ///
    /// **Error Type**: Not transient. The device returned malformed data.
    #[error("Attribute '{attribute}' holds non-numeric value '{value}': {source}")]
    Parse {
        /// Attribute name that was read
        attribute: String,
        /// Raw attribute content
        value: String,
        /// Underlying float parse failure
        #[source]
        source: ParseFloatError,
    },

    /// Configuration values parsed but failed validation.
    #[error("Configuration validation error: {0}")]
    Configuration(String),
}

impl Ev3Error {
    /// Build an [`Ev3Error::InvalidPort`].
    pub fn invalid_port(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPort {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`Ev3Error::InvalidMode`].
    pub fn invalid_mode(required: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidMode {
            required: required.into(),
            actual: actual.into(),
        }
    }

    /// Whether the caller can recover without rebinding the sensor.
    ///
    /// Only a mode mismatch under disabled auto-switch qualifies. An unknown
    /// device mode, wiring, device data and configuration errors do not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidMode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_mode_message_names_both_modes() {
        let err = Ev3Error::invalid_mode("DB", "DBA");
        let msg = err.to_string();
        assert!(msg.contains("'DB'"));
        assert!(msg.contains("'DBA'"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "value0 missing");
        let err: Ev3Error = io.into();
        assert_eq!(err.to_string(), "value0 missing");
        match err {
            Ev3Error::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn binding_errors_are_permanent() {
        let port = Ev3Error::invalid_port("ev3-ports:in1", "no device");
        let sensor = Ev3Error::InvalidSensor {
            expected: "lego-nxt-sound".into(),
            actual: "lego-ev3-touch".into(),
        };
        assert!(!port.is_recoverable());
        assert!(!sensor.is_recoverable());
        assert!(sensor.to_string().contains("lego-ev3-touch"));
    }

    #[test]
    fn unknown_mode_is_not_recoverable() {
        let err = Ev3Error::UnknownMode {
            expected: "DB|DBA".into(),
            actual: "RAW".into(),
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("'RAW'"));
    }
}
