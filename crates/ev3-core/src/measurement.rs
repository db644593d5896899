//! Measurement descriptors
//!
//! A [`Measurement`] ties a required mode to the `valueN` attribute that
//! carries the reading in that mode. Several measurements may share an
//! attribute index; the mode decides which physical quantity it holds.

use crate::error::{Ev3Error, Ev3Result};
use crate::mode::ModeGuard;
use crate::port::SensorPort;
use tracing::debug;

/// Prefix of the numeric value attributes (`value0`, `value1`, ...).
pub const VALUE_ATTRIBUTE_PREFIX: &str = "value";

/// One readable quantity of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Human-readable name used in logs
    pub name: &'static str,
    /// Mode the device must be in for the value to be meaningful
    pub required_mode: &'static str,
    /// Index of the `valueN` attribute carrying the reading
    pub value_index: u8,
}

impl Measurement {
    /// Describe a measurement.
    pub const fn new(name: &'static str, required_mode: &'static str, value_index: u8) -> Self {
        Self {
            name,
            required_mode,
            value_index,
        }
    }

    /// Attribute name for this measurement, e.g. `value0`.
    pub fn attribute_name(&self) -> String {
        format!("{}{}", VALUE_ATTRIBUTE_PREFIX, self.value_index)
    }

    /// Mode guard for this measurement.
    pub const fn guard(&self) -> ModeGuard {
        ModeGuard::new(self.required_mode)
    }

    /// Ensure the required mode, read the attribute and parse it.
    ///
    /// No attribute is read when the guard fails. The parsed value is
    /// returned as is, without range checks.
    pub fn read<P: SensorPort + ?Sized>(&self, port: &P, auto_switch: bool) -> Ev3Result<f32> {
        self.guard().apply(port, auto_switch)?;

        let attribute = self.attribute_name();
        let raw = port.attribute(&attribute)?;
        let value = parse_value(&attribute, &raw)?;
        debug!(
            port = port.address(),
            measurement = self.name,
            attribute = %attribute,
            value,
            "read measurement"
        );
        Ok(value)
    }
}

/// Parse raw attribute text as a float.
///
/// Surrounding whitespace (sysfs values end with a newline) is ignored.
/// Anything else that is not a number is an [`Ev3Error::Parse`].
pub fn parse_value(attribute: &str, raw: &str) -> Ev3Result<f32> {
    raw.trim().parse::<f32>().map_err(|source| Ev3Error::Parse {
        attribute: attribute.to_string(),
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_name() {
        assert_eq!(Measurement::new("a", "DB", 0).attribute_name(), "value0");
        assert_eq!(Measurement::new("b", "X", 3).attribute_name(), "value3");
    }

    #[test]
    fn test_parse_value() {
        let test_cases = vec![
            ("42.5", 42.5),
            ("42.5\n", 42.5),
            (" 7 ", 7.0),
            ("0", 0.0),
            ("-3.25", -3.25),
            ("150", 150.0),
        ];

        for (input, expected) in test_cases {
            let parsed = parse_value("value0", input);
            assert!(parsed.is_ok(), "Failed to parse: {:?}", input);
            assert_eq!(parsed.ok(), Some(expected));
        }
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        for input in ["abc", "", "\n", "4 2"] {
            match parse_value("value0", input) {
                Err(Ev3Error::Parse { attribute, value, .. }) => {
                    assert_eq!(attribute, "value0");
                    assert_eq!(value, input);
                }
                other => panic!("expected Parse for {input:?}, got {other:?}"),
            }
        }
    }
}
