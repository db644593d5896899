//! Failure injection for mock ports.
//!
//! Lets tests make individual port operations fail with an I/O error, either
//! every time or after a number of successful calls.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

/// Port operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortOperation {
    /// `driver_name()`
    DriverName,
    /// `mode()`
    Mode,
    /// `set_mode()`
    SetMode,
    /// `attribute()`
    Attribute,
}

impl PortOperation {
    /// Name of the operation as used in injected error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PortOperation::DriverName => "driver_name",
            PortOperation::Mode => "mode",
            PortOperation::SetMode => "set_mode",
            PortOperation::Attribute => "attribute",
        }
    }
}

/// A configured failure.
#[derive(Debug, Clone)]
pub enum FailureScenario {
    /// Fail every call of the operation
    Always {
        /// Operation that fails
        operation: PortOperation,
        /// Kind of the injected I/O error
        kind: io::ErrorKind,
    },
    /// Fail after N successful calls of the operation
    FailAfterN {
        /// Operation that fails
        operation: PortOperation,
        /// Successful calls before the first failure
        count: u32,
    },
}

/// Failure injection configuration shared by clones of a mock port.
#[derive(Clone, Debug, Default)]
pub struct FailureConfig {
    scenarios: Arc<Mutex<Vec<FailureScenario>>>,
    counts: Arc<Mutex<HashMap<PortOperation, u32>>>,
}

impl FailureConfig {
    /// No injected failures.
    pub fn none() -> Self {
        Self::default()
    }

    /// Add a scenario.
    pub fn push(&self, scenario: FailureScenario) {
        self.scenarios.lock().push(scenario);
    }

    /// Check whether `operation` should fail now.
    ///
    /// Counts the call for `FailAfterN` scenarios.
    pub fn check(&self, operation: PortOperation) -> io::Result<()> {
        let count = {
            let mut counts = self.counts.lock();
            let current = counts.entry(operation).or_insert(0);
            *current += 1;
            *current
        };

        for scenario in self.scenarios.lock().iter() {
            match scenario {
                FailureScenario::Always { operation: op, kind } if *op == operation => {
                    return Err(io::Error::new(
                        *kind,
                        format!("injected failure on '{}'", operation.as_str()),
                    ));
                }
                FailureScenario::FailAfterN {
                    operation: op,
                    count: limit,
                } if *op == operation && count > *limit => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!(
                            "injected failure on '{}' after {} calls",
                            operation.as_str(),
                            limit
                        ),
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Clear scenarios and counters.
    pub fn reset(&self) {
        self.scenarios.lock().clear();
        self.counts.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_failures() {
        let config = FailureConfig::none();
        for _ in 0..100 {
            assert!(config.check(PortOperation::Attribute).is_ok());
        }
    }

    #[test]
    fn test_always_fails_only_target_operation() {
        let config = FailureConfig::none();
        config.push(FailureScenario::Always {
            operation: PortOperation::SetMode,
            kind: io::ErrorKind::PermissionDenied,
        });

        let err = config.check(PortOperation::SetMode).err();
        assert_eq!(err.map(|e| e.kind()), Some(io::ErrorKind::PermissionDenied));
        assert!(config.check(PortOperation::Mode).is_ok());
    }

    #[test]
    fn test_fail_after_n() {
        let config = FailureConfig::none();
        config.push(FailureScenario::FailAfterN {
            operation: PortOperation::Attribute,
            count: 3,
        });

        for i in 0..3 {
            assert!(
                config.check(PortOperation::Attribute).is_ok(),
                "call {} should succeed",
                i
            );
        }
        assert!(config.check(PortOperation::Attribute).is_err());

        config.reset();
        assert!(config.check(PortOperation::Attribute).is_ok());
    }
}
