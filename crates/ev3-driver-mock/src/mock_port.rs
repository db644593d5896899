//! Mock sensor port matching ev3dev `lego-sensor` behaviors.
//!
//! Simulates one device directory under `/sys/class/lego-sensor`:
//! - `driver_name`, `mode`, `modes` and `valueN` attributes held in memory
//! - `set_mode` rejects tokens missing from `modes` with `InvalidInput`,
//!   as the kernel answers with EINVAL
//! - unknown attributes fail with `NotFound`
//! - every call is recorded for later assertions
//!
//! Clones share state, so a test can hand one clone to a sensor wrapper and
//! inspect the call log through another.
//!
//! # Example
//!
//! ```rust,ignore
//! use ev3_driver_mock::{MockPort, PortCall};
//!
//! let port = MockPort::builder()
//!     .driver_name("lego-nxt-sound")
//!     .modes(["DB", "DBA"])
//!     .mode("DBA")
//!     .attribute("value0", "42.5")
//!     .build();
//!
//! port.set_mode("DB")?;
//! assert_eq!(port.set_mode_calls(), vec!["DB".to_string()]);
//! ```

use crate::common::{FailureConfig, FailureScenario, PortOperation};
use ev3_core::{Ev3Error, Ev3Result, SensorPort};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

/// Default address reported by mock ports.
pub const DEFAULT_MOCK_ADDRESS: &str = "mock-ports:in1";

/// A recorded port call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortCall {
    /// `driver_name()`
    DriverName,
    /// `mode()`
    Mode,
    /// `set_mode(token)`
    SetMode(String),
    /// `attribute(name)`
    Attribute(String),
}

#[derive(Debug)]
struct PortState {
    /// `None` when nothing is bound to the port
    driver_name: Option<String>,
    mode: String,
    modes: Vec<String>,
    attributes: HashMap<String, String>,
    calls: Vec<PortCall>,
}

/// In-memory [`SensorPort`].
#[derive(Debug, Clone)]
pub struct MockPort {
    address: Arc<str>,
    state: Arc<Mutex<PortState>>,
    failures: FailureConfig,
}

impl MockPort {
    /// Start building a mock port.
    pub fn builder() -> MockPortBuilder {
        MockPortBuilder::default()
    }

    /// Port that looks like an NXT sound sensor in the given mode.
    pub fn nxt_sound(mode: &str) -> Self {
        Self::builder()
            .driver_name("lego-nxt-sound")
            .modes(["DB", "DBA"])
            .mode(mode)
            .attribute("value0", "0")
            .build()
    }

    /// Port with no device bound. Every call fails with `InvalidPort`.
    pub fn unbound(address: &str) -> Self {
        Self {
            address: Arc::from(address),
            state: Arc::new(Mutex::new(PortState {
                driver_name: None,
                mode: String::new(),
                modes: Vec::new(),
                attributes: HashMap::new(),
                calls: Vec::new(),
            })),
            failures: FailureConfig::none(),
        }
    }

    /// Replace the content of an attribute.
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .lock()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Change the mode behind the wrapper's back, without recording a call.
    pub fn force_mode(&self, mode: &str) {
        self.state.lock().mode = mode.to_string();
    }

    /// Current mode, without recording a call.
    pub fn current_mode(&self) -> String {
        self.state.lock().mode.clone()
    }

    /// Make every call of `operation` fail with an I/O error of `kind`.
    pub fn fail_on(&self, operation: PortOperation, kind: io::ErrorKind) {
        self.failures
            .push(FailureScenario::Always { operation, kind });
    }

    /// Failure injection handle.
    pub fn failures(&self) -> &FailureConfig {
        &self.failures
    }

    /// All recorded calls in order.
    pub fn calls(&self) -> Vec<PortCall> {
        self.state.lock().calls.clone()
    }

    /// Tokens passed to `set_mode`, in order.
    pub fn set_mode_calls(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                PortCall::SetMode(mode) => Some(mode.clone()),
                _ => None,
            })
            .collect()
    }

    /// Attribute names passed to `attribute`, in order.
    pub fn attribute_reads(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                PortCall::Attribute(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Record the call, apply injected failures and the unbound check.
    fn enter(&self, call: PortCall, operation: PortOperation) -> Ev3Result<()> {
        let bound = {
            let mut state = self.state.lock();
            state.calls.push(call);
            state.driver_name.is_some()
        };
        self.failures.check(operation)?;
        if !bound {
            return Err(Ev3Error::invalid_port(
                &*self.address,
                "no device bound to port",
            ));
        }
        Ok(())
    }
}

impl SensorPort for MockPort {
    fn address(&self) -> &str {
        &self.address
    }

    fn driver_name(&self) -> Ev3Result<String> {
        self.enter(PortCall::DriverName, PortOperation::DriverName)?;
        Ok(self.state.lock().driver_name.clone().unwrap_or_default())
    }

    fn mode(&self) -> Ev3Result<String> {
        self.enter(PortCall::Mode, PortOperation::Mode)?;
        Ok(self.state.lock().mode.clone())
    }

    fn set_mode(&self, mode: &str) -> Ev3Result<()> {
        self.enter(PortCall::SetMode(mode.to_string()), PortOperation::SetMode)?;
        let mut state = self.state.lock();
        if !state.modes.iter().any(|m| m == mode) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("mode '{}' not supported by {}", mode, self.address),
            )
            .into());
        }
        tracing::debug!(port = %self.address, mode, "mock mode set");
        state.mode = mode.to_string();
        Ok(())
    }

    fn attribute(&self, name: &str) -> Ev3Result<String> {
        self.enter(PortCall::Attribute(name.to_string()), PortOperation::Attribute)?;
        self.state.lock().attributes.get(name).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("attribute '{}' not found on {}", name, self.address),
            )
            .into()
        })
    }
}

/// Builder for [`MockPort`].
#[derive(Debug, Clone)]
pub struct MockPortBuilder {
    address: String,
    driver_name: String,
    mode: Option<String>,
    modes: Vec<String>,
    attributes: HashMap<String, String>,
}

impl Default for MockPortBuilder {
    fn default() -> Self {
        Self {
            address: DEFAULT_MOCK_ADDRESS.to_string(),
            driver_name: String::new(),
            mode: None,
            modes: Vec::new(),
            attributes: HashMap::new(),
        }
    }
}

impl MockPortBuilder {
    /// Port address
    pub fn address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    /// Bound driver name
    pub fn driver_name(mut self, driver_name: &str) -> Self {
        self.driver_name = driver_name.to_string();
        self
    }

    /// Initial mode (default: first supported mode)
    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    /// Supported mode tokens
    pub fn modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes = modes.into_iter().map(Into::into).collect();
        self
    }

    /// Attribute content
    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Build the port. The `modes` attribute mirrors the supported modes.
    pub fn build(self) -> MockPort {
        let mode = self
            .mode
            .or_else(|| self.modes.first().cloned())
            .unwrap_or_default();
        let mut attributes = self.attributes;
        attributes
            .entry("modes".to_string())
            .or_insert_with(|| self.modes.join(" "));

        MockPort {
            address: Arc::from(self.address.as_str()),
            state: Arc::new(Mutex::new(PortState {
                driver_name: Some(self.driver_name),
                mode,
                modes: self.modes,
                attributes,
                calls: Vec::new(),
            })),
            failures: FailureConfig::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_mode_to_first() -> anyhow::Result<()> {
        let port = MockPort::builder()
            .driver_name("lego-nxt-sound")
            .modes(["DB", "DBA"])
            .build();
        assert_eq!(port.mode()?, "DB");
        assert_eq!(port.attribute("modes")?, "DB DBA");
        assert_eq!(port.address(), DEFAULT_MOCK_ADDRESS);
        Ok(())
    }

    #[test]
    fn test_calls_are_recorded_in_order() -> anyhow::Result<()> {
        let port = MockPort::nxt_sound("DBA");
        port.driver_name()?;
        port.mode()?;
        port.set_mode("DB")?;
        port.attribute("value0")?;

        assert_eq!(
            port.calls(),
            vec![
                PortCall::DriverName,
                PortCall::Mode,
                PortCall::SetMode("DB".into()),
                PortCall::Attribute("value0".into()),
            ]
        );
        assert_eq!(port.set_mode_calls(), vec!["DB".to_string()]);
        assert_eq!(port.attribute_reads(), vec!["value0".to_string()]);
        Ok(())
    }

    #[test]
    fn test_unsupported_mode_is_invalid_input() {
        let port = MockPort::nxt_sound("DB");
        match port.set_mode("COL-REFLECT") {
            Err(Ev3Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidInput),
            other => panic!("expected Io, got {other:?}"),
        }
        assert_eq!(port.current_mode(), "DB");
    }

    #[test]
    fn test_missing_attribute_is_not_found() {
        let port = MockPort::nxt_sound("DB");
        match port.attribute("value7") {
            Err(Ev3Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_unbound_port() {
        let port = MockPort::unbound("ev3-ports:in4");
        match port.driver_name() {
            Err(Ev3Error::InvalidPort { address, .. }) => assert_eq!(address, "ev3-ports:in4"),
            other => panic!("expected InvalidPort, got {other:?}"),
        }
        assert!(port.mode().is_err());
        assert_eq!(port.calls().len(), 2);
    }

    #[test]
    fn test_clones_share_state() -> anyhow::Result<()> {
        let port = MockPort::nxt_sound("DB");
        let other = port.clone();
        other.set_attribute("value0", "12");
        assert_eq!(port.attribute("value0")?, "12");
        assert_eq!(other.attribute_reads(), vec!["value0".to_string()]);
        Ok(())
    }

    #[test]
    fn test_injected_failure() {
        let port = MockPort::nxt_sound("DB");
        port.fail_on(PortOperation::Mode, io::ErrorKind::TimedOut);
        match port.mode() {
            Err(Ev3Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::TimedOut),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
