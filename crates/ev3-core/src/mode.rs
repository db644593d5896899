//! Mode guard
//!
//! ev3dev sensors multiplex several measurements over the same `valueN`
//! attributes; the selected mode decides what the numbers mean. Before a
//! measurement is read the device must therefore be in the measurement's
//! required mode. [`ensure_mode`] is the pure decision, [`ModeGuard`] applies
//! it to a port.
//!
//! The current mode is queried from the device on every call and never
//! cached, since another process may change it through sysfs at any time.

use crate::error::{Ev3Error, Ev3Result};
use crate::port::SensorPort;
use tracing::{debug, info, warn};

/// Outcome of the mode decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    /// Device already in the required mode
    Proceed,
    /// Device must be switched to the required mode first
    Switch,
}

/// Decide whether a read may proceed.
///
/// | current == required | auto_switch | result |
/// |---|---|---|
/// | yes | any | `Ok(Proceed)` |
/// | no | `true` | `Ok(Switch)` |
/// | no | `false` | `Err(InvalidMode)` |
pub fn ensure_mode(current: &str, required: &str, auto_switch: bool) -> Ev3Result<ModeAction> {
    if current == required {
        Ok(ModeAction::Proceed)
    } else if auto_switch {
        Ok(ModeAction::Switch)
    } else {
        Err(Ev3Error::invalid_mode(required, current))
    }
}

/// Required mode for one measurement, applied against a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeGuard {
    required: &'static str,
}

impl ModeGuard {
    /// Guard for the given mode token.
    pub const fn new(required: &'static str) -> Self {
        Self { required }
    }

    /// Mode token this guard requires.
    pub const fn required(&self) -> &'static str {
        self.required
    }

    /// Bring `port` into the required mode or fail.
    ///
    /// Issues at most one `set_mode` call, and only when the device is in a
    /// different mode and `auto_switch` is enabled. Errors from the port are
    /// returned unchanged.
    pub fn apply<P: SensorPort + ?Sized>(&self, port: &P, auto_switch: bool) -> Ev3Result<()> {
        let current = port.mode()?;
        let action = match ensure_mode(&current, self.required, auto_switch) {
            Ok(action) => action,
            Err(e) => {
                warn!(
                    port = port.address(),
                    required = self.required,
                    actual = %current,
                    "read rejected, sensor in another mode and auto-switch is off"
                );
                return Err(e);
            }
        };
        match action {
            ModeAction::Proceed => {
                debug!(port = port.address(), mode = self.required, "mode already selected");
            }
            ModeAction::Switch => {
                info!(
                    port = port.address(),
                    from = %current,
                    to = self.required,
                    "auto-switching sensor mode"
                );
                port.set_mode(self.required)?;
            }
        }
        Ok(())
    }
}
