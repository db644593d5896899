//! Mock ev3dev ports
//!
//! This crate provides simulated sensor ports for testing without an EV3
//! brick. Calls are synchronous and recorded, so tests can assert exactly
//! which attributes a sensor wrapper touched.
//!
//! # Available Mocks
//!
//! - [`MockPort`] - one `lego-sensor` device with in-memory attributes
//! - [`FailureConfig`] - failure injection shared by clones of a port

pub mod common;
mod mock_port;

// Re-export common types
pub use common::{FailureConfig, FailureScenario, PortOperation};

pub use mock_port::{MockPort, MockPortBuilder, PortCall, DEFAULT_MOCK_ADDRESS};
