//! Common infrastructure for mock ports.
//!
//! - **errors**: failure injection framework

pub mod errors;

pub use errors::{FailureConfig, FailureScenario, PortOperation};
