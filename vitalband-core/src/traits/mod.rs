//! Collaborator Seams
//!
//! The core is pure computation. Everything that touches hardware or a
//! vendor library reaches it through one of these traits:
//!
//! - [`sensor`] - timestamped samples from a bus or ADC
//! - [`sink`] - the outbound transport for aggregated messages
//! - [`spo2`] - the external SpO2 reference algorithm
//! - [`time`] - uptime for the control loop
//!
//! All of them are implemented by the firmware on the device and by small
//! scripted fakes in tests.

pub mod sensor;
pub mod sink;
pub mod spo2;
pub mod time;

pub use sensor::SampleSource;
pub use sink::{MessageSink, NullSink};
pub use spo2::{Spo2Algorithm, Spo2Estimate};
pub use time::TimeSource;
