//! Time Source Abstraction
//!
//! Channels never read a clock themselves: every sample carries its own
//! timestamp, and the control loop asks a `TimeSource` for "now" before
//! each call to `VitalsMonitor::poll`.
//! This keeps the signal chain deterministic under test.
//!
//! ## Implementations
//!
//! - `MonotonicTime`: uptime counter advanced by the control loop
//! - `FixedTime`: held at a value until set, for harnesses that drive `tick`

use crate::time::Timestamp;

/// Source of uptime for the control loop
///
/// ## Implementation Requirements
///
/// - `now()` is milliseconds since boot and may wrap at `u32::MAX`
/// - Consecutive calls never go backwards except through wrap-around
pub trait TimeSource {
    /// Current uptime in milliseconds
    fn now(&self) -> Timestamp;
}
