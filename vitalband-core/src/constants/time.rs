//! Time-Related Constants
//!
//! Unit conversions and the cadence of the cooperative control loop.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Milliseconds per minute. Every rate in the crate is normalised to this.
pub const MS_PER_MINUTE: u32 = MS_PER_SECOND * SECONDS_PER_MINUTE;

// ===== SCHEDULER CADENCE =====

/// Period of the control-loop tick (milliseconds).
///
/// The PPG front end runs at 100 Hz, so the tick matches one PPG sample.
pub const TICK_INTERVAL_MS: u32 = 10;

/// Ticks between reads of the motion, analog and environmental sensors.
///
/// 10 ticks = 100 ms, i.e. 10 Hz for the slower channels.
pub const SLOW_CHANNEL_DIVIDER: u32 = 10;

/// Ticks per reporting cycle (one aggregated message).
///
/// 100 ticks = 1 s.
pub const REPORT_DIVIDER: u32 = 100;

const _: () = assert!(REPORT_DIVIDER % SLOW_CHANNEL_DIVIDER == 0, "report cycle must align with slow channels");
