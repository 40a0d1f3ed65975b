//! Time management for the control loop
//!
//! The band only has a monotonic uptime counter, so every timestamp in the
//! core is milliseconds since boot held in a `u32`. That counter wraps after
//! roughly 49.7 days; all interval arithmetic goes through [`elapsed_ms`],
//! which is wrap-safe as long as the two instants are less than one wrap
//! period apart.

use crate::traits::TimeSource;

/// Timestamp in milliseconds since device boot
pub type Timestamp = u32;

/// Milliseconds from `earlier` to `now`, tolerating counter wrap-around
#[inline]
pub const fn elapsed_ms(now: Timestamp, earlier: Timestamp) -> u32 {
    now.wrapping_sub(earlier)
}

/// Monotonic time source driven by the scheduler tick
///
/// On hardware the uptime counter comes from a timer peripheral; in the
/// cooperative loop it is enough to advance a counter once per tick.
#[derive(Debug, Clone, Default)]
pub struct MonotonicTime {
    now_ms: Timestamp,
}

impl MonotonicTime {
    pub const fn new() -> Self {
        Self { now_ms: 0 }
    }

    /// Advance the clock by `ms`, wrapping like the hardware counter
    pub fn advance(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.now_ms
    }
}

/// Time source that only moves when told to
///
/// Lets a test harness stamp samples with exactly the uptime it is about to
/// pass to the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    pub const fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}
