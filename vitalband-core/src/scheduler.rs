//! Fixed-Period Cooperative Scheduler
//!
//! The band runs one run-to-completion handler per timer tick. The
//! scheduler only answers "is the next tick due?", in the pull-based
//! `nb` style:
//!
//! ```rust
//! use vitalband_core::scheduler::Scheduler;
//!
//! let mut scheduler = Scheduler::new(10);
//! assert_eq!(scheduler.poll(0), Ok(0));
//! assert_eq!(scheduler.poll(5), Err(nb::Error::WouldBlock));
//! assert_eq!(scheduler.poll(10), Ok(1));
//! ```
//!
//! Missed ticks are not replayed. If the loop falls more than a full period
//! behind, the next deadline is re-anchored to the current time instead of
//! firing a burst of catch-up ticks.

use core::convert::Infallible;

use crate::constants::time::{REPORT_DIVIDER, SLOW_CHANNEL_DIVIDER};
use crate::time::{elapsed_ms, Timestamp};

/// Fixed-period tick source
#[derive(Debug, Clone)]
pub struct Scheduler {
    period_ms: u32,
    next_deadline: Option<Timestamp>,
    tick: u32,
}

impl Scheduler {
    /// Scheduler firing every `period_ms` (at least 1 ms)
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms: if period_ms == 0 { 1 } else { period_ms },
            next_deadline: None,
            tick: 0,
        }
    }

    /// Returns the index of the tick that is due at `now`, or `WouldBlock`.
    /// The first poll is always due.
    pub fn poll(&mut self, now: Timestamp) -> nb::Result<u32, Infallible> {
        let deadline = match self.next_deadline {
            None => now,
            Some(deadline) => deadline,
        };

        // Wrapping difference reinterpreted as signed: negative means the
        // deadline is still ahead.
        if (now.wrapping_sub(deadline) as i32) < 0 {
            return Err(nb::Error::WouldBlock);
        }

        let lateness = elapsed_ms(now, deadline);
        let next = if lateness >= self.period_ms {
            now.wrapping_add(self.period_ms)
        } else {
            deadline.wrapping_add(self.period_ms)
        };
        self.next_deadline = Some(next);

        let tick = self.tick;
        self.tick = self.tick.wrapping_add(1);
        Ok(tick)
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Deadline of the next tick, once the first tick has fired
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.next_deadline
    }
}

/// What runs on a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Motion, analog, temperature and barometer channels are read
    pub slow_channels: bool,
    /// The report cycle ends and a message is assembled
    pub report: bool,
}

impl Cadence {
    /// Cadence of tick `tick`. PPG runs on every tick; slow channels run on
    /// the first tick of every group of ten; the report closes every
    /// hundredth tick.
    pub const fn for_tick(tick: u32) -> Self {
        Self {
            slow_channels: tick % SLOW_CHANNEL_DIVIDER == 0,
            report: tick % REPORT_DIVIDER == REPORT_DIVIDER - 1,
        }
    }
}
