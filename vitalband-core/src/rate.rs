//! Time-Window Rate Counter
//!
//! ## Overview
//!
//! Converts discrete events (beats, breaths, steps) into a per-minute rate.
//! Event timestamps go into a fixed-capacity ring; once the ring is full the
//! oldest event is overwritten regardless of whether it is still inside the
//! window, so capacity bounds memory as well as the highest countable rate.
//!
//! Two ways of turning history into a rate are offered:
//!
//! | Method | Formula | Used by |
//! |--------|---------|---------|
//! | [`rate_per_minute`](TimeWindowRateCounter::rate_per_minute) | `count_in_window * 60000 / window_ms` | respiratory, steps, rotation |
//! | [`mean_period_rate`](TimeWindowRateCounter::mean_period_rate) | `60000 / mean interval` over the last `k` events | heart rate |
//! | [`recent_mean_interval_ms`](TimeWindowRateCounter::recent_mean_interval_ms) | mean interval over the last `k` events still in the window | pulse |
//!
//! ## Debounce
//!
//! `record_event` rejects an event that arrives less than `min_interval_ms`
//! after the previously stored one. The comparison is `>=`, so an event
//! exactly `min_interval_ms` later is accepted.
//!
//! ## Timestamps
//!
//! All intervals use wrapping subtraction, so the counter keeps working
//! across the `u32` millisecond rollover. A timestamp of zero is a real
//! event: emptiness is tracked by the ring, not by a sentinel value.
//!
//! ## Example
//!
//! ```rust
//! use vitalband_core::rate::TimeWindowRateCounter;
//!
//! let mut counter: TimeWindowRateCounter<8> = TimeWindowRateCounter::new(4000, 0);
//! for t in [0, 1000, 2000, 3000] {
//!     counter.record_event(t);
//! }
//! assert_eq!(counter.rate_per_minute(3000), 60.0);
//! ```

use crate::buffer::CircularBuffer;
use crate::constants::MS_PER_MINUTE;
use crate::errors::{ComputeError, ComputeResult};
use crate::time::{elapsed_ms, Timestamp};

/// Bounded history of event timestamps with a trailing window
#[derive(Debug, Clone)]
pub struct TimeWindowRateCounter<const N: usize> {
    timestamps: CircularBuffer<Timestamp, N>,
    window_ms: u32,
    min_interval_ms: u32,
}

impl<const N: usize> TimeWindowRateCounter<N> {
    /// Counter over a trailing `window_ms` with a debounce of
    /// `min_interval_ms`. A zero window is treated as one millisecond.
    pub const fn new(window_ms: u32, min_interval_ms: u32) -> Self {
        Self {
            timestamps: CircularBuffer::new(),
            window_ms: if window_ms == 0 { 1 } else { window_ms },
            min_interval_ms,
        }
    }

    /// Store an event at `now_ms` unless it falls inside the debounce
    /// interval of the previous stored event. Returns whether it was stored.
    pub fn record_event(&mut self, now_ms: Timestamp) -> bool {
        if let Some(&last) = self.timestamps.last() {
            if elapsed_ms(now_ms, last) < self.min_interval_ms {
                return false;
            }
        }
        self.timestamps.push(now_ms);
        true
    }

    /// Stored events no older than `window_ms` at `now_ms`
    pub fn count_in_window(&self, now_ms: Timestamp) -> usize {
        self.timestamps
            .iter()
            .filter(|&&t| elapsed_ms(now_ms, t) <= self.window_ms)
            .count()
    }

    /// Windowed event count normalised to events per minute
    pub fn rate_per_minute(&self, now_ms: Timestamp) -> f32 {
        self.count_in_window(now_ms) as f32 * MS_PER_MINUTE as f32 / self.window_ms as f32
    }

    /// Mean interval between the newest `k` stored events
    pub fn mean_interval_ms(&self, k: usize) -> ComputeResult<f32> {
        self.mean_of_newest(k.min(self.timestamps.len()))
    }

    /// Like [`mean_interval_ms`](Self::mean_interval_ms), but only events
    /// inside the trailing window at `now_ms` take part
    pub fn recent_mean_interval_ms(&self, k: usize, now_ms: Timestamp) -> ComputeResult<f32> {
        self.mean_of_newest(k.min(self.count_in_window(now_ms)))
    }

    fn mean_of_newest(&self, used: usize) -> ComputeResult<f32> {
        if used < 2 {
            return Err(ComputeError::InsufficientData { required: 2, available: used });
        }

        let newest = self.timestamps.len() - 1;
        let (Some(&last), Some(&first)) = (self.timestamps.get(newest), self.timestamps.get(newest + 1 - used))
        else {
            return Err(ComputeError::InsufficientData { required: 2, available: 0 });
        };

        let span = elapsed_ms(last, first);
        if span == 0 {
            return Err(ComputeError::DivideByZero { context: "mean event interval" });
        }
        Ok(span as f32 / (used - 1) as f32)
    }

    /// `60000 / mean interval` over the newest `k` events, or 0 when fewer
    /// than two events are stored
    pub fn mean_period_rate(&self, k: usize) -> f32 {
        self.mean_interval_ms(k)
            .map(|interval| MS_PER_MINUTE as f32 / interval)
            .unwrap_or(0.0)
    }

    /// Timestamp of the most recently stored event
    pub fn last_event(&self) -> Option<Timestamp> {
        self.timestamps.last().copied()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    pub fn min_interval_ms(&self) -> u32 {
        self.min_interval_ms
    }

    pub fn clear(&mut self) {
        self.timestamps.clear();
    }
}
