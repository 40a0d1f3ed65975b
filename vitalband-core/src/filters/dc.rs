//! Exponential DC tracker
//!
//! Keeps a running estimate of the baseline in Q15 and returns the sample
//! minus that baseline. With a decay shift of 4 the tracker moves 1/16 of
//! the way towards each new sample, which puts its cutoff well below the
//! slowest heart rate at 100 Hz.

use crate::constants::{DC_DECAY_SHIFT, DC_FRACTION_BITS};

/// Running baseline estimate, scaled by `2^DC_FRACTION_BITS`
///
/// Input is limited to 16 bits, so `sample << 15` and the difference to the
/// estimate both fit in an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DcTracker {
    running_estimate: i32,
}

impl DcTracker {
    pub const fn new() -> Self {
        Self { running_estimate: 0 }
    }

    /// Tracker whose baseline already equals `sample`
    pub const fn primed(sample: u16) -> Self {
        Self { running_estimate: (sample as i32) << DC_FRACTION_BITS }
    }

    /// Current baseline in input units
    pub const fn baseline(&self) -> i32 {
        self.running_estimate >> DC_FRACTION_BITS
    }

    /// Raw Q15 accumulator
    pub const fn running_estimate(&self) -> i32 {
        self.running_estimate
    }

    /// Update the baseline with `sample` and return `sample - baseline`
    pub fn remove(&mut self, sample: u16) -> i32 {
        let scaled = (sample as i32) << DC_FRACTION_BITS;
        self.running_estimate += (scaled - self.running_estimate) >> DC_DECAY_SHIFT;
        sample as i32 - self.baseline()
    }
}

/// Pure form of [`DcTracker::remove`]
pub fn dc_remove(mut state: DcTracker, sample: u16) -> (i32, DcTracker) {
    let residual = state.remove(sample);
    (residual, state)
}
