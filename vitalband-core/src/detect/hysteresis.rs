//! Threshold-hysteresis peak detector
//!
//! A rise of more than `threshold` between consecutive samples arms the
//! detector. The next sample that is lower than its predecessor is reported
//! as the peak and disarms it.

use crate::time::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HysteresisDetector {
    previous_value: i32,
    rising: bool,
    last_event_time_ms: Option<Timestamp>,
    threshold: i32,
}

impl HysteresisDetector {
    pub const fn new(threshold: i32) -> Self {
        Self { previous_value: 0, rising: false, last_event_time_ms: None, threshold }
    }

    /// Feed `current` observed at `now`; returns `true` on a peak
    pub fn update(&mut self, current: i32, now: Timestamp) -> bool {
        let mut peak = false;

        if self.rising && current < self.previous_value {
            self.rising = false;
            self.last_event_time_ms = Some(now);
            peak = true;
        } else if !self.rising && current > self.previous_value.saturating_add(self.threshold) {
            self.rising = true;
        }

        self.previous_value = current;
        peak
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }

    /// Time of the most recent peak, debounced or not
    pub fn last_event_time_ms(&self) -> Option<Timestamp> {
        self.last_event_time_ms
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }
}

/// Pure form of [`HysteresisDetector::update`]
pub fn detect_hysteresis(mut state: HysteresisDetector, current: i32, now: Timestamp) -> (bool, HysteresisDetector) {
    let peak = state.update(current, now);
    (peak, state)
}
