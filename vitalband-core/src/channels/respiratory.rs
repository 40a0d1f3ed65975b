//! Respiratory band (SAADC channel 0)
//!
//! Breathing moves the band slowly and with small amplitude, so this chain
//! smooths harder and arms on a smaller rise than the pulse channel. The
//! 1.5 s debounce caps the countable rate at 40 breaths per minute.

use crate::compensation::adc;
use crate::constants::buffers::RESPIRATORY_HISTORY;
use crate::constants::channels::{
    RESPIRATORY_DEBOUNCE_MS, RESPIRATORY_MAX_RATE, RESPIRATORY_MIN_RATE, RESPIRATORY_THRESHOLD_MV,
    RESPIRATORY_WINDOW_MS,
};
use crate::constants::filters::RESPIRATORY_SMOOTHING_WINDOW;
use crate::detect::HysteresisDetector;
use crate::errors::ComputeResult;
use crate::filters::MovingAverage;
use crate::plausibility::{ChannelOutput, PlausibilityGate};
use crate::rate::TimeWindowRateCounter;
use crate::sample::Sample;

use super::{ChannelEstimator, ChannelId};

#[derive(Debug, Clone)]
pub struct RespiratoryChannel {
    smoothing: MovingAverage<RESPIRATORY_SMOOTHING_WINDOW>,
    detector: HysteresisDetector,
    breaths: TimeWindowRateCounter<RESPIRATORY_HISTORY>,
    gate: PlausibilityGate,
    last_mv: i32,
}

impl RespiratoryChannel {
    pub const fn new() -> Self {
        Self {
            smoothing: MovingAverage::new(),
            detector: HysteresisDetector::new(RESPIRATORY_THRESHOLD_MV),
            breaths: TimeWindowRateCounter::new(RESPIRATORY_WINDOW_MS, RESPIRATORY_DEBOUNCE_MS),
            gate: PlausibilityGate::new(
                ChannelId::RespiratoryRate.name(),
                RESPIRATORY_MIN_RATE,
                RESPIRATORY_MAX_RATE,
            ),
            last_mv: 0,
        }
    }

    pub fn millivolts(&self) -> i32 {
        self.last_mv
    }

    /// Breaths inside the trailing window at `now_ms`
    pub fn breaths_in_window(&self, now_ms: u32) -> usize {
        self.breaths.count_in_window(now_ms)
    }
}

impl Default for RespiratoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelEstimator for RespiratoryChannel {
    /// Raw SAADC counts
    type Input = i16;

    fn id(&self) -> ChannelId {
        ChannelId::RespiratoryRate
    }

    fn update(&mut self, sample: Sample<i16>) -> ComputeResult<()> {
        let now = sample.timestamp_ms;
        self.last_mv = adc::to_millivolts(sample.value);
        let smoothed = self.smoothing.update(self.last_mv);

        if self.detector.update(smoothed, now) && self.breaths.record_event(now) {
            let _ = self.gate.offer(self.breaths.rate_per_minute(now));
        }
        Ok(())
    }

    fn output(&self) -> ChannelOutput {
        self.gate.output()
    }
}
