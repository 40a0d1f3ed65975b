//! Analog pulse sensor (SAADC channel 1)
//!
//! Smoothed millivolts feed the hysteresis detector; debounced peaks go into
//! a 15-beat history and the rate is `60000 / mean period` over the beats
//! from the last 15 s.

use crate::compensation::adc;
use crate::constants::buffers::PULSE_HISTORY;
use crate::constants::channels::{
    HEART_RATE_MAX_BPM, HEART_RATE_MIN_BPM, PULSE_DEBOUNCE_MS, PULSE_THRESHOLD_MV, PULSE_WINDOW_MS,
};
use crate::constants::filters::PULSE_SMOOTHING_WINDOW;
use crate::constants::MS_PER_MINUTE;
use crate::detect::HysteresisDetector;
use crate::errors::ComputeResult;
use crate::filters::{Derivative, MovingAverage};
use crate::plausibility::{ChannelOutput, PlausibilityGate};
use crate::rate::TimeWindowRateCounter;
use crate::sample::Sample;

use super::{ChannelEstimator, ChannelId};

#[derive(Debug, Clone)]
pub struct PulseChannel {
    smoothing: MovingAverage<PULSE_SMOOTHING_WINDOW>,
    edge: Derivative,
    detector: HysteresisDetector,
    beats: TimeWindowRateCounter<PULSE_HISTORY>,
    gate: PlausibilityGate,
    last_mv: i32,
    edge_enhanced: i32,
}

impl PulseChannel {
    pub const fn new() -> Self {
        Self {
            smoothing: MovingAverage::new(),
            edge: Derivative::new(),
            detector: HysteresisDetector::new(PULSE_THRESHOLD_MV),
            beats: TimeWindowRateCounter::new(PULSE_WINDOW_MS, PULSE_DEBOUNCE_MS),
            gate: PlausibilityGate::new(ChannelId::PulseSensor.name(), HEART_RATE_MIN_BPM, HEART_RATE_MAX_BPM),
            last_mv: 0,
            edge_enhanced: 0,
        }
    }

    /// Most recent input in millivolts
    pub fn millivolts(&self) -> i32 {
        self.last_mv
    }

    /// First difference of the smoothed signal, for diagnostics
    pub fn edge_enhanced(&self) -> i32 {
        self.edge_enhanced
    }
}

impl Default for PulseChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelEstimator for PulseChannel {
    /// Raw SAADC counts
    type Input = i16;

    fn id(&self) -> ChannelId {
        ChannelId::PulseSensor
    }

    fn update(&mut self, sample: Sample<i16>) -> ComputeResult<()> {
        self.last_mv = adc::to_millivolts(sample.value);
        let smoothed = self.smoothing.update(self.last_mv);
        self.edge_enhanced = self.edge.update(smoothed);

        if self.detector.update(smoothed, sample.timestamp_ms) && self.beats.record_event(sample.timestamp_ms) {
            if let Ok(interval) = self.beats.recent_mean_interval_ms(PULSE_HISTORY, sample.timestamp_ms) {
                let _ = self.gate.offer(MS_PER_MINUTE as f32 / interval);
            }
        }
        Ok(())
    }

    fn output(&self) -> ChannelOutput {
        self.gate.output()
    }
}
