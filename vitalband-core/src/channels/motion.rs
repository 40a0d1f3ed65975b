//! Step cadence and rotation ("swing") rate from the MPU6050
//!
//! Both rates use the same chain on a different vector:
//!
//! ```text
//! |v| in milli-units ──▶ first difference ──▶ |delta| > threshold ──▶ debounced events ──▶ windowed rate
//! ```
//!
//! The rate is recomputed on every motion sample, not only on events, so a
//! wearer who stops moving sees the cadence fall to a real zero once the
//! last event leaves the window.

use crate::constants::buffers::{ROTATION_HISTORY, STEP_HISTORY};
use crate::constants::channels::{
    ROTATION_DEBOUNCE_MS, ROTATION_MAX_RATE, ROTATION_MIN_RATE, ROTATION_THRESHOLD_MDPS, ROTATION_WINDOW_MS,
    STEP_DEBOUNCE_MS, STEP_MAX_RATE, STEP_MIN_RATE, STEP_THRESHOLD_MG, STEP_WINDOW_MS,
};
use crate::errors::ComputeResult;
use crate::filters::Derivative;
use crate::plausibility::{ChannelOutput, PlausibilityGate};
use crate::rate::TimeWindowRateCounter;
use crate::sample::{Sample, Vector3};
use crate::time::Timestamp;

use super::{ChannelEstimator, ChannelId};

/// Milli-units per input unit (g to mg, °/s to m°/s)
const MILLI: f32 = 1000.0;

/// Detector and window parameters of one motion rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    pub id: ChannelId,
    /// Minimum |delta| of the magnitude, in milli-units
    pub threshold: i32,
    pub debounce_ms: u32,
    pub window_ms: u32,
    pub min_rate: f32,
    pub max_rate: f32,
}

impl MotionConfig {
    /// Accelerometer step cadence
    pub const STEPS: Self = Self {
        id: ChannelId::Accelerometer,
        threshold: STEP_THRESHOLD_MG,
        debounce_ms: STEP_DEBOUNCE_MS,
        window_ms: STEP_WINDOW_MS,
        min_rate: STEP_MIN_RATE,
        max_rate: STEP_MAX_RATE,
    };

    /// Gyroscope swing rate
    pub const ROTATION: Self = Self {
        id: ChannelId::Gyroscope,
        threshold: ROTATION_THRESHOLD_MDPS,
        debounce_ms: ROTATION_DEBOUNCE_MS,
        window_ms: ROTATION_WINDOW_MS,
        min_rate: ROTATION_MIN_RATE,
        max_rate: ROTATION_MAX_RATE,
    };
}

/// Event rate derived from the magnitude of a three-axis vector
#[derive(Debug, Clone)]
pub struct MotionRateChannel<const N: usize> {
    config: MotionConfig,
    derivative: Option<Derivative>,
    events: TimeWindowRateCounter<N>,
    gate: PlausibilityGate,
    last_magnitude: i32,
}

/// Step cadence channel
pub type StepChannel = MotionRateChannel<STEP_HISTORY>;

/// Rotation rate channel
pub type RotationChannel = MotionRateChannel<ROTATION_HISTORY>;

impl<const N: usize> MotionRateChannel<N> {
    pub const fn new(config: MotionConfig) -> Self {
        Self {
            config,
            derivative: None,
            events: TimeWindowRateCounter::new(config.window_ms, config.debounce_ms),
            gate: PlausibilityGate::new(config.id.name(), config.min_rate, config.max_rate),
            last_magnitude: 0,
        }
    }

    /// Magnitude of the last sample in milli-units
    pub fn last_magnitude(&self) -> i32 {
        self.last_magnitude
    }

    pub fn events_in_window(&self, now_ms: Timestamp) -> usize {
        self.events.count_in_window(now_ms)
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }
}

impl StepChannel {
    pub const fn steps() -> Self {
        Self::new(MotionConfig::STEPS)
    }
}

impl RotationChannel {
    pub const fn rotation() -> Self {
        Self::new(MotionConfig::ROTATION)
    }
}

impl<const N: usize> ChannelEstimator for MotionRateChannel<N> {
    /// Vector in g or °/s
    type Input = Vector3;

    fn id(&self) -> ChannelId {
        self.config.id
    }

    fn update(&mut self, sample: Sample<Vector3>) -> ComputeResult<()> {
        let now = sample.timestamp_ms;
        let magnitude = libm::roundf(sample.value.magnitude() * MILLI) as i32;
        self.last_magnitude = magnitude;

        // The first sample only seeds the difference filter.
        let delta = match self.derivative.as_mut() {
            Some(derivative) => derivative.update(magnitude),
            None => {
                self.derivative = Some(Derivative::starting_at(magnitude));
                0
            }
        };

        if delta.unsigned_abs() > self.config.threshold.unsigned_abs() {
            self.events.record_event(now);
        }

        let _ = self.gate.offer(self.events.rate_per_minute(now));
        Ok(())
    }

    fn output(&self) -> ChannelOutput {
        self.gate.output()
    }
}
