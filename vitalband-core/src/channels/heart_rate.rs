//! PPG heart rate and SpO2
//!
//! Both channels consume the same MAX30102 readings at the full 100 Hz
//! cadence. Heart rate runs the integer chain
//!
//! ```text
//! IR >> 2 ──▶ DC tracker ──▶ FIR ──▶ zero-crossing ──▶ beat history ──▶ 60000 / mean period
//! ```
//!
//! SpO2 fills fixed IR/red windows and hands them to the external
//! algorithm, sliding by a quarter window between runs.

use crate::constants::buffers::{HEART_RATE_HISTORY, SPO2_SLIDE};
use crate::constants::channels::{
    HEART_RATE_MAX_BPM, HEART_RATE_MIN_BPM, PPG_BEAT_WINDOW_MS, PPG_INPUT_SHIFT, PPG_RATE_AVERAGE_BEATS,
    SPO2_MAX_PERCENT, SPO2_MIN_PERCENT,
};
use crate::constants::{MS_PER_MINUTE, SPO2_BUFFER_LEN};
use crate::detect::ZeroCrossingDetector;
use crate::errors::ComputeResult;
use crate::filters::{DcTracker, FirState};
use crate::plausibility::{ChannelOutput, PlausibilityGate};
use crate::rate::TimeWindowRateCounter;
use crate::sample::{PpgReading, Sample};
use crate::traits::{Spo2Algorithm, Spo2Estimate};

use super::{ChannelEstimator, ChannelId};

/// Heart rate from the PPG infrared channel
#[derive(Debug, Clone)]
pub struct HeartRateChannel {
    dc: DcTracker,
    fir: FirState,
    detector: ZeroCrossingDetector,
    beats: TimeWindowRateCounter<HEART_RATE_HISTORY>,
    gate: PlausibilityGate,
    last_filtered: i16,
}

impl HeartRateChannel {
    pub const fn new() -> Self {
        Self {
            dc: DcTracker::new(),
            fir: FirState::new(),
            detector: ZeroCrossingDetector::new(),
            beats: TimeWindowRateCounter::new(PPG_BEAT_WINDOW_MS, 0),
            gate: PlausibilityGate::new(ChannelId::HeartRate.name(), HEART_RATE_MIN_BPM, HEART_RATE_MAX_BPM),
            last_filtered: 0,
        }
    }

    /// Low-passed AC component of the last sample
    pub fn filtered(&self) -> i16 {
        self.last_filtered
    }

    /// Beats recorded so far (bounded by the history capacity)
    pub fn beat_count(&self) -> usize {
        self.beats.len()
    }
}

impl Default for HeartRateChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelEstimator for HeartRateChannel {
    type Input = PpgReading;

    fn id(&self) -> ChannelId {
        ChannelId::HeartRate
    }

    fn update(&mut self, sample: Sample<PpgReading>) -> ComputeResult<()> {
        let ir = (sample.value.ir >> PPG_INPUT_SHIFT).min(u16::MAX as u32) as u16;
        let residual = self.dc.remove(ir).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        self.last_filtered = self.fir.filter(residual);

        if self.detector.update(self.last_filtered) && self.beats.record_event(sample.timestamp_ms) {
            if let Ok(interval) = self.beats.mean_interval_ms(PPG_RATE_AVERAGE_BEATS) {
                let _ = self.gate.offer(MS_PER_MINUTE as f32 / interval);
            }
        }
        Ok(())
    }

    fn output(&self) -> ChannelOutput {
        self.gate.output()
    }
}

/// Blood-oxygen saturation via the external reference algorithm
pub struct Spo2Channel<A: Spo2Algorithm> {
    algorithm: A,
    ir: [u32; SPO2_BUFFER_LEN],
    red: [u32; SPO2_BUFFER_LEN],
    filled: usize,
    gate: PlausibilityGate,
    last_estimate: Option<Spo2Estimate>,
}

impl<A: Spo2Algorithm> Spo2Channel<A> {
    pub fn new(algorithm: A) -> Self {
        Self {
            algorithm,
            ir: [0; SPO2_BUFFER_LEN],
            red: [0; SPO2_BUFFER_LEN],
            filled: 0,
            gate: PlausibilityGate::new(ChannelId::SpO2.name(), SPO2_MIN_PERCENT, SPO2_MAX_PERCENT),
            last_estimate: None,
        }
    }

    /// Samples currently buffered towards the next run
    pub fn buffered(&self) -> usize {
        self.filled
    }

    /// Raw result of the most recent algorithm run, valid or not
    pub fn last_estimate(&self) -> Option<Spo2Estimate> {
        self.last_estimate
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }
}

impl<A: Spo2Algorithm> ChannelEstimator for Spo2Channel<A> {
    type Input = PpgReading;

    fn id(&self) -> ChannelId {
        ChannelId::SpO2
    }

    fn update(&mut self, sample: Sample<PpgReading>) -> ComputeResult<()> {
        self.ir[self.filled] = sample.value.ir;
        self.red[self.filled] = sample.value.red;
        self.filled += 1;

        if self.filled == SPO2_BUFFER_LEN {
            let estimate = self.algorithm.estimate_spo2(&self.ir, &self.red);
            self.last_estimate = Some(estimate);
            if estimate.spo2_valid {
                let _ = self.gate.offer(estimate.spo2_percent as f32);
            }

            self.ir.copy_within(SPO2_SLIDE.., 0);
            self.red.copy_within(SPO2_SLIDE.., 0);
            self.filled = SPO2_BUFFER_LEN - SPO2_SLIDE;
        }
        Ok(())
    }

    fn output(&self) -> ChannelOutput {
        self.gate.output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Infrared reading for a sinusoidal pulse on a large DC baseline
    fn ppg(n: u32, period: u32) -> PpgReading {
        let phase = 2.0 * core::f32::consts::PI * n as f32 / period as f32;
        let ir = 120_000.0 + 600.0 * phase.sin();
        PpgReading { red: 90_000, ir: ir as u32 }
    }

    #[test]
    fn steady_pulse_reads_75_bpm() {
        // 80 samples per beat at 100 Hz = 800 ms = 75 BPM
        let mut channel = HeartRateChannel::new();
        for n in 0..2000u32 {
            channel.update(Sample::new(ppg(n, 80), n * 10)).unwrap();
        }
        let out = channel.output();
        assert!(out.valid);
        assert!((out.rate - 75.0).abs() < 1.0, "rate {}", out.rate);
    }

    #[test]
    fn beat_history_uses_configured_window() {
        let channel = HeartRateChannel::new();
        assert_eq!(channel.beats.window_ms(), PPG_BEAT_WINDOW_MS);
        assert_eq!(channel.beats.min_interval_ms(), 0);
    }

    #[test]
    fn no_signal_stays_invalid() {
        let mut channel = HeartRateChannel::new();
        for n in 0..1000u32 {
            channel.update(Sample::new(PpgReading { red: 0, ir: 0 }, n * 10)).unwrap();
        }
        assert!(!channel.output().valid);
        assert_eq!(channel.reported_value(), None);
    }

    struct FixedSpo2 {
        runs: usize,
        first_ir: u32,
    }

    impl Spo2Algorithm for FixedSpo2 {
        fn estimate_spo2(&mut self, ir: &[u32], red: &[u32]) -> Spo2Estimate {
            assert_eq!(ir.len(), red.len());
            self.runs += 1;
            self.first_ir = ir[0];
            Spo2Estimate { spo2_percent: 97, spo2_valid: true, heart_rate_bpm: 70, heart_rate_valid: true }
        }
    }

    #[test]
    fn spo2_runs_on_full_window_then_slides() {
        let mut channel = Spo2Channel::new(FixedSpo2 { runs: 0, first_ir: 0 });
        for n in 0..SPO2_BUFFER_LEN as u32 {
            channel.update(Sample::new(PpgReading { red: n, ir: n }, n * 10)).unwrap();
        }
        assert_eq!(channel.algorithm().runs, 1);
        assert_eq!(channel.algorithm().first_ir, 0);
        assert_eq!(channel.buffered(), SPO2_BUFFER_LEN - SPO2_SLIDE);
        assert_eq!(channel.output(), ChannelOutput { rate: 97.0, valid: true });

        for n in 0..SPO2_SLIDE as u32 {
            channel.update(Sample::new(PpgReading { red: 0, ir: 0 }, 1000 + n * 10)).unwrap();
        }
        assert_eq!(channel.algorithm().runs, 2);
        assert_eq!(channel.algorithm().first_ir, SPO2_SLIDE as u32);
    }

    #[test]
    fn every_run_frees_room_for_new_samples() {
        let mut channel = Spo2Channel::new(FixedSpo2 { runs: 0, first_ir: 0 });
        let total = (SPO2_BUFFER_LEN + 10 * SPO2_SLIDE) as u32;
        for n in 0..total {
            channel.update(Sample::new(PpgReading { red: n, ir: n }, n * 10)).unwrap();
            assert!(channel.buffered() < SPO2_BUFFER_LEN);
        }
        assert_eq!(channel.algorithm().runs, 11);
        assert_eq!(channel.algorithm().first_ir, 10 * SPO2_SLIDE as u32);
    }

    struct Implausible;

    impl Spo2Algorithm for Implausible {
        fn estimate_spo2(&mut self, _ir: &[u32], _red: &[u32]) -> Spo2Estimate {
            Spo2Estimate { spo2_percent: 40, spo2_valid: true, heart_rate_bpm: 0, heart_rate_valid: false }
        }
    }

    #[test]
    fn spo2_outside_range_is_not_published() {
        let mut channel = Spo2Channel::new(Implausible);
        for n in 0..SPO2_BUFFER_LEN as u32 {
            channel.update(Sample::new(PpgReading::default(), n * 10)).unwrap();
        }
        assert_eq!(channel.last_estimate().map(|e| e.spo2_percent), Some(40));
        assert!(!channel.output().valid);
    }
}
