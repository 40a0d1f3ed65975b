//! Zero-crossing beat detector with amplitude gate and refractory period

use crate::constants::channels::{PPG_MAX_PEAK_TO_PEAK, PPG_MIN_PEAK_TO_PEAK, PPG_REFRACTORY_SAMPLES};

/// Beat detector state for a zero-centred PPG residual
///
/// Exactly one extremum tracker is active at a time: the maximum while
/// `rising`, the minimum otherwise. `refractory_counter` counts down one per
/// sample and is only ever re-armed by an emitted beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroCrossingDetector {
    previous_filtered: i16,
    current_filtered: i16,
    signal_min: i16,
    signal_max: i16,
    peak_to_peak_max: i16,
    peak_to_peak_min: i16,
    rising: bool,
    refractory_counter: u16,
    min_peak_to_peak: i32,
    max_peak_to_peak: i32,
    refractory_samples: u16,
}

impl ZeroCrossingDetector {
    /// Detector with the PPG amplitude gate and refractory period
    pub const fn new() -> Self {
        Self::with_limits(PPG_MIN_PEAK_TO_PEAK, PPG_MAX_PEAK_TO_PEAK, PPG_REFRACTORY_SAMPLES)
    }

    /// Detector with a custom gate `(min, max)` (both exclusive) and
    /// refractory length in samples
    pub const fn with_limits(min_peak_to_peak: i32, max_peak_to_peak: i32, refractory_samples: u16) -> Self {
        Self {
            previous_filtered: 0,
            current_filtered: 0,
            signal_min: 0,
            signal_max: 0,
            peak_to_peak_max: 0,
            peak_to_peak_min: 0,
            rising: false,
            refractory_counter: 0,
            min_peak_to_peak,
            max_peak_to_peak,
            refractory_samples,
        }
    }

    /// Feed one filtered sample; returns `true` when a beat is detected
    pub fn update(&mut self, filtered: i16) -> bool {
        self.previous_filtered = self.current_filtered;
        self.current_filtered = filtered;
        self.refractory_counter = self.refractory_counter.saturating_sub(1);

        let prev = self.previous_filtered;
        let cur = self.current_filtered;
        let mut beat = false;

        if prev < 0 && cur >= 0 {
            self.peak_to_peak_max = self.signal_max;
            self.peak_to_peak_min = self.signal_min;
            self.signal_max = 0;
            self.signal_min = 0;
            self.rising = true;

            let amplitude = self.peak_to_peak();
            if self.refractory_counter == 0
                && amplitude > self.min_peak_to_peak
                && amplitude < self.max_peak_to_peak
            {
                beat = true;
                self.refractory_counter = self.refractory_samples;
            }
        } else if prev > 0 && cur <= 0 {
            self.signal_min = 0;
            self.rising = false;
        }

        if self.rising {
            self.signal_max = self.signal_max.max(cur);
        } else {
            self.signal_min = self.signal_min.min(cur);
        }

        beat
    }

    /// Peak-to-peak amplitude latched at the last rising crossing
    pub fn peak_to_peak(&self) -> i32 {
        self.peak_to_peak_max as i32 - self.peak_to_peak_min as i32
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }

    pub fn refractory_counter(&self) -> u16 {
        self.refractory_counter
    }
}

impl Default for ZeroCrossingDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure form of [`ZeroCrossingDetector::update`]
pub fn detect_zero_crossing(mut state: ZeroCrossingDetector, filtered: i16) -> (bool, ZeroCrossingDetector) {
    let beat = state.update(filtered);
    (beat, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sine(n: u32, amplitude: f32, period: u32) -> i16 {
        let phase = 2.0 * core::f32::consts::PI * n as f32 / period as f32;
        (amplitude * phase.sin()).round() as i16
    }

    fn count_beats(amplitude: f32, period: u32, samples: u32) -> (usize, ZeroCrossingDetector) {
        let mut det = ZeroCrossingDetector::new();
        let beats = (0..=samples).filter(|&n| det.update(sine(n, amplitude, period))).count();
        (beats, det)
    }

    #[test]
    fn one_beat_per_period() {
        let (beats, det) = count_beats(200.0, 50, 500);
        assert_eq!(beats, 10);
        assert_eq!(det.peak_to_peak(), 400);
    }

    #[test]
    fn refractory_suppresses_fast_crossings() {
        // 20-sample period is shorter than the 25-sample refractory, so
        // every other crossing is swallowed.
        let (beats, _) = count_beats(200.0, 20, 200);
        assert_eq!(beats, 5);
    }

    #[test]
    fn amplitude_gate_rejects_noise_and_artifacts() {
        let (tiny, _) = count_beats(5.0, 50, 500);
        assert_eq!(tiny, 0);

        let (huge, _) = count_beats(1200.0, 50, 500);
        assert_eq!(huge, 0);
    }

    #[test]
    fn tracking_switches_with_crossings() {
        let mut det = ZeroCrossingDetector::new();
        det.update(-10);
        assert!(!det.is_rising());
        det.update(5);
        assert!(det.is_rising());
        det.update(-1);
        assert!(!det.is_rising());
    }

    proptest! {
        #[test]
        fn refractory_only_rearmed_by_beats(samples in prop::collection::vec(-600i16..600, 1..400)) {
            let mut det = ZeroCrossingDetector::new();
            for &s in &samples {
                let before = det.refractory_counter();
                let beat = det.update(s);
                if beat {
                    prop_assert_eq!(det.refractory_counter(), PPG_REFRACTORY_SAMPLES);
                } else {
                    prop_assert_eq!(det.refractory_counter(), before.saturating_sub(1));
                }
            }
        }
    }
}
