//! External SpO2 Algorithm
//!
//! Blood-oxygen saturation comes from a vendor reference algorithm that the
//! core treats as an opaque, deterministic function of two sample buffers.
//! The heart-rate channel is only responsible for filling the buffers at a
//! steady cadence and for gating what comes back.

/// Output of one SpO2 algorithm run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Spo2Estimate {
    /// Oxygen saturation in percent
    pub spo2_percent: i32,
    /// Whether the algorithm trusts `spo2_percent`
    pub spo2_valid: bool,
    /// Heart rate the algorithm derived from the same window (BPM)
    pub heart_rate_bpm: i32,
    /// Whether the algorithm trusts `heart_rate_bpm`
    pub heart_rate_valid: bool,
}

/// Reference SpO2 estimator
pub trait Spo2Algorithm {
    /// Estimate SpO2 from equally long IR and red buffers sampled at the
    /// PPG cadence. Both slices have the same length.
    fn estimate_spo2(&mut self, ir: &[u32], red: &[u32]) -> Spo2Estimate;
}
