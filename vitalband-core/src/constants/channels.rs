//! Channel Parameters
//!
//! Detector thresholds, debounce intervals, rate windows and plausibility
//! bounds for each physiological channel. The thresholds are tuned to the
//! noise floor of the sensors on the band (MAX30102, analog pulse and
//! respiration front ends, MPU6050); treat them as starting points when
//! porting to different hardware.

// ===== PPG HEART RATE (MAX30102) =====

/// Lower bound (exclusive) of the peak-to-peak amplitude accepted as a beat,
/// in FIR output units.
pub const PPG_MIN_PEAK_TO_PEAK: i32 = 20;

/// Upper bound (exclusive) of the peak-to-peak amplitude accepted as a beat.
///
/// Larger swings are motion artefacts, not pulses.
pub const PPG_MAX_PEAK_TO_PEAK: i32 = 1000;

/// Samples after a beat during which no further beat is accepted.
///
/// 25 samples at 100 Hz = 250 ms, above the shortest physiological R-R
/// interval at 240 BPM.
pub const PPG_REFRACTORY_SAMPLES: u16 = 25;

/// Right shift applied to the 18-bit MAX30102 FIFO value before the DC
/// tracker, which takes 16-bit input.
pub const PPG_INPUT_SHIFT: u32 = 2;

/// Beats averaged for the PPG heart-rate estimate.
pub const PPG_RATE_AVERAGE_BEATS: usize = 4;

/// Beat history horizon for the PPG channel (ms). Only the mean-period rate
/// is used, so this only bounds what `count_in_window` reports.
pub const PPG_BEAT_WINDOW_MS: u32 = 15_000;

/// Plausible heart rate range (BPM).
pub const HEART_RATE_MIN_BPM: f32 = 20.0;

/// See [`HEART_RATE_MIN_BPM`].
pub const HEART_RATE_MAX_BPM: f32 = 255.0;

/// Plausible SpO2 range (percent).
pub const SPO2_MIN_PERCENT: f32 = 70.0;

/// See [`SPO2_MIN_PERCENT`].
pub const SPO2_MAX_PERCENT: f32 = 100.0;

// ===== ANALOG PULSE =====

/// Rise above the previous smoothed sample that arms the pulse detector (mV).
pub const PULSE_THRESHOLD_MV: i32 = 100;

/// Minimum spacing between accepted pulse peaks (ms).
pub const PULSE_DEBOUNCE_MS: u32 = 600;

/// Age limit for the peaks averaged into the pulse rate (ms).
///
/// Peaks older than this are left out of the mean period, so a dropout
/// longer than the window restarts the estimate instead of averaging
/// across the gap.
pub const PULSE_WINDOW_MS: u32 = 15_000;

// ===== RESPIRATION =====

/// Rise above the previous smoothed sample that arms the breath detector (mV).
pub const RESPIRATORY_THRESHOLD_MV: i32 = 20;

/// Minimum spacing between accepted breaths (ms). Caps the rate at 40/min.
pub const RESPIRATORY_DEBOUNCE_MS: u32 = 1500;

/// Trailing window for the breath count (ms).
pub const RESPIRATORY_WINDOW_MS: u32 = 60_000;

/// Plausible respiratory rate range (breaths/min).
pub const RESPIRATORY_MIN_RATE: f32 = 0.0;

/// See [`RESPIRATORY_MIN_RATE`].
pub const RESPIRATORY_MAX_RATE: f32 = 40.0;

// ===== STEP CADENCE (MPU6050 ACCELEROMETER) =====

/// Change in acceleration magnitude counted as a step (milli-g).
pub const STEP_THRESHOLD_MG: i32 = 200;

/// Minimum spacing between steps (ms).
pub const STEP_DEBOUNCE_MS: u32 = 500;

/// Trailing window for the step count (ms).
pub const STEP_WINDOW_MS: u32 = 10_000;

/// Plausible cadence range (steps/min).
pub const STEP_MIN_RATE: f32 = 0.0;

/// See [`STEP_MIN_RATE`].
pub const STEP_MAX_RATE: f32 = 250.0;

// ===== ROTATION RATE (MPU6050 GYROSCOPE) =====

/// Change in angular-rate magnitude counted as a swing (milli-degrees/s).
pub const ROTATION_THRESHOLD_MDPS: i32 = 26_000;

/// Minimum spacing between swings (ms).
pub const ROTATION_DEBOUNCE_MS: u32 = 500;

/// Trailing window for the swing count (ms).
pub const ROTATION_WINDOW_MS: u32 = 10_000;

/// Plausible swing-rate range (swings/min).
pub const ROTATION_MIN_RATE: f32 = 0.0;

/// See [`ROTATION_MIN_RATE`].
pub const ROTATION_MAX_RATE: f32 = 250.0;

// ===== SKIN TEMPERATURE (MLX90614) =====

/// Plausible skin temperature range (°C).
pub const SKIN_TEMP_MIN_C: f32 = 20.0;

/// See [`SKIN_TEMP_MIN_C`].
pub const SKIN_TEMP_MAX_C: f32 = 45.0;

// ===== PRESSURE (BMP280) =====

/// Plausible barometric pressure range (hPa), covering the sensor's
/// specified operating range.
pub const PRESSURE_MIN_HPA: f32 = 300.0;

/// See [`PRESSURE_MIN_HPA`].
pub const PRESSURE_MAX_HPA: f32 = 1100.0;
