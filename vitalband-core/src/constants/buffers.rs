//! Buffer Capacities
//!
//! All storage in the core is fixed-size and sized here. The numbers are
//! chosen so that the worst case for each buffer is known at compile time;
//! nothing grows at runtime.

use super::channels::{RESPIRATORY_DEBOUNCE_MS, RESPIRATORY_WINDOW_MS};

// ===== RATE COUNTER CAPACITIES =====

/// Beat timestamps kept for the PPG heart-rate channel.
pub const HEART_RATE_HISTORY: usize = 8;

/// Beat timestamps kept for the analog pulse channel.
pub const PULSE_HISTORY: usize = 15;

/// Breath timestamps kept for the respiratory channel.
///
/// At the 1500 ms debounce at most 41 breaths land in the inclusive 60 s
/// window, so the ring never overwrites a breath that still counts.
pub const RESPIRATORY_HISTORY: usize = 41;

/// Step timestamps kept for the cadence channel.
pub const STEP_HISTORY: usize = 50;

/// Rotation ("swing") timestamps kept for the gyroscope channel.
pub const ROTATION_HISTORY: usize = 50;

// ===== SPO2 =====

/// IR/red samples handed to the SpO2 algorithm per call.
pub const SPO2_BUFFER_LEN: usize = 100;

/// Samples discarded from the front of the SpO2 buffers after each call.
///
/// The remaining 75 samples are reused, so a new estimate is produced every
/// 25 PPG samples once the buffer has filled.
pub const SPO2_SLIDE: usize = 25;

const _: () = assert!(SPO2_SLIDE <= SPO2_BUFFER_LEN, "slide cannot exceed the buffer");
const _: () = assert!(SPO2_SLIDE > 0, "a zero slide never frees space in the buffer");

const _: () = assert!(
    RESPIRATORY_HISTORY > (RESPIRATORY_WINDOW_MS / RESPIRATORY_DEBOUNCE_MS) as usize,
    "respiratory history must hold every breath the window can count"
);

// ===== AGGREGATED MESSAGE =====

/// Maximum entries in one aggregated message.
pub const AGGREGATOR_MAX_ENTRIES: usize = 8;

/// Maximum serialized length of one aggregated message (bytes).
pub const AGGREGATOR_MESSAGE_BYTES: usize = 256;
