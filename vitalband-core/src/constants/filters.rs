//! Fixed-Point Filter Parameters
//!
//! The PPG chain (DC tracker followed by the symmetric FIR) works entirely in
//! integer arithmetic. Downstream amplitude gates are tuned to the exact
//! output scale these constants produce, so changing any of them means
//! re-tuning the zero-crossing detector as well.

// ===== DC TRACKER =====

/// Fractional bits of the DC tracker accumulator (Q15).
///
/// The running estimate holds `sample << 15`. With 16-bit input the largest
/// accumulator value is `65535 << 15`, which still fits in an `i32`.
pub const DC_FRACTION_BITS: u32 = 15;

/// Decay shift of the exponential tracker.
///
/// Each sample moves the estimate `1 / 2^4` of the way toward the input,
/// giving a time constant of roughly 16 samples.
pub const DC_DECAY_SHIFT: u32 = 4;

// ===== LOW-PASS FIR =====

/// Length of the FIR history ring. Must be a power of two.
pub const FIR_RING_LEN: usize = 32;

/// Mask used to wrap ring indices.
pub const FIR_RING_MASK: usize = FIR_RING_LEN - 1;

/// Number of historical samples the FIR spans (taps mirrored around the
/// center sample).
pub const FIR_SPAN: usize = 23;

/// Half-band symmetric coefficients in Q15. Entry `i` weights the pair of
/// samples `i` positions from either end of the span; the last entry is the
/// center tap and is applied alone.
pub const FIR_COEFFS: [i32; 12] = [
    172, 321, 579, 927, 1360, 1858, 2390, 2916, 3391, 3768, 4012, 4096,
];

/// Fractional bits removed from the FIR accumulator.
pub const FIR_FRACTION_BITS: u32 = 15;

const _: () = assert!(FIR_RING_LEN.is_power_of_two(), "FIR ring must be a power of two");
const _: () = assert!(FIR_SPAN == 2 * (FIR_COEFFS.len() - 1) + 1, "FIR span must mirror the table");

// ===== MOVING AVERAGE WINDOWS =====

/// Moving-average window for the analog pulse channel (samples).
pub const PULSE_SMOOTHING_WINDOW: usize = 4;

/// Moving-average window for the respiratory channel (samples).
///
/// Breathing is slow relative to the 10 Hz analog cadence, so a wider window
/// costs no temporal resolution.
pub const RESPIRATORY_SMOOTHING_WINDOW: usize = 8;
