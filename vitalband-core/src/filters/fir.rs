//! Symmetric low-pass FIR
//!
//! A 23-tap linear-phase filter stored as 12 coefficients: tap `i` and tap
//! `22 - i` share `FIR_COEFFS[i]`, and the centre tap (11) uses the last
//! coefficient alone. The last 32 inputs are kept in a ring indexed with a
//! mask, so the write offset never needs an explicit bounds check.
//!
//! Arithmetic is integer only. The detector thresholds downstream are tuned
//! to this exact output scale.

use crate::constants::filters::FIR_RING_MASK;
use crate::constants::{FIR_COEFFS, FIR_FRACTION_BITS, FIR_RING_LEN};

/// FIR history ring and write offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirState {
    ring_buffer: [i16; FIR_RING_LEN],
    write_offset: u8,
}

impl FirState {
    pub const fn new() -> Self {
        Self { ring_buffer: [0; FIR_RING_LEN], write_offset: 0 }
    }

    pub const fn write_offset(&self) -> u8 {
        self.write_offset
    }

    /// Sample `lag` positions before the current write offset
    #[inline]
    fn tap(&self, lag: usize) -> i32 {
        let idx = (self.write_offset as usize).wrapping_sub(lag) & FIR_RING_MASK;
        self.ring_buffer[idx] as i32
    }

    /// Push `sample` and return the filtered output
    pub fn filter(&mut self, sample: i16) -> i16 {
        self.ring_buffer[self.write_offset as usize & FIR_RING_MASK] = sample;

        let centre = FIR_COEFFS.len() - 1;
        let mut acc = FIR_COEFFS[centre] * self.tap(centre);
        for (i, &coeff) in FIR_COEFFS[..centre].iter().enumerate() {
            acc += coeff * (self.tap(i) + self.tap(2 * centre - i));
        }

        self.write_offset = ((self.write_offset as usize + 1) % FIR_RING_LEN) as u8;

        let out = acc >> FIR_FRACTION_BITS;
        out.clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }
}

impl Default for FirState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure form of [`FirState::filter`]
pub fn fir_lowpass(mut state: FirState, sample: i16) -> (i16, FirState) {
    let out = state.filter(sample);
    (out, state)
}
