//! Signal Conditioning Filters
//!
//! Every filter is a small owned state struct plus a pure update function of
//! the shape `(state, input) -> (output, new_state)`. Each channel owns its
//! own instances; nothing is shared between channels and nothing lives in a
//! `static`.
//!
//! The same update is also available as a `&mut self` method, which is what
//! the channels use on the hot path. Both forms run identical arithmetic.
//!
//! | Filter | Input | Output | Used by |
//! |--------|-------|--------|---------|
//! | [`DcTracker`] | `u16` | `i32` residual | heart rate |
//! | [`FirState`] | `i16` | `i16` low-passed | heart rate |
//! | [`MovingAverage`] | `i32` | `i32` mean | pulse, respiratory |
//! | [`Derivative`] | `i32` | `i32` delta | pulse, motion |
//!
//! None of these log or allocate.

pub mod dc;
pub mod derivative;
pub mod fir;
pub mod moving_average;

pub use dc::{dc_remove, DcTracker};
pub use derivative::{derivative, Derivative};
pub use fir::{fir_lowpass, FirState};
pub use moving_average::{moving_average, MovingAverage};
