//! Peak Detection
//!
//! Turns a conditioned scalar stream into discrete event instants.
//!
//! ## Variants
//!
//! - [`ZeroCrossingDetector`]: for the PPG residual, which is centred on
//!   zero after DC removal. A beat is a rising zero crossing whose preceding
//!   cycle had a plausible peak-to-peak amplitude, outside the refractory
//!   period of the previous beat.
//! - [`HysteresisDetector`]: for the analog pulse and respiratory channels.
//!   A sample-to-sample jump above a threshold arms the detector; the first
//!   decrease after that is the peak.
//!
//! Neither detector debounces in time. The hysteresis variant leaves that
//! to the rate counter it feeds; the zero-crossing variant counts samples
//! instead of milliseconds.

pub mod hysteresis;
pub mod zero_crossing;

pub use hysteresis::{detect_hysteresis, HysteresisDetector};
pub use zero_crossing::{detect_zero_crossing, ZeroCrossingDetector};
