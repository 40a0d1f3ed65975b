//! Signal-processing core for the VitalBand wearable
//!
//! Turns raw biosignal and motion samples into physiological rates (heart
//! rate, SpO2, pulse, respiratory rate, step cadence, rotation rate) and
//! merges them into one outbound message per report cycle.
//!
//! Key constraints:
//! - Single cooperative control loop, 10 ms tick
//! - No heap allocation anywhere; every buffer is fixed-capacity
//! - No panics on sensor data: bad samples degrade to "no update"
//!
//! ```
//! use vitalband_core::filters::{dc_remove, fir_lowpass, DcTracker, FirState};
//! use vitalband_core::rate::TimeWindowRateCounter;
//!
//! let (residual, dc) = dc_remove(DcTracker::primed(30_000), 30_120);
//! let (filtered, _fir) = fir_lowpass(FirState::new(), residual as i16);
//! assert!(residual > 0 && filtered >= 0);
//! assert_eq!(dc.baseline(), 30_007);
//!
//! let mut beats: TimeWindowRateCounter<8> = TimeWindowRateCounter::new(4000, 250);
//! for t in [0, 1000, 2000, 3000] {
//!     beats.record_event(t);
//! }
//! assert_eq!(beats.rate_per_minute(3000), 60.0);
//! ```
//!
//! The full loop lives in [`monitor::VitalsMonitor`]; sensors, the SpO2
//! algorithm and the radio are plugged in through [`traits`].

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

pub mod aggregator;
pub mod buffer;
pub mod channels;
pub mod compensation;
pub mod constants;
pub mod detect;
pub mod errors;
pub mod filters;
mod logging;
pub mod monitor;
pub mod plausibility;
pub mod rate;
pub mod sample;
pub mod scheduler;
pub mod time;
pub mod traits;

// Public API
pub use aggregator::{AddOutcome, Aggregator, Value};
pub use channels::{ChannelEstimator, ChannelId};
pub use errors::{AggregatorError, ComputeError, PlausibilityError, SensorError};
pub use monitor::{Diagnostic, ReportConfig, SensorSet, SensorSuite, TickReport, VitalsMonitor};
pub use plausibility::ChannelOutput;
pub use rate::TimeWindowRateCounter;
pub use sample::{PpgReading, Sample, Vector3};
pub use scheduler::Scheduler;
pub use traits::{MessageSink, SampleSource, Spo2Algorithm, Spo2Estimate, TimeSource};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
