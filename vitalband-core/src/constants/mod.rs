//! Design Constants for the VitalBand Core
//!
//! Every tunable number in the signal chain lives here. These are design
//! parameters matched to the sensors on the band, not user settings: they are
//! compile-time constants and nothing in the crate mutates them at runtime.
//!
//! ## Organization
//!
//! Constants are grouped by concern:
//! - **Filters**: DC tracker shifts, FIR coefficient table, window sizes
//! - **Channels**: detector thresholds, debounce intervals, rate windows,
//!   plausibility bounds
//! - **Time**: unit conversions and scheduler cadence
//! - **Buffers**: rate-counter capacities, SpO2 buffers, message sizes
//! - **Sensors**: datasheet scale factors for register conversions
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Keep units in the name (`_MS`, `_MV`, `_MG`, `_BPM`)
//! 3. Note the sensor or datasheet a value was tuned against

/// Fixed-point filter parameters.
pub mod filters;

/// Per-channel detector, window and plausibility parameters.
pub mod channels;

/// Time conversions and scheduler cadence.
pub mod time;

/// Buffer capacities.
pub mod buffers;

/// Register scale factors of the fitted sensors.
pub mod sensors;

pub use filters::{DC_DECAY_SHIFT, DC_FRACTION_BITS, FIR_COEFFS, FIR_FRACTION_BITS, FIR_RING_LEN};

pub use time::{MS_PER_MINUTE, MS_PER_SECOND, TICK_INTERVAL_MS};

pub use buffers::{AGGREGATOR_MESSAGE_BYTES, AGGREGATOR_MAX_ENTRIES, SPO2_BUFFER_LEN};
