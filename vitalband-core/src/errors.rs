//! Error Types for the Signal-Processing Core
//!
//! ## Design Philosophy
//!
//! The core runs inside a single cooperative control loop that must never
//! stop because of one bad sample. Errors are therefore values that describe
//! *which* recovery policy applies, not conditions that unwind:
//!
//! 1. **Small Size**: every variant carries only inline numbers or
//!    `&'static str`, so errors can be returned from the per-sample hot path.
//!
//! 2. **No Heap Allocation**: nothing here needs an allocator.
//!
//! 3. **Copy Semantics**: errors are `Copy` and cheap to pass around or log.
//!
//! ## Error Categories
//!
//! ### Sensor Collaborators
//! - `SensorError`: a bus transaction failed or the device had nothing new.
//!   The channel is skipped for this cycle and keeps its last output.
//!
//! ### Arithmetic
//! - `ComputeError`: a divisor derived from sensor data degenerated to zero,
//!   or too little history exists to compute a rate. The computation is
//!   abandoned for this cycle.
//!
//! ### Plausibility
//! - `PlausibilityError`: a computed rate or reading lies outside the
//!   physiological range for its channel. The previous accepted value stays.
//!
//! ### Aggregation
//! - `AggregatorError`: the report cycle already holds every expected entry,
//!   an entry does not fit in the message buffer, or its value has no JSON
//!   representation. The entry is dropped.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use vitalband_core::errors::SensorError;
//!
//! fn on_read(result: Result<u32, SensorError>) {
//!     match result {
//!         Ok(_sample) => { /* feed the channel */ }
//!         Err(SensorError::NotReady) => { /* nothing new this tick */ }
//!         Err(_) => { /* log, skip the channel, keep last output */ }
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for sensor collaborator reads
pub type SensorResult<T> = Result<T, SensorError>;

/// Result type for guarded arithmetic
pub type ComputeResult<T> = Result<T, ComputeError>;

/// Result type for plausibility gating
pub type PlausibilityResult<T> = Result<T, PlausibilityError>;

/// Result type for aggregator operations
pub type AggregatorResult<T> = Result<T, AggregatorError>;

/// Failure reported by a sensor sample source
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Bus transaction (I2C/ADC) failed with a driver error code
    #[error("Bus transaction failed with code {code}")]
    Bus {
        /// Driver-specific error code
        code: i32,
    },

    /// Device has no new sample available this tick
    #[error("Sensor has no new sample")]
    NotReady,

    /// Device answered but the payload is unusable
    #[error("Invalid sensor data: {reason}")]
    InvalidData {
        /// Short description of what was wrong
        reason: &'static str,
    },
}

/// Arithmetic that could not be completed this cycle
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeError {
    /// A divisor computed from sensor data was zero
    #[error("Division by zero in {context}")]
    DivideByZero {
        /// Which computation hit the degenerate divisor
        context: &'static str,
    },

    /// Not enough recorded events to derive a value
    #[error("Insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Minimum number of events needed
        required: usize,
        /// Events actually available
        available: usize,
    },
}

/// A value rejected by a channel's physiological range
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PlausibilityError {
    /// Value outside the channel's accepted range
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The rejected value
        value: f32,
        /// Lower bound (inclusive)
        min: f32,
        /// Upper bound (inclusive)
        max: f32,
    },

    /// Value makes no numeric sense (NaN, infinity)
    #[error("Invalid value: not a finite number")]
    InvalidValue,
}

/// Entry rejected by the aggregator
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorError {
    /// Every expected entry for this cycle has already been received
    #[error("Aggregator already holds {expected} entries")]
    Full {
        /// Entries expected per cycle
        expected: usize,
    },

    /// Entry could not be serialized within the message buffer
    #[error("Entry {key} does not fit in the message buffer")]
    EntryTooLarge {
        /// Key of the dropped entry
        key: &'static str,
    },

    /// Decimal value is NaN or infinite
    #[error("Entry {key} is not a finite number")]
    NonFiniteValue {
        /// Key of the dropped entry
        key: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Bus { code } => defmt::write!(fmt, "Bus error {}", code),
            Self::NotReady => defmt::write!(fmt, "Not ready"),
            Self::InvalidData { reason } => defmt::write!(fmt, "Invalid data: {}", reason),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ComputeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::DivideByZero { context } => defmt::write!(fmt, "Divide by zero in {}", context),
            Self::InsufficientData { required, available } =>
                defmt::write!(fmt, "Need {} events, have {}", required, available),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PlausibilityError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRange { value, min, max } =>
                defmt::write!(fmt, "Value {} outside [{}, {}]", value, min, max),
            Self::InvalidValue => defmt::write!(fmt, "Invalid value"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AggregatorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Full { expected } => defmt::write!(fmt, "Aggregator full ({})", expected),
            Self::EntryTooLarge { key } => defmt::write!(fmt, "Entry {} too large", key),
            Self::NonFiniteValue { key } => defmt::write!(fmt, "Entry {} not finite", key),
        }
    }
}
