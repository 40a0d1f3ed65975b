//! Sensor Sample Sources
//!
//! A `SampleSource` wraps the register-level work for one logical channel:
//! bus transactions, FIFO reads, byte unpacking. The core only sees finished
//! samples or an error.
//!
//! ## Error Contract
//!
//! Any `Err` is treated as transient. The monitor logs it, skips that
//! channel for the current cycle and keeps the channel's previous output.
//! A source that fails forever simply never updates its channel; it never
//! stops the loop.
//!
//! ## Bus Sharing
//!
//! Several sources usually share one I2C bus. Serialising access to that bus
//! is the source implementation's job; the core calls sources one after the
//! other from a single thread and holds no locks.
//!
//! ```rust
//! use vitalband_core::traits::SampleSource;
//! use vitalband_core::errors::{SensorError, SensorResult};
//! use vitalband_core::sample::Sample;
//!
//! struct FakeAdc { counts: i16, now: u32 }
//!
//! impl SampleSource for FakeAdc {
//!     type Value = i16;
//!
//!     fn read_sample(&mut self) -> SensorResult<Sample<i16>> {
//!         if self.counts < 0 {
//!             return Err(SensorError::InvalidData { reason: "negative count" });
//!         }
//!         Ok(Sample::new(self.counts, self.now))
//!     }
//! }
//! ```

use crate::errors::SensorResult;
use crate::sample::Sample;

/// Produces timestamped samples for one channel
pub trait SampleSource {
    /// Payload of each sample
    type Value;

    /// Read the next sample. May block for the duration of one bus
    /// transaction, never longer.
    fn read_sample(&mut self) -> SensorResult<Sample<Self::Value>>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    type Value = S::Value;

    fn read_sample(&mut self) -> SensorResult<Sample<Self::Value>> {
        (**self).read_sample()
    }
}
