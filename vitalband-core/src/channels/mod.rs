//! Channel Estimators
//!
//! A channel turns one sensor's samples into one externally visible value.
//! Most channels are a filter chain, a peak detector and a rate counter
//! behind a plausibility gate:
//!
//! ```text
//! Sample ──▶ filters ──▶ detector ──▶ rate counter ──▶ gate ──▶ ChannelOutput
//! ```
//!
//! The temperature and barometer channels skip the detector stages and gate
//! a compensated reading directly.
//!
//! ## Registration Order
//!
//! [`ChannelId::ALL`] fixes the order channels are polled within a tick and
//! the order their entries appear in the outbound message. Downstream
//! consumers rely on that order; append new channels at the end.

pub mod barometer;
pub mod heart_rate;
pub mod motion;
pub mod pulse;
pub mod respiratory;
pub mod temperature;

pub use barometer::BarometerChannel;
pub use heart_rate::{HeartRateChannel, Spo2Channel};
pub use motion::MotionRateChannel;
pub use pulse::PulseChannel;
pub use respiratory::RespiratoryChannel;
pub use temperature::TemperatureChannel;

use crate::aggregator::Value;
use crate::errors::ComputeResult;
use crate::plausibility::ChannelOutput;
use crate::sample::Sample;

/// Identity of every channel the band reports, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChannelId {
    Accelerometer,
    Gyroscope,
    RespiratoryRate,
    PulseSensor,
    HeartRate,
    SpO2,
    SkinTemperature,
    Pressure,
}

impl ChannelId {
    pub const ALL: [ChannelId; 8] = [
        ChannelId::Accelerometer,
        ChannelId::Gyroscope,
        ChannelId::RespiratoryRate,
        ChannelId::PulseSensor,
        ChannelId::HeartRate,
        ChannelId::SpO2,
        ChannelId::SkinTemperature,
        ChannelId::Pressure,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Key used in the outbound message
    pub const fn name(self) -> &'static str {
        match self {
            ChannelId::Accelerometer => "Accelerometer",
            ChannelId::Gyroscope => "Gyroscope",
            ChannelId::RespiratoryRate => "RespiratoryRate",
            ChannelId::PulseSensor => "PulseSensor",
            ChannelId::HeartRate => "HeartRate",
            ChannelId::SpO2 => "SpO2",
            ChannelId::SkinTemperature => "SkinTemperature",
            ChannelId::Pressure => "Pressure",
        }
    }

    /// Position in registration order
    pub const fn index(self) -> usize {
        self as usize
    }

    /// How the channel's value is rendered in the message
    pub const fn value_kind(self) -> ValueKind {
        match self {
            ChannelId::SkinTemperature | ChannelId::Pressure => ValueKind::Decimal,
            _ => ValueKind::Integer,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// Rendering of a channel value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Rounded to the nearest whole number
    Integer,
    /// Two fraction digits
    Decimal,
}

impl ValueKind {
    pub fn render(self, value: f32) -> Value {
        match self {
            ValueKind::Integer => Value::Integer(libm::roundf(value) as i32),
            ValueKind::Decimal => Value::Decimal(value),
        }
    }
}

/// One physiological quantity derived from one sample stream
///
/// ## Implementation Requirements
///
/// - `update` never panics and never blocks
/// - a rejected or failed computation leaves `output()` unchanged
/// - state is owned exclusively by the channel
pub trait ChannelEstimator {
    /// Payload of the samples this channel consumes
    type Input;

    fn id(&self) -> ChannelId;

    /// Process one sample. `Err` means this cycle produced no update.
    fn update(&mut self, sample: Sample<Self::Input>) -> ComputeResult<()>;

    /// Last accepted value
    fn output(&self) -> ChannelOutput;

    /// Value to report, if one has ever been accepted
    fn reported_value(&self) -> Option<Value> {
        let output = self.output();
        output.valid.then(|| self.id().value_kind().render(output.rate))
    }
}
