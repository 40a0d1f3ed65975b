//! Skin temperature from the MLX90614 object register

use crate::compensation::mlx90614;
use crate::constants::channels::{SKIN_TEMP_MAX_C, SKIN_TEMP_MIN_C};
use crate::errors::ComputeResult;
use crate::plausibility::{ChannelOutput, PlausibilityGate};
use crate::sample::Sample;

use super::{ChannelEstimator, ChannelId};

#[derive(Debug, Clone)]
pub struct TemperatureChannel {
    gate: PlausibilityGate,
}

impl TemperatureChannel {
    pub const fn new() -> Self {
        Self { gate: PlausibilityGate::new(ChannelId::SkinTemperature.name(), SKIN_TEMP_MIN_C, SKIN_TEMP_MAX_C) }
    }
}

impl Default for TemperatureChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelEstimator for TemperatureChannel {
    /// Raw object temperature register (0.02 K per LSB)
    type Input = u16;

    fn id(&self) -> ChannelId {
        ChannelId::SkinTemperature
    }

    fn update(&mut self, sample: Sample<u16>) -> ComputeResult<()> {
        let _ = self.gate.offer(mlx90614::to_celsius(sample.value));
        Ok(())
    }

    fn output(&self) -> ChannelOutput {
        self.gate.output()
    }
}
