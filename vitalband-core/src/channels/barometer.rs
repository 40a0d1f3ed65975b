//! Ambient pressure from the BMP280

use crate::compensation::bmp280::{self, Bmp280Calibration, Bmp280Raw, Bmp280Reading};
use crate::constants::channels::{PRESSURE_MAX_HPA, PRESSURE_MIN_HPA};
use crate::constants::sensors::BMP280_BURST_LEN;
use crate::errors::ComputeResult;
use crate::plausibility::{ChannelOutput, PlausibilityGate};
use crate::sample::Sample;

use super::{ChannelEstimator, ChannelId};

/// Pressure channel holding the part's factory calibration
#[derive(Debug, Clone)]
pub struct BarometerChannel {
    calibration: Bmp280Calibration,
    gate: PlausibilityGate,
    last_reading: Option<Bmp280Reading>,
}

impl BarometerChannel {
    pub const fn new(calibration: Bmp280Calibration) -> Self {
        Self {
            calibration,
            gate: PlausibilityGate::new(ChannelId::Pressure.name(), PRESSURE_MIN_HPA, PRESSURE_MAX_HPA),
            last_reading: None,
        }
    }

    /// Last successfully compensated reading, plausible or not
    pub fn last_reading(&self) -> Option<Bmp280Reading> {
        self.last_reading
    }
}

impl ChannelEstimator for BarometerChannel {
    /// Pressure + temperature burst from register 0xF7
    type Input = [u8; BMP280_BURST_LEN];

    fn id(&self) -> ChannelId {
        ChannelId::Pressure
    }

    fn update(&mut self, sample: Sample<[u8; BMP280_BURST_LEN]>) -> ComputeResult<()> {
        let raw = Bmp280Raw::from_burst(&sample.value);
        let reading = bmp280::compensate(&self.calibration, raw)?;
        self.last_reading = Some(reading);
        let _ = self.gate.offer(reading.pressure_hpa());
        Ok(())
    }

    fn output(&self) -> ChannelOutput {
        self.gate.output()
    }
}
