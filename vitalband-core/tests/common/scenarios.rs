//! Pre-built wearer scenarios
//!
//! A scenario is one script per sensor. Tests start from a preset and
//! replace the scripts they care about.

use vitalband_core::{errors::SensorResult, PpgReading, Vector3};

use super::generators::{
    breathing_counts, ppg_wave, pulse_counts, resting_accel, walking_accel, BAROMETER_BURST, SKIN_REGISTER,
};
use super::Script;

/// One script per sensor of the band
pub struct SensorScripts {
    pub accelerometer: Script<Vector3>,
    pub gyroscope: Script<Vector3>,
    pub respiratory: Script<i16>,
    pub pulse: Script<i16>,
    pub ppg: Script<PpgReading>,
    pub thermometer: Script<u16>,
    pub barometer: Script<[u8; 6]>,
}

/// Box a closure as a script
pub fn script<T, F>(f: F) -> Script<T>
where
    F: FnMut(u32) -> SensorResult<T> + 'static,
{
    Box::new(f)
}

impl SensorScripts {
    /// Wearer sitting still: 75 BPM pulse wave on the PPG, 60 BPM on the
    /// analog pulse sensor, 15 breaths per minute, no steps, no rotation
    pub fn resting() -> Self {
        Self {
            accelerometer: script(|n| Ok(resting_accel(n))),
            gyroscope: script(|_| Ok(Vector3::new(0.0, 0.0, 0.0))),
            respiratory: script(|n| Ok(breathing_counts(n))),
            pulse: script(|n| Ok(pulse_counts(n, 10))),
            ppg: script(|n| Ok(ppg_wave(n, 80))),
            thermometer: script(|_| Ok(SKIN_REGISTER)),
            barometer: script(|_| Ok(BAROMETER_BURST)),
        }
    }

    /// Resting vitals while walking at 120 steps per minute
    pub fn walking() -> Self {
        Self { accelerometer: script(|n| Ok(walking_accel(n))), ..Self::resting() }
    }
}
