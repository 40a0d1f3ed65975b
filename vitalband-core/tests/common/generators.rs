//! Waveform generators for the scripted sensors
//!
//! Each generator maps the read index of a sensor to a raw value. The
//! monitor reads the PPG every tick (10 ms) and every other sensor every
//! tenth tick (100 ms), so periods below are in reads of that sensor.

use vitalband_core::{compensation::Bmp280Calibration, PpgReading, Vector3};

/// Infrared pulse on a large DC baseline, `period` reads per beat
pub fn ppg_wave(n: u32, period: u32) -> PpgReading {
    let phase = 2.0 * std::f32::consts::PI * n as f32 / period as f32;
    let ir = 120_000.0 + 600.0 * phase.sin();
    PpgReading { red: 90_000, ir: ir as u32 }
}

/// Pulse sensor counts with a sharp upstroke every `period` reads
pub fn pulse_counts(n: u32, period: u32) -> i16 {
    match n % period {
        0 => 1700,
        1 => 2600,
        2 => 3400,
        3 => 3000,
        _ => 1700,
    }
}

/// Respiratory band counts: triangle of 20 reads up and 20 down
pub fn breathing_counts(n: u32) -> i16 {
    let phase = (n % 40) as i16;
    let level = if phase < 20 { phase } else { 40 - phase };
    1000 + level * 40
}

/// Accelerometer with a 0.4 g heel strike every fifth read
pub fn walking_accel(n: u32) -> Vector3 {
    let z = if n % 5 == 2 { 1.4 } else { 1.0 };
    Vector3::new(0.0, 0.0, z)
}

/// Accelerometer at rest with a little sensor noise
pub fn resting_accel(n: u32) -> Vector3 {
    let z = if n % 2 == 0 { 1.01 } else { 1.0 };
    Vector3::new(0.0, 0.0, z)
}

/// MLX90614 register for 36.35 °C
pub const SKIN_REGISTER: u16 = 15_475;

/// BMP280 burst for the datasheet example (adc_P 415148, adc_T 519888)
pub const BAROMETER_BURST: [u8; 6] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00];

/// Trimming parameters of the datasheet example
pub const DATASHEET_CALIBRATION: Bmp280Calibration = Bmp280Calibration {
    dig_t1: 27504,
    dig_t2: 26435,
    dig_t3: -1000,
    dig_p1: 36477,
    dig_p2: -10685,
    dig_p3: 3024,
    dig_p4: 2855,
    dig_p5: 140,
    dig_p6: -7,
    dig_p7: 15500,
    dig_p8: -14600,
    dig_p9: 6000,
};

/// Pressure reported for `BAROMETER_BURST` under `DATASHEET_CALIBRATION`
pub const DATASHEET_PRESSURE_HPA: f32 = 1006.53;
