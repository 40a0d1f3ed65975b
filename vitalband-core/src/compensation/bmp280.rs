//! BMP280 temperature and pressure compensation
//!
//! Integer reference algorithm from the BMP280 datasheet (section 8.2):
//! 32-bit temperature producing `t_fine`, then the 64-bit pressure path.
//! Overflowing intermediate products wrap instead of trapping, so corrupt
//! trimming data yields a garbage reading (rejected later by the
//! plausibility gate) rather than a panic.

use crate::constants::sensors::{BMP280_BURST_LEN, BMP280_CALIBRATION_LEN};
use crate::errors::{ComputeError, ComputeResult};

/// Factory trimming parameters (`dig_T1..dig_T3`, `dig_P1..dig_P9`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bmp280Calibration {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

impl Bmp280Calibration {
    /// Parse the little-endian block read from register 0x88
    pub fn from_registers(bytes: &[u8; BMP280_CALIBRATION_LEN]) -> Self {
        let u = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        let s = |i: usize| i16::from_le_bytes([bytes[i], bytes[i + 1]]);
        Self {
            dig_t1: u(0),
            dig_t2: s(2),
            dig_t3: s(4),
            dig_p1: u(6),
            dig_p2: s(8),
            dig_p3: s(10),
            dig_p4: s(12),
            dig_p5: s(14),
            dig_p6: s(16),
            dig_p7: s(18),
            dig_p8: s(20),
            dig_p9: s(22),
        }
    }
}

/// Uncompensated 20-bit conversion results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bmp280Raw {
    pub adc_t: i32,
    pub adc_p: i32,
}

impl Bmp280Raw {
    /// Unpack the burst read from register 0xF7 (pressure first)
    pub fn from_burst(bytes: &[u8; BMP280_BURST_LEN]) -> Self {
        let unpack = |msb: u8, lsb: u8, xlsb: u8| (msb as i32) << 12 | (lsb as i32) << 4 | (xlsb as i32) >> 4;
        Self {
            adc_p: unpack(bytes[0], bytes[1], bytes[2]),
            adc_t: unpack(bytes[3], bytes[4], bytes[5]),
        }
    }
}

/// Compensated reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bmp280Reading {
    /// Temperature in 0.01 °C
    pub temperature_centi_c: i32,
    /// Pressure in Pa as unsigned Q24.8
    pub pressure_q24_8: u32,
}

impl Bmp280Reading {
    pub fn temperature_c(&self) -> f32 {
        self.temperature_centi_c as f32 / 100.0
    }

    pub fn pressure_pa(&self) -> f32 {
        self.pressure_q24_8 as f32 / 256.0
    }

    pub fn pressure_hpa(&self) -> f32 {
        self.pressure_q24_8 as f32 / 25_600.0
    }
}

/// Returns `(temperature in 0.01 °C, t_fine)`
pub fn compensate_temperature(cal: &Bmp280Calibration, adc_t: i32) -> (i32, i32) {
    let t1 = cal.dig_t1 as i32;
    let t2 = cal.dig_t2 as i32;
    let t3 = cal.dig_t3 as i32;

    let var1 = ((adc_t >> 3) - (t1 << 1)).wrapping_mul(t2) >> 11;
    let d = (adc_t >> 4) - t1;
    let var2 = (d.wrapping_mul(d) >> 12).wrapping_mul(t3) >> 14;
    let t_fine = var1.wrapping_add(var2);
    let temperature = t_fine.wrapping_mul(5).wrapping_add(128) >> 8;
    (temperature, t_fine)
}

/// Pressure in Pa as Q24.8, or `DivideByZero` when the trimming data makes
/// the divisor degenerate
pub fn compensate_pressure(cal: &Bmp280Calibration, adc_p: i32, t_fine: i32) -> ComputeResult<u32> {
    let p1 = cal.dig_p1 as i64;
    let p2 = cal.dig_p2 as i64;
    let p3 = cal.dig_p3 as i64;
    let p4 = cal.dig_p4 as i64;
    let p5 = cal.dig_p5 as i64;
    let p6 = cal.dig_p6 as i64;
    let p7 = cal.dig_p7 as i64;
    let p8 = cal.dig_p8 as i64;
    let p9 = cal.dig_p9 as i64;

    let mut var1 = t_fine as i64 - 128_000;
    let mut var2 = var1.wrapping_mul(var1).wrapping_mul(p6);
    var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 17);
    var2 = var2.wrapping_add(p4 << 35);
    var1 = (var1.wrapping_mul(var1).wrapping_mul(p3) >> 8).wrapping_add(var1.wrapping_mul(p2) << 12);
    var1 = ((1i64 << 47).wrapping_add(var1)).wrapping_mul(p1) >> 33;

    if var1 == 0 {
        return Err(ComputeError::DivideByZero { context: "BMP280 pressure" });
    }

    let mut p = 1_048_576 - adc_p as i64;
    p = ((p << 31).wrapping_sub(var2)).wrapping_mul(3125).wrapping_div(var1);
    var1 = p9.wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
    var2 = p8.wrapping_mul(p) >> 19;
    p = (p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add(p7 << 4);
    Ok(p as u32)
}

/// Full compensation of one burst
pub fn compensate(cal: &Bmp280Calibration, raw: Bmp280Raw) -> ComputeResult<Bmp280Reading> {
    let (temperature_centi_c, t_fine) = compensate_temperature(cal, raw.adc_t);
    let pressure_q24_8 = compensate_pressure(cal, raw.adc_p, t_fine)?;
    Ok(Bmp280Reading { temperature_centi_c, pressure_q24_8 })
}
