//! MPU6050 register bursts to physical units
//!
//! Both the accelerometer (0x3B) and gyroscope (0x43) bursts are three
//! big-endian `i16` words, X then Y then Z.

use crate::constants::sensors::{ACCEL_LSB_PER_G, GYRO_LSB_PER_DPS};
use crate::sample::Vector3;

/// Split a 6-byte burst into three signed words
pub fn axes_from_registers(bytes: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_be_bytes([bytes[0], bytes[1]]),
        i16::from_be_bytes([bytes[2], bytes[3]]),
        i16::from_be_bytes([bytes[4], bytes[5]]),
    ]
}

fn scaled(raw: [i16; 3], lsb_per_unit: f32) -> Vector3 {
    Vector3::new(
        raw[0] as f32 / lsb_per_unit,
        raw[1] as f32 / lsb_per_unit,
        raw[2] as f32 / lsb_per_unit,
    )
}

/// Acceleration in g at ±2 g full scale
pub fn accel_from_registers(bytes: &[u8; 6]) -> Vector3 {
    scaled(axes_from_registers(bytes), ACCEL_LSB_PER_G)
}

/// Angular rate in °/s at ±250 °/s full scale
pub fn gyro_from_registers(bytes: &[u8; 6]) -> Vector3 {
    scaled(axes_from_registers(bytes), GYRO_LSB_PER_DPS)
}
