//! MLX90614 RAM register to degrees Celsius

use crate::constants::sensors::{KELVIN_OFFSET, MLX_KELVIN_PER_LSB};

/// Temperature in °C from a raw RAM register value (0.02 K per LSB)
pub fn to_celsius(raw: u16) -> f32 {
    raw as f32 * MLX_KELVIN_PER_LSB - KELVIN_OFFSET
}

/// Assemble the little-endian register word returned by an SMBus read
pub fn register_from_le_bytes(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}
