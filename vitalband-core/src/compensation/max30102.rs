//! MAX30102 FIFO unpacking

use crate::constants::sensors::PPG_SAMPLE_MASK;
use crate::sample::PpgReading;

fn word(bytes: &[u8]) -> u32 {
    ((bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32) & PPG_SAMPLE_MASK
}

/// Unpack one 6-byte FIFO entry (red first, then IR) in SpO2 mode
pub fn reading_from_fifo(bytes: &[u8; 6]) -> PpgReading {
    PpgReading { red: word(&bytes[..3]), ir: word(&bytes[3..]) }
}
