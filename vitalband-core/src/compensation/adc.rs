//! SAADC counts to millivolts

use crate::constants::sensors::{ADC_GAIN_DIVISOR, ADC_REFERENCE_MV, ADC_RESOLUTION};

/// Convert a raw 12-bit conversion result to millivolts, truncating
/// toward zero. Negative counts (differential noise around ground) map to
/// negative millivolts.
pub fn to_millivolts(raw: i16) -> i32 {
    raw as i32 * ADC_REFERENCE_MV * ADC_GAIN_DIVISOR / ADC_RESOLUTION
}
