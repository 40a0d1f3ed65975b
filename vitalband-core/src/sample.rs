//! Sample types produced by the sensor collaborators
//!
//! A sample is read once per tick and is immutable afterwards; channels take
//! it by value.

use crate::time::Timestamp;

/// One reading from a sensor source, stamped when it was read
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sample<T> {
    /// Reading payload
    pub value: T,
    /// Uptime at which the reading was taken
    pub timestamp_ms: Timestamp,
}

impl<T> Sample<T> {
    pub const fn new(value: T, timestamp_ms: Timestamp) -> Self {
        Self { value, timestamp_ms }
    }
}

/// One MAX30102 FIFO entry: red and infrared photodiode counts (18-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PpgReading {
    pub red: u32,
    pub ir: u32,
}

/// Three-axis reading in physical units (g for the accelerometer,
/// degrees/second for the gyroscope)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_of_gravity_at_rest() {
        let v = Vector3::new(0.0, 0.0, 1.0);
        assert_eq!(v.magnitude(), 1.0);

        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.magnitude(), 5.0);
    }
}
