//! Sensor Compensation
//!
//! Conversions from raw register contents to physical units. The BMP280
//! formulas are the datasheet's integer reference code and must stay
//! bit-exact, since the factory trimming parameters are only valid for that
//! exact sequence of shifts and multiplies.
//!
//! These functions are also what sample-source implementations use to turn
//! a bus burst into a [`Sample`](crate::sample::Sample) payload.

pub mod adc;
pub mod bmp280;
pub mod max30102;
pub mod mlx90614;
pub mod mpu6050;

pub use bmp280::{Bmp280Calibration, Bmp280Raw, Bmp280Reading};
