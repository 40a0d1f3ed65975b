//! Sensor Scale Factors
//!
//! Register-to-unit conversions for the parts fitted to the band. Values are
//! taken from each part's datasheet for the range it is configured with at
//! boot.

// ===== SAADC (analog pulse and respiratory inputs) =====

/// Internal reference of the SAADC (mV).
pub const ADC_REFERENCE_MV: i32 = 600;

/// Inverse of the input gain (gain = 1/6), giving a 3.6 V full scale.
pub const ADC_GAIN_DIVISOR: i32 = 6;

/// Counts per full scale at 12-bit resolution.
pub const ADC_RESOLUTION: i32 = 4096;

// ===== MPU6050 =====

/// Accelerometer sensitivity at ±2 g full scale (LSB/g).
///
/// Source: MPU-6000/6050 product specification, table 6.2
pub const ACCEL_LSB_PER_G: f32 = 16384.0;

/// Gyroscope sensitivity at ±250 °/s full scale (LSB per °/s).
///
/// Source: MPU-6000/6050 product specification, table 6.1
pub const GYRO_LSB_PER_DPS: f32 = 131.0;

// ===== MLX90614 =====

/// Kelvin per LSB of the RAM temperature registers.
pub const MLX_KELVIN_PER_LSB: f32 = 0.02;

/// Offset between kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f32 = 273.15;

// ===== MAX30102 =====

/// Mask for the 18-bit ADC value in each 3-byte FIFO word.
pub const PPG_SAMPLE_MASK: u32 = 0x3_FFFF;

// ===== BMP280 =====

/// Length of the trimming-parameter block starting at register 0x88.
pub const BMP280_CALIBRATION_LEN: usize = 24;

/// Length of the pressure + temperature burst starting at register 0xF7.
pub const BMP280_BURST_LEN: usize = 6;
