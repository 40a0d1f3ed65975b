//! Simulated Wearable Example
//!
//! Runs the complete vitals monitor against synthetic sensors on a
//! simulated millisecond clock and prints every message that would go out
//! over the radio.
//!
//! ## What You'll Learn
//!
//! - Wiring sample sources into a `SensorSet`
//! - Driving the monitor with `poll` and a `TimeSource`
//! - Reading the per-tick report and the channel outputs
//! - Enabling the diagnostics message
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example simulated_wearable
//! ```

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use vitalband_core::{
    compensation::{max30102, mlx90614, mpu6050, Bmp280Calibration},
    errors::SensorResult,
    time::MonotonicTime,
    ChannelId, MessageSink, PpgReading, ReportConfig, Sample, SampleSource, SensorError, SensorSet, Spo2Algorithm,
    Spo2Estimate, TimeSource, Vector3, VitalsMonitor,
};

type Clock = Rc<RefCell<MonotonicTime>>;

/// Sensor driven by a waveform function of its read index
struct Synthetic<T> {
    clock: Clock,
    reads: u32,
    wave: fn(u32) -> SensorResult<T>,
}

impl<T> Synthetic<T> {
    fn new(clock: &Clock, wave: fn(u32) -> SensorResult<T>) -> Self {
        Self { clock: clock.clone(), reads: 0, wave }
    }
}

impl<T> SampleSource for Synthetic<T> {
    type Value = T;

    fn read_sample(&mut self) -> SensorResult<Sample<T>> {
        let n = self.reads;
        self.reads += 1;
        let now = self.clock.borrow().now();
        (self.wave)(n).map(|value| Sample::new(value, now))
    }
}

/// Prints each message with the uptime it was sent at
struct ConsoleRadio {
    clock: Clock,
    sent: usize,
}

impl MessageSink for ConsoleRadio {
    fn send(&mut self, payload: &str) {
        self.sent += 1;
        println!("[{:>6} ms] {}", self.clock.borrow().now(), payload);
    }
}

/// Ratio-of-ratios estimate, good enough for a demo
struct RatioSpo2;

impl Spo2Algorithm for RatioSpo2 {
    fn estimate_spo2(&mut self, ir: &[u32], red: &[u32]) -> Spo2Estimate {
        let ac_dc = |buf: &[u32]| {
            let max = buf.iter().copied().max().unwrap_or(0) as f32;
            let min = buf.iter().copied().min().unwrap_or(0) as f32;
            let mean = buf.iter().map(|&v| v as f32).sum::<f32>() / buf.len().max(1) as f32;
            if mean > 0.0 { (max - min) / mean } else { 0.0 }
        };
        let (ir_ratio, red_ratio) = (ac_dc(ir), ac_dc(red));
        if ir_ratio <= 0.0 {
            return Spo2Estimate::default();
        }
        let r = red_ratio / ir_ratio;
        Spo2Estimate {
            spo2_percent: (110.0 - 25.0 * r).round() as i32,
            spo2_valid: true,
            heart_rate_bpm: 0,
            heart_rate_valid: false,
        }
    }
}

/// Big-endian 18-bit FIFO word
fn fifo_word(value: u32) -> [u8; 3] {
    let [_, hi, mid, lo] = value.to_be_bytes();
    [hi, mid, lo]
}

/// Three big-endian axis words as the MPU6050 returns them
fn axis_burst(x: f32, y: f32, z: f32, lsb_per_unit: f32) -> [u8; 6] {
    let mut burst = [0u8; 6];
    for (chunk, v) in burst.chunks_exact_mut(2).zip([x, y, z]) {
        chunk.copy_from_slice(&((v * lsb_per_unit) as i16).to_be_bytes());
    }
    burst
}

/// 72 BPM: 83 PPG samples per beat at 100 Hz, unpacked from FIFO bytes
fn ppg(n: u32) -> SensorResult<PpgReading> {
    let phase = 2.0 * PI * n as f32 / 83.0;
    let red = fifo_word((90_000.0 + 240.0 * phase.sin()) as u32);
    let ir = fifo_word((120_000.0 + 600.0 * phase.sin()) as u32);
    let entry = [red[0], red[1], red[2], ir[0], ir[1], ir[2]];
    Ok(max30102::reading_from_fifo(&entry))
}

/// Heel strike every 5 reads (500 ms)
fn accelerometer(n: u32) -> SensorResult<Vector3> {
    let z = if n % 5 == 2 { 1.4 } else { 1.0 };
    Ok(mpu6050::accel_from_registers(&axis_burst(0.02, -0.01, z, 16_384.0)))
}

/// Arm swing, faster than the rotation threshold every second
fn gyroscope(n: u32) -> SensorResult<Vector3> {
    let y = if n % 10 < 5 { 10.0 } else { 45.0 };
    Ok(mpu6050::gyro_from_registers(&axis_burst(0.0, y, 0.0, 131.0)))
}

/// 4 s breathing cycle on the chest band
fn respiratory(n: u32) -> SensorResult<i16> {
    let phase = (n % 40) as i16;
    let level = if phase < 20 { phase } else { 40 - phase };
    Ok(1000 + level * 40)
}

fn pulse(n: u32) -> SensorResult<i16> {
    Ok(match n % 10 {
        1 => 2600,
        2 => 3400,
        3 => 3000,
        _ => 1700,
    })
}

/// Thermometer drops off the bus for a few seconds mid-run
fn thermometer(n: u32) -> SensorResult<u16> {
    if (200..250).contains(&n) {
        Err(SensorError::Bus { code: -110 })
    } else {
        // 36.35 °C, little-endian SMBus word
        Ok(mlx90614::register_from_le_bytes([0x73, 0x3C]))
    }
}

fn barometer(_n: u32) -> SensorResult<[u8; 6]> {
    Ok([0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00])
}

fn main() {
    println!("VitalBand Simulated Wearable");
    println!("============================\n");

    let clock: Clock = Rc::new(RefCell::new(MonotonicTime::new()));

    let sensors = SensorSet {
        accelerometer: Synthetic::new(&clock, accelerometer),
        gyroscope: Synthetic::new(&clock, gyroscope),
        respiratory: Synthetic::new(&clock, respiratory),
        pulse: Synthetic::new(&clock, pulse),
        ppg: Synthetic::new(&clock, ppg),
        thermometer: Synthetic::new(&clock, thermometer),
        barometer: Synthetic::new(&clock, barometer),
    };

    // Trimming values from the BMP280 datasheet example
    let calibration = Bmp280Calibration {
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

    let radio = ConsoleRadio { clock: clock.clone(), sent: 0 };
    // Raw readings go out too, after each vitals message
    let config = ReportConfig { diagnostics: true };
    let mut monitor = VitalsMonitor::with_report_config(sensors, RatioSpo2, calibration, radio, config);

    let mut read_failures = 0;
    let run_ms = 65_000;
    while clock.borrow().now() < run_ms {
        let now = clock.borrow().now();
        match monitor.poll(now) {
            Ok(report) => read_failures += report.read_failures.len(),
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(never)) => match never {},
        }
        clock.borrow_mut().advance(1);
    }

    println!("\nAfter {} s:", run_ms / 1000);
    for id in ChannelId::ALL {
        let out = monitor.output(id);
        if out.valid {
            println!("  {:<16} {:>8.2}", id.name(), out.rate);
        } else {
            println!("  {:<16} {:>8}", id.name(), "-");
        }
    }
    println!("  ticks run:       {}", monitor.ticks());
    println!("  messages sent:   {}", monitor.sink().sent);
    println!("  failed reads:    {}", read_failures);
}
