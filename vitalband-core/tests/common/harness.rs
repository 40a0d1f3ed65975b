//! Test harness driving a monitor tick by tick on a simulated clock

use std::cell::RefCell;
use std::rc::Rc;

use vitalband_core::{
    compensation::Bmp280Calibration,
    constants::TICK_INTERVAL_MS,
    time::{FixedTime, Timestamp},
    SensorSet, TickReport, VitalsMonitor,
};

use super::generators::DATASHEET_CALIBRATION;
use super::scenarios::SensorScripts;
use super::{parse_message, Clock, FixedSpo2, RecordingSink, ScriptedSource, TestSensors};

pub type TestMonitor = VitalsMonitor<TestSensors, FixedSpo2, RecordingSink>;

/// Monitor plus the clock its sources are stamped with
pub struct Harness {
    clock: Clock,
    now: Timestamp,
    pub monitor: TestMonitor,
}

impl Harness {
    pub fn new(scripts: SensorScripts) -> Self {
        Self::with_calibration(scripts, DATASHEET_CALIBRATION)
    }

    pub fn with_calibration(scripts: SensorScripts, calibration: Bmp280Calibration) -> Self {
        let clock: Clock = Rc::new(RefCell::new(FixedTime::new(0)));
        let sensors = SensorSet {
            accelerometer: ScriptedSource::new(clock.clone(), scripts.accelerometer),
            gyroscope: ScriptedSource::new(clock.clone(), scripts.gyroscope),
            respiratory: ScriptedSource::new(clock.clone(), scripts.respiratory),
            pulse: ScriptedSource::new(clock.clone(), scripts.pulse),
            ppg: ScriptedSource::new(clock.clone(), scripts.ppg),
            thermometer: ScriptedSource::new(clock.clone(), scripts.thermometer),
            barometer: ScriptedSource::new(clock.clone(), scripts.barometer),
        };
        let monitor = VitalsMonitor::new(sensors, FixedSpo2::new(97), calibration, RecordingSink::default());
        Self { clock, now: 0, monitor }
    }

    /// Uptime the next tick will run at
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Run one tick at the current uptime, then advance the clock
    pub fn step(&mut self) -> TickReport {
        self.clock.borrow_mut().set(self.now);
        let report = self.monitor.tick(self.now);
        self.now += TICK_INTERVAL_MS;
        report
    }

    pub fn run(&mut self, ticks: u32) -> Vec<TickReport> {
        (0..ticks).map(|_| self.step()).collect()
    }

    pub fn run_seconds(&mut self, seconds: u32) -> Vec<TickReport> {
        self.run(seconds * 1000 / TICK_INTERVAL_MS)
    }

    pub fn messages(&self) -> &[String] {
        &self.monitor.sink().messages
    }

    /// Entries of the most recent message
    pub fn last_message(&self) -> Vec<(String, f32)> {
        let last = self.messages().last().expect("no message sent yet");
        parse_message(last)
    }
}
