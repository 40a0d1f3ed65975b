//! Common test utilities for the integration tests
//!
//! This module provides:
//! - Scripted sample sources stamped from a shared test clock
//! - A sink that records every outbound message
//! - A deterministic stand-in for the vendor SpO2 algorithm
//! - A minimal reader for the flat outbound JSON object

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vitalband_core::{
    errors::SensorResult,
    monitor::SensorSet,
    time::FixedTime,
    MessageSink, PpgReading, Sample, SampleSource, Spo2Algorithm, Spo2Estimate, TimeSource, Vector3,
};

pub mod generators;
pub mod harness;
pub mod scenarios;

/// Uptime shared between the harness and every scripted source
pub type Clock = Rc<RefCell<FixedTime>>;

/// Produces the value for the n-th read of a sensor
pub type Script<T> = Box<dyn FnMut(u32) -> SensorResult<T>>;

/// Sample source replaying a script, stamped with the shared clock
pub struct ScriptedSource<T> {
    clock: Clock,
    reads: u32,
    script: Script<T>,
}

impl<T> ScriptedSource<T> {
    pub fn new(clock: Clock, script: Script<T>) -> Self {
        Self { clock, reads: 0, script }
    }

    /// Number of times the monitor asked for a sample
    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl<T> SampleSource for ScriptedSource<T> {
    type Value = T;

    fn read_sample(&mut self) -> SensorResult<Sample<T>> {
        let n = self.reads;
        self.reads += 1;
        let now = self.clock.borrow().now();
        (self.script)(n).map(|value| Sample::new(value, now))
    }
}

/// The sensor set every integration test runs against
pub type TestSensors = SensorSet<
    ScriptedSource<Vector3>,
    ScriptedSource<Vector3>,
    ScriptedSource<i16>,
    ScriptedSource<i16>,
    ScriptedSource<PpgReading>,
    ScriptedSource<u16>,
    ScriptedSource<[u8; 6]>,
>;

/// Sink that keeps every message it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<String>,
}

impl MessageSink for RecordingSink {
    fn send(&mut self, payload: &str) {
        self.messages.push(payload.to_owned());
    }
}

/// SpO2 algorithm that always answers with the same saturation
#[derive(Debug, Clone)]
pub struct FixedSpo2 {
    pub percent: i32,
    pub runs: usize,
}

impl FixedSpo2 {
    pub fn new(percent: i32) -> Self {
        Self { percent, runs: 0 }
    }
}

impl Spo2Algorithm for FixedSpo2 {
    fn estimate_spo2(&mut self, ir: &[u32], red: &[u32]) -> Spo2Estimate {
        assert_eq!(ir.len(), red.len());
        self.runs += 1;
        Spo2Estimate { spo2_percent: self.percent, spo2_valid: true, heart_rate_bpm: 0, heart_rate_valid: false }
    }
}

/// Split a flat `{"Key":number,...}` message into its entries, keeping order
pub fn parse_message(message: &str) -> Vec<(String, f32)> {
    let body = message
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or_else(|| panic!("not a JSON object: {message}"));

    body.split(',')
        .map(|entry| {
            let (key, value) = entry.split_once(':').unwrap_or_else(|| panic!("bad entry {entry}"));
            let key = key.trim_matches('"').to_owned();
            let value = value.parse::<f32>().unwrap_or_else(|_| panic!("bad number {value}"));
            (key, value)
        })
        .collect()
}

/// Look up one key of a parsed message
pub fn value_of(entries: &[(String, f32)], key: &str) -> Option<f32> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
}

/// Assert two floats agree within `tolerance`
pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
