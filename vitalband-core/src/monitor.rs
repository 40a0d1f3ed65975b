//! Vitals Monitor
//!
//! ## Overview
//!
//! `VitalsMonitor` is the control loop: it owns every channel, the
//! aggregator and the scheduler, and on each tick polls the sensors in
//! registration order, feeds the channels and closes the report cycle.
//!
//! ```text
//!            every tick                every 10th tick                 every 100th tick
//!  ┌──────────────────────────┐  ┌─────────────────────────────┐  ┌──────────────────────┐
//!  │ PPG ─▶ HeartRate, SpO2   │  │ accel, gyro, resp, pulse,   │  │ valid outputs ─▶     │
//!  │                          │  │ skin temperature, pressure  │  │ aggregator ─▶ sink   │
//!  └──────────────────────────┘  └─────────────────────────────┘  └──────────────────────┘
//! ```
//!
//! ## Failure Policy
//!
//! Nothing that happens inside a tick can stop the loop:
//!
//! - a failed read skips that channel for this tick and is recorded in the
//!   [`TickReport`]
//! - a compensation formula that hits a degenerate divisor skips the update
//! - an implausible rate leaves the previous output in place
//! - an entry the aggregator cannot hold is dropped
//!
//! A channel that fails forever simply keeps reporting its last value (or
//! nothing, if it never produced one).
//!
//! ## Diagnostics
//!
//! With [`ReportConfig::diagnostics`] set, each report cycle sends a second
//! message right after the vitals one, carrying the raw readings behind the
//! rates (see [`Diagnostic`]). A reading is included once its channel has
//! processed at least one sample.

use core::convert::Infallible;

use crate::aggregator::{Aggregator, Value};
use crate::channels::motion::{RotationChannel, StepChannel};
use crate::channels::{
    BarometerChannel, ChannelEstimator, ChannelId, HeartRateChannel, PulseChannel, RespiratoryChannel,
    Spo2Channel, TemperatureChannel,
};
use crate::compensation::Bmp280Calibration;
use crate::constants::sensors::BMP280_BURST_LEN;
use crate::constants::{AGGREGATOR_MAX_ENTRIES, TICK_INTERVAL_MS};
use crate::errors::{SensorError, SensorResult};
use crate::logging::{log_debug, log_info, log_warn};
use crate::plausibility::ChannelOutput;
use crate::sample::{PpgReading, Sample, Vector3};
use crate::scheduler::{Cadence, Scheduler};
use crate::time::Timestamp;
use crate::traits::{MessageSink, SampleSource, Spo2Algorithm};

/// All sensors of the band, one read method per physical source
///
/// Implemented for [`SensorSet`], which wraps one [`SampleSource`] per
/// sensor; firmware with a single driver object can implement it directly.
pub trait SensorSuite {
    /// Acceleration in g
    fn accelerometer(&mut self) -> SensorResult<Sample<Vector3>>;
    /// Angular rate in °/s
    fn gyroscope(&mut self) -> SensorResult<Sample<Vector3>>;
    /// Respiratory band, raw SAADC counts
    fn respiratory(&mut self) -> SensorResult<Sample<i16>>;
    /// Pulse sensor, raw SAADC counts
    fn pulse(&mut self) -> SensorResult<Sample<i16>>;
    /// One MAX30102 FIFO entry
    fn ppg(&mut self) -> SensorResult<Sample<PpgReading>>;
    /// MLX90614 object temperature register
    fn skin_temperature(&mut self) -> SensorResult<Sample<u16>>;
    /// BMP280 pressure/temperature burst
    fn barometer(&mut self) -> SensorResult<Sample<[u8; BMP280_BURST_LEN]>>;
}

/// One sample source per sensor
#[derive(Debug, Clone)]
pub struct SensorSet<A, G, R, P, H, T, B> {
    pub accelerometer: A,
    pub gyroscope: G,
    pub respiratory: R,
    pub pulse: P,
    pub ppg: H,
    pub thermometer: T,
    pub barometer: B,
}

impl<A, G, R, P, H, T, B> SensorSuite for SensorSet<A, G, R, P, H, T, B>
where
    A: SampleSource<Value = Vector3>,
    G: SampleSource<Value = Vector3>,
    R: SampleSource<Value = i16>,
    P: SampleSource<Value = i16>,
    H: SampleSource<Value = PpgReading>,
    T: SampleSource<Value = u16>,
    B: SampleSource<Value = [u8; BMP280_BURST_LEN]>,
{
    fn accelerometer(&mut self) -> SensorResult<Sample<Vector3>> {
        self.accelerometer.read_sample()
    }

    fn gyroscope(&mut self) -> SensorResult<Sample<Vector3>> {
        self.gyroscope.read_sample()
    }

    fn respiratory(&mut self) -> SensorResult<Sample<i16>> {
        self.respiratory.read_sample()
    }

    fn pulse(&mut self) -> SensorResult<Sample<i16>> {
        self.pulse.read_sample()
    }

    fn ppg(&mut self) -> SensorResult<Sample<PpgReading>> {
        self.ppg.read_sample()
    }

    fn skin_temperature(&mut self) -> SensorResult<Sample<u16>> {
        self.thermometer.read_sample()
    }

    fn barometer(&mut self) -> SensorResult<Sample<[u8; BMP280_BURST_LEN]>> {
        self.barometer.read_sample()
    }
}

/// Small bit set of channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelSet(u8);

const _: () = assert!(ChannelId::COUNT <= u8::BITS as usize);

impl ChannelSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, id: ChannelId) {
        self.0 |= 1 << id.index();
    }

    pub fn contains(&self, id: ChannelId) -> bool {
        self.0 & (1 << id.index()) != 0
    }

    pub fn union_with(&mut self, other: ChannelSet) {
        self.0 |= other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in registration order
    pub fn iter(&self) -> impl Iterator<Item = ChannelId> + '_ {
        ChannelId::ALL.into_iter().filter(move |id| self.contains(*id))
    }
}

/// Optional report content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportConfig {
    /// Follow every vitals message with a diagnostics message
    pub diagnostics: bool,
}

/// Raw reading sent in the diagnostics message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Acceleration magnitude, milli-g
    AccelerometerMilliG,
    /// Angular-rate magnitude, milli-degrees/s
    GyroscopeMilliDps,
    /// Respiratory band input, mV
    RespiratoryMillivolts,
    /// Pulse sensor input, mV
    PulseMillivolts,
    /// BMP280 die temperature, °C
    BoardTemperature,
}

impl Diagnostic {
    /// Order of the keys in the diagnostics message
    pub const ALL: [Diagnostic; 5] = [
        Diagnostic::AccelerometerMilliG,
        Diagnostic::GyroscopeMilliDps,
        Diagnostic::RespiratoryMillivolts,
        Diagnostic::PulseMillivolts,
        Diagnostic::BoardTemperature,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Diagnostic::AccelerometerMilliG => "AccelerometerMilliG",
            Diagnostic::GyroscopeMilliDps => "GyroscopeMilliDps",
            Diagnostic::RespiratoryMillivolts => "RespiratoryMillivolts",
            Diagnostic::PulseMillivolts => "PulseMillivolts",
            Diagnostic::BoardTemperature => "BoardTemperature",
        }
    }

    /// Channel whose input the reading comes from
    pub const fn source(self) -> ChannelId {
        match self {
            Diagnostic::AccelerometerMilliG => ChannelId::Accelerometer,
            Diagnostic::GyroscopeMilliDps => ChannelId::Gyroscope,
            Diagnostic::RespiratoryMillivolts => ChannelId::RespiratoryRate,
            Diagnostic::PulseMillivolts => ChannelId::PulseSensor,
            Diagnostic::BoardTemperature => ChannelId::Pressure,
        }
    }
}

const _: () = assert!(Diagnostic::ALL.len() <= AGGREGATOR_MAX_ENTRIES);

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Index of the tick since start (or since the last resume)
    pub tick: u32,
    /// Uptime the tick was run at
    pub at: Timestamp,
    /// Whether the tick ran at all (collection not paused)
    pub ran: bool,
    /// Channels that processed a sample
    pub updated: ChannelSet,
    /// Channels whose sensor read failed
    pub read_failures: ChannelSet,
    /// Channels that read a sample but could not compute from it
    pub compute_failures: ChannelSet,
    /// A message was handed to the sink
    pub message_sent: bool,
    /// A diagnostics message followed it
    pub diagnostics_sent: bool,
}

/// The band's control loop
pub struct VitalsMonitor<S: SensorSuite, A: Spo2Algorithm, K: MessageSink> {
    sensors: S,
    steps: StepChannel,
    rotation: RotationChannel,
    respiratory: RespiratoryChannel,
    pulse: PulseChannel,
    heart_rate: HeartRateChannel,
    spo2: Spo2Channel<A>,
    temperature: TemperatureChannel,
    barometer: BarometerChannel,
    aggregator: Aggregator<K>,
    scheduler: Scheduler,
    ticks: u32,
    collecting: bool,
    config: ReportConfig,
    /// Channels that have processed at least one sample
    sampled: ChannelSet,
}

/// Feed one read result into one channel, recording the outcome
fn feed<C: ChannelEstimator>(channel: &mut C, read: SensorResult<Sample<C::Input>>, report: &mut TickReport) {
    let id = channel.id();
    match read {
        Ok(sample) => match channel.update(sample) {
            Ok(()) => report.updated.insert(id),
            Err(err) => {
                log_warn!("{}: update skipped: {}", id.name(), err);
                report.compute_failures.insert(id);
            }
        },
        Err(SensorError::NotReady) => {
            log_debug!("{}: no new sample", id.name());
        }
        Err(err) => {
            log_warn!("{}: sensor read failed: {}", id.name(), err);
            report.read_failures.insert(id);
        }
    }
}

impl<S: SensorSuite, A: Spo2Algorithm, K: MessageSink> VitalsMonitor<S, A, K> {
    pub fn new(sensors: S, spo2_algorithm: A, calibration: Bmp280Calibration, sink: K) -> Self {
        Self::with_report_config(sensors, spo2_algorithm, calibration, sink, ReportConfig::default())
    }

    pub fn with_report_config(
        sensors: S,
        spo2_algorithm: A,
        calibration: Bmp280Calibration,
        sink: K,
        config: ReportConfig,
    ) -> Self {
        log_info!("vitals monitor started, {} channels", ChannelId::COUNT);
        Self {
            sensors,
            steps: StepChannel::steps(),
            rotation: RotationChannel::rotation(),
            respiratory: RespiratoryChannel::new(),
            pulse: PulseChannel::new(),
            heart_rate: HeartRateChannel::new(),
            spo2: Spo2Channel::new(spo2_algorithm),
            temperature: TemperatureChannel::new(),
            barometer: BarometerChannel::new(calibration),
            aggregator: Aggregator::new(sink, ChannelId::COUNT),
            scheduler: Scheduler::new(TICK_INTERVAL_MS),
            ticks: 0,
            collecting: true,
            config,
            sampled: ChannelSet::empty(),
        }
    }

    /// Run the next tick if the scheduler says it is due
    pub fn poll(&mut self, now: Timestamp) -> nb::Result<TickReport, Infallible> {
        self.scheduler.poll(now)?;
        Ok(self.tick(now))
    }

    /// Run one tick unconditionally
    pub fn tick(&mut self, now: Timestamp) -> TickReport {
        let mut report = TickReport { tick: self.ticks, at: now, ..TickReport::default() };
        if !self.collecting {
            return report;
        }
        report.ran = true;

        let cadence = Cadence::for_tick(self.ticks);

        if cadence.slow_channels {
            feed(&mut self.steps, self.sensors.accelerometer(), &mut report);
            feed(&mut self.rotation, self.sensors.gyroscope(), &mut report);
            feed(&mut self.respiratory, self.sensors.respiratory(), &mut report);
            feed(&mut self.pulse, self.sensors.pulse(), &mut report);
        }

        let ppg = self.sensors.ppg();
        feed(&mut self.heart_rate, ppg, &mut report);
        feed(&mut self.spo2, ppg, &mut report);

        if cadence.slow_channels {
            feed(&mut self.temperature, self.sensors.skin_temperature(), &mut report);
            feed(&mut self.barometer, self.sensors.barometer(), &mut report);
        }

        self.sampled.union_with(report.updated);

        if cadence.report {
            report.message_sent = self.close_report_cycle();
            if self.config.diagnostics {
                report.diagnostics_sent = self.send_diagnostics();
            }
        }

        self.ticks = self.ticks.wrapping_add(1);
        report
    }

    /// Add every valid output in registration order, then make sure the
    /// cycle is sent even if not every channel had a value
    fn close_report_cycle(&mut self) -> bool {
        let sent_before = self.aggregator.messages_sent();

        for id in ChannelId::ALL {
            if let Some(value) = self.reported_value(id) {
                if let Err(err) = self.aggregator.add(id.name(), value) {
                    log_warn!("{}: not reported: {}", id.name(), err);
                }
            }
        }
        self.aggregator.finalize();

        self.aggregator.messages_sent() != sent_before
    }

    fn send_diagnostics(&mut self) -> bool {
        for diagnostic in Diagnostic::ALL {
            if let Some(value) = self.diagnostic_value(diagnostic) {
                if let Err(err) = self.aggregator.add(diagnostic.key(), value) {
                    log_warn!("{}: not reported: {}", diagnostic.key(), err);
                }
            }
        }
        self.aggregator.finalize()
    }

    /// Latest raw reading, once its channel has seen a sample
    pub fn diagnostic_value(&self, diagnostic: Diagnostic) -> Option<Value> {
        if !self.sampled.contains(diagnostic.source()) {
            return None;
        }
        match diagnostic {
            Diagnostic::AccelerometerMilliG => Some(Value::Integer(self.steps.last_magnitude())),
            Diagnostic::GyroscopeMilliDps => Some(Value::Integer(self.rotation.last_magnitude())),
            Diagnostic::RespiratoryMillivolts => Some(Value::Integer(self.respiratory.millivolts())),
            Diagnostic::PulseMillivolts => Some(Value::Integer(self.pulse.millivolts())),
            Diagnostic::BoardTemperature => self
                .barometer
                .last_reading()
                .map(|reading| Value::Decimal(reading.temperature_c())),
        }
    }

    fn reported_value(&self, id: ChannelId) -> Option<Value> {
        match id {
            ChannelId::Accelerometer => self.steps.reported_value(),
            ChannelId::Gyroscope => self.rotation.reported_value(),
            ChannelId::RespiratoryRate => self.respiratory.reported_value(),
            ChannelId::PulseSensor => self.pulse.reported_value(),
            ChannelId::HeartRate => self.heart_rate.reported_value(),
            ChannelId::SpO2 => self.spo2.reported_value(),
            ChannelId::SkinTemperature => self.temperature.reported_value(),
            ChannelId::Pressure => self.barometer.reported_value(),
        }
    }

    /// Current visible output of a channel
    pub fn output(&self, id: ChannelId) -> ChannelOutput {
        match id {
            ChannelId::Accelerometer => self.steps.output(),
            ChannelId::Gyroscope => self.rotation.output(),
            ChannelId::RespiratoryRate => self.respiratory.output(),
            ChannelId::PulseSensor => self.pulse.output(),
            ChannelId::HeartRate => self.heart_rate.output(),
            ChannelId::SpO2 => self.spo2.output(),
            ChannelId::SkinTemperature => self.temperature.output(),
            ChannelId::Pressure => self.barometer.output(),
        }
    }

    /// Pause or resume data collection. Resuming restarts the tick count
    /// so the next report cycle is a full one.
    pub fn set_collecting(&mut self, collecting: bool) {
        if collecting && !self.collecting {
            self.ticks = 0;
            self.aggregator.reset();
        }
        if collecting != self.collecting {
            log_info!("data collection {}", if collecting { "resumed" } else { "paused" });
        }
        self.collecting = collecting;
    }

    pub fn report_config(&self) -> ReportConfig {
        self.config
    }

    pub fn set_report_config(&mut self, config: ReportConfig) {
        self.config = config;
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting
    }

    /// Ticks run since start or the last resume
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn aggregator(&self) -> &Aggregator<K> {
        &self.aggregator
    }

    pub fn sink(&self) -> &K {
        self.aggregator.sink()
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    pub fn heart_rate(&self) -> &HeartRateChannel {
        &self.heart_rate
    }

    pub fn spo2(&self) -> &Spo2Channel<A> {
        &self.spo2
    }

    pub fn pulse(&self) -> &PulseChannel {
        &self.pulse
    }

    pub fn respiratory(&self) -> &RespiratoryChannel {
        &self.respiratory
    }

    pub fn steps(&self) -> &StepChannel {
        &self.steps
    }

    pub fn rotation(&self) -> &RotationChannel {
        &self.rotation
    }

    pub fn barometer(&self) -> &BarometerChannel {
        &self.barometer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_set_membership() {
        let mut set = ChannelSet::empty();
        assert!(set.is_empty());
        set.insert(ChannelId::SpO2);
        set.insert(ChannelId::Accelerometer);
        set.insert(ChannelId::SpO2);
        assert_eq!(set.len(), 2);
        assert!(set.contains(ChannelId::SpO2));
        assert!(!set.contains(ChannelId::Pressure));
        let members: Vec<ChannelId> = set.iter().collect();
        assert_eq!(members, [ChannelId::Accelerometer, ChannelId::SpO2]);
    }

    #[test]
    fn channel_set_union() {
        let mut seen = ChannelSet::empty();
        let mut tick = ChannelSet::empty();
        tick.insert(ChannelId::HeartRate);
        seen.union_with(tick);
        tick.insert(ChannelId::Pressure);
        seen.union_with(tick);
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(ChannelId::Pressure));
    }

    #[test]
    fn diagnostic_keys_are_distinct_from_channels() {
        for diagnostic in Diagnostic::ALL {
            assert!(ChannelId::ALL.iter().all(|id| id.name() != diagnostic.key()));
        }
        assert_eq!(Diagnostic::BoardTemperature.source(), ChannelId::Pressure);
    }
}
