//! Integration tests for the vitals monitor
//!
//! Drives the full control loop with scripted sensors on a simulated 10 ms
//! clock and checks what reaches the radio.

mod common;

use proptest::prelude::*;
use vitalband_core::{
    compensation::adc, errors::SensorError, ChannelId, ComputeError, Diagnostic, PpgReading, ReportConfig,
    SensorSuite, Vector3,
};

use common::{
    assert_close,
    generators::{
        breathing_counts, resting_accel, walking_accel, BAROMETER_BURST, DATASHEET_CALIBRATION,
        DATASHEET_PRESSURE_HPA,
    },
    harness::Harness,
    parse_message,
    scenarios::{script, SensorScripts},
    value_of, Script,
};

fn failing<T: 'static>() -> Script<T> {
    script(|_| Err(SensorError::Bus { code: -5 }))
}

fn in_registration_order(entries: &[(String, f32)]) -> bool {
    let positions: Vec<usize> = entries
        .iter()
        .map(|(key, _)| {
            ChannelId::ALL
                .iter()
                .position(|id| id.name() == key.as_str())
                .unwrap_or_else(|| panic!("unknown key {key}"))
        })
        .collect();
    positions.windows(2).all(|pair| pair[0] < pair[1])
}

#[test]
fn full_run_reports_every_vital_in_registration_order() {
    let mut band = Harness::new(SensorScripts::walking());
    band.run_seconds(70);

    assert_eq!(band.messages().len(), 70);

    let entries = band.last_message();
    let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
    let expected: Vec<&str> = ChannelId::ALL.iter().map(|id| id.name()).collect();
    assert_eq!(keys, expected);

    assert_eq!(value_of(&entries, "Accelerometer"), Some(120.0));
    assert_eq!(value_of(&entries, "Gyroscope"), Some(0.0));
    assert_close(value_of(&entries, "RespiratoryRate").unwrap(), 15.0, 1.0);
    assert_eq!(value_of(&entries, "PulseSensor"), Some(60.0));
    assert_close(value_of(&entries, "HeartRate").unwrap(), 75.0, 1.0);
    assert_eq!(value_of(&entries, "SpO2"), Some(97.0));
    assert_close(value_of(&entries, "SkinTemperature").unwrap(), 36.35, 0.01);
    assert_close(value_of(&entries, "Pressure").unwrap(), DATASHEET_PRESSURE_HPA, 0.01);
}

#[test]
fn integer_channels_are_sent_without_fraction() {
    let mut band = Harness::new(SensorScripts::resting());
    band.run_seconds(2);

    let last = band.messages().last().unwrap();
    assert!(last.starts_with("{\"Accelerometer\":0,\"Gyroscope\":0,"), "{last}");
    assert!(last.contains("\"SpO2\":97,"), "{last}");
    assert!(last.contains("\"SkinTemperature\":36.35,"), "{last}");
    assert!(last.ends_with("\"Pressure\":1006.53}"), "{last}");
}

#[test]
fn first_report_closes_after_one_second() {
    let mut band = Harness::new(SensorScripts::resting());
    let reports = band.run(100);

    assert!(reports[..99].iter().all(|r| !r.message_sent));
    assert!(reports[99].message_sent);
    assert_eq!(band.messages().len(), 1);

    let entries = band.last_message();
    assert!(in_registration_order(&entries));
    for key in ["Accelerometer", "Gyroscope", "SpO2", "SkinTemperature", "Pressure"] {
        assert!(value_of(&entries, key).is_some(), "{key} missing from {entries:?}");
    }
    assert_eq!(value_of(&entries, "SpO2"), Some(97.0));
}

#[test]
fn diagnostics_follow_the_vitals_message() {
    let mut band = Harness::new(SensorScripts::resting());
    band.monitor.set_report_config(ReportConfig { diagnostics: true });
    let reports = band.run(100);

    assert!(reports[99].message_sent);
    assert!(reports[99].diagnostics_sent);
    assert_eq!(band.messages().len(), 2);
    assert!(band.messages()[0].starts_with("{\"Accelerometer\":"));

    // Last slow read was the tenth (index 9)
    let respiratory_mv = adc::to_millivolts(breathing_counts(9));
    assert_eq!(
        band.messages()[1],
        format!(
            "{{\"AccelerometerMilliG\":1000,\"GyroscopeMilliDps\":0,\"RespiratoryMillivolts\":{respiratory_mv},\
             \"PulseMillivolts\":1494,\"BoardTemperature\":25.08}}"
        )
    );

    let keys: Vec<String> = band.last_message().into_iter().map(|(k, _)| k).collect();
    let expected: Vec<&str> = Diagnostic::ALL.iter().map(|d| d.key()).collect();
    assert_eq!(keys, expected);
}

#[test]
fn diagnostics_skip_sensors_without_samples() {
    let scripts = SensorScripts { barometer: failing(), pulse: failing(), ..SensorScripts::resting() };
    let mut band = Harness::new(scripts);
    band.monitor.set_report_config(ReportConfig { diagnostics: true });
    band.run_seconds(2);

    assert_eq!(band.messages().len(), 4);
    let entries = band.last_message();
    assert_eq!(value_of(&entries, "BoardTemperature"), None);
    assert_eq!(value_of(&entries, "PulseMillivolts"), None);
    assert_eq!(value_of(&entries, "AccelerometerMilliG"), Some(1000.0));
    assert_eq!(band.monitor.diagnostic_value(Diagnostic::PulseMillivolts), None);
}

#[test]
fn slow_channels_run_every_tenth_tick() {
    let mut band = Harness::new(SensorScripts::resting());
    let reports = band.run(100);

    assert_eq!(reports[0].updated.len(), ChannelId::COUNT);
    let fast: Vec<ChannelId> = reports[1].updated.iter().collect();
    assert_eq!(fast, [ChannelId::HeartRate, ChannelId::SpO2]);
    assert_eq!(reports[10].updated.len(), ChannelId::COUNT);

    let sensors = band.monitor.sensors();
    assert_eq!(sensors.ppg.reads(), 100);
    assert_eq!(sensors.accelerometer.reads(), 10);
    assert_eq!(sensors.barometer.reads(), 10);
    assert_eq!(band.monitor.spo2().algorithm().runs, 1);
}

#[test]
fn failed_read_keeps_previous_value() {
    let scripts = SensorScripts {
        barometer: script(|n| match n {
            0..=2 => Ok(BAROMETER_BURST),
            _ => Err(SensorError::Bus { code: -5 }),
        }),
        ..SensorScripts::resting()
    };
    let mut band = Harness::new(scripts);
    let reports = band.run_seconds(5);

    assert!(reports[20].updated.contains(ChannelId::Pressure));
    assert!(reports[30].read_failures.contains(ChannelId::Pressure));
    assert!(!reports[30].updated.contains(ChannelId::Pressure));
    // Other channels keep running on the same tick
    assert!(reports[30].updated.contains(ChannelId::SkinTemperature));

    assert_eq!(band.messages().len(), 5);
    let entries = band.last_message();
    assert_close(value_of(&entries, "Pressure").unwrap(), DATASHEET_PRESSURE_HPA, 0.01);
    assert!(band.monitor.output(ChannelId::Pressure).valid);
}

#[test]
fn sensor_that_never_answers_is_left_out() {
    let scripts = SensorScripts { thermometer: failing(), ..SensorScripts::resting() };
    let mut band = Harness::new(scripts);
    let reports = band.run_seconds(3);

    assert!(reports[0].read_failures.contains(ChannelId::SkinTemperature));
    assert_eq!(reports[0].read_failures.len(), 1);
    for message in band.messages() {
        let entries = parse_message(message);
        assert_eq!(value_of(&entries, "SkinTemperature"), None);
        assert!(value_of(&entries, "Pressure").is_some());
    }
}

#[test]
fn not_ready_is_not_a_failure() {
    let scripts = SensorScripts { thermometer: script(|_| Err(SensorError::NotReady)), ..SensorScripts::resting() };
    let mut band = Harness::new(scripts);
    let report = band.step();

    assert!(report.read_failures.is_empty());
    assert!(!report.updated.contains(ChannelId::SkinTemperature));
    assert!(report.updated.contains(ChannelId::Pressure));
}

#[test]
fn steps_fall_to_zero_when_wearer_stops() {
    let scripts = SensorScripts {
        accelerometer: script(|n| Ok(if n < 200 { walking_accel(n) } else { resting_accel(n) })),
        ..SensorScripts::resting()
    };
    let mut band = Harness::new(scripts);

    band.run_seconds(20);
    assert_eq!(band.monitor.output(ChannelId::Accelerometer).rate, 120.0);
    assert_eq!(value_of(&band.last_message(), "Accelerometer"), Some(120.0));

    band.run_seconds(15);
    let out = band.monitor.output(ChannelId::Accelerometer);
    assert!(out.valid);
    assert_eq!(out.rate, 0.0);
    assert_eq!(value_of(&band.last_message(), "Accelerometer"), Some(0.0));
}

#[test]
fn degenerate_calibration_is_a_compute_failure() {
    let calibration = vitalband_core::compensation::Bmp280Calibration { dig_p1: 0, ..DATASHEET_CALIBRATION };
    let mut band = Harness::with_calibration(SensorScripts::resting(), calibration);
    let reports = band.run_seconds(2);

    assert!(reports[0].compute_failures.contains(ChannelId::Pressure));
    assert!(reports[0].read_failures.is_empty());
    assert!(!band.monitor.output(ChannelId::Pressure).valid);
    assert_eq!(band.messages().len(), 2);
    for message in band.messages() {
        assert_eq!(value_of(&parse_message(message), "Pressure"), None);
    }

    let raw = vitalband_core::compensation::bmp280::Bmp280Raw { adc_t: 519_888, adc_p: 415_148 };
    assert_eq!(
        vitalband_core::compensation::bmp280::compensate(&calibration, raw),
        Err(ComputeError::DivideByZero { context: "BMP280 pressure" })
    );
}

#[test]
fn pause_and_resume_restart_the_cycle() {
    let mut band = Harness::new(SensorScripts::resting());
    band.run(150);
    assert_eq!(band.messages().len(), 1);
    let ppg_reads = band.monitor.sensors().ppg.reads();

    band.monitor.set_collecting(false);
    assert!(!band.monitor.is_collecting());
    let paused = band.run(200);
    assert!(paused.iter().all(|r| !r.ran && !r.message_sent && r.updated.is_empty()));
    assert_eq!(band.messages().len(), 1);
    assert_eq!(band.monitor.ticks(), 150);
    assert_eq!(band.monitor.sensors().ppg.reads(), ppg_reads);

    band.monitor.set_collecting(true);
    assert_eq!(band.monitor.ticks(), 0);
    let resumed = band.run(100);
    assert_eq!(resumed[0].tick, 0);
    assert!(resumed[..99].iter().all(|r| !r.message_sent));
    assert!(resumed[99].message_sent);
    assert_eq!(band.messages().len(), 2);
}

#[test]
fn poll_runs_on_the_tick_interval() {
    let mut band = Harness::new(SensorScripts::resting());
    let monitor = &mut band.monitor;

    let first = monitor.poll(0).unwrap();
    assert_eq!(first.tick, 0);
    assert!(first.ran);
    assert_eq!(monitor.poll(5), Err(nb::Error::WouldBlock));
    assert_eq!(monitor.poll(10).map(|r| r.tick), Ok(1));
    assert_eq!(monitor.ticks(), 2);
}

#[test]
fn sensor_suite_reads_through_the_set() {
    let mut band = Harness::new(SensorScripts::resting());
    let sensors = band.monitor.sensors_mut();
    let ppg = sensors.ppg().unwrap();
    assert_eq!(ppg.value, PpgReading { red: 90_000, ir: 120_000 });
    assert_eq!(sensors.gyroscope().unwrap().value, Vector3::new(0.0, 0.0, 0.0));
    assert_eq!(sensors.skin_temperature().unwrap().timestamp_ms, 0);
}

fn scripts_failing(mask: u8) -> SensorScripts {
    let mut scripts = SensorScripts::resting();
    if mask & 1 != 0 {
        scripts.accelerometer = failing();
    }
    if mask & 2 != 0 {
        scripts.gyroscope = failing();
    }
    if mask & 4 != 0 {
        scripts.respiratory = failing();
    }
    if mask & 8 != 0 {
        scripts.pulse = failing();
    }
    if mask & 16 != 0 {
        scripts.ppg = failing();
    }
    if mask & 32 != 0 {
        scripts.thermometer = failing();
    }
    if mask & 64 != 0 {
        scripts.barometer = failing();
    }
    scripts
}

fn channels_of(mask: u8) -> Vec<ChannelId> {
    let mut out = Vec::new();
    let by_bit = [
        &[ChannelId::Accelerometer][..],
        &[ChannelId::Gyroscope],
        &[ChannelId::RespiratoryRate],
        &[ChannelId::PulseSensor],
        &[ChannelId::HeartRate, ChannelId::SpO2],
        &[ChannelId::SkinTemperature],
        &[ChannelId::Pressure],
    ];
    for (bit, ids) in by_bit.iter().enumerate() {
        if mask & (1 << bit) != 0 {
            out.extend_from_slice(ids);
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn failing_sensors_never_stop_the_loop(mask in 0u8..128) {
        let mut band = Harness::new(scripts_failing(mask));
        let reports = band.run(300);

        prop_assert!(reports.iter().all(|r| r.ran));
        prop_assert_eq!(band.monitor.ticks(), 300);

        let failed = channels_of(mask);
        for message in band.messages() {
            let entries = parse_message(message);
            prop_assert!(in_registration_order(&entries));
            for id in &failed {
                prop_assert!(value_of(&entries, id.name()).is_none());
            }
        }
        // Temperature and pressure are valid from the first read
        if mask & (32 | 64) != (32 | 64) {
            prop_assert_eq!(band.messages().len(), 3);
        }
    }
}
