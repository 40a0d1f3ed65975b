//! Physiological Plausibility Gating
//!
//! ## Overview
//!
//! A rate that comes out of the detector chain is only published if it is
//! physiologically possible for its channel. Anything else is discarded and
//! the previously accepted value stays visible (sticky-last-valid).
//!
//! ```text
//! computed rate ──▶ finite? ──▶ min <= rate <= max? ──▶ published output
//!                      │                 │
//!                      └──── no ─────────┴──▶ keep previous output
//! ```
//!
//! Channels that have a meaningful "nothing happening" value (step cadence,
//! rotation rate) include zero in their range, so a real zero passes the
//! gate like any other reading.

use crate::errors::{PlausibilityError, PlausibilityResult};
use crate::logging::log_debug;

/// Check that `value` is finite and inside `[min, max]`
pub fn check_range(value: f32, min: f32, max: f32) -> PlausibilityResult<()> {
    if !value.is_finite() {
        Err(PlausibilityError::InvalidValue)
    } else if value < min || value > max {
        Err(PlausibilityError::OutOfRange { value, min, max })
    } else {
        Ok(())
    }
}

/// Inclusive physiological range of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibilityRange {
    pub min: f32,
    pub max: f32,
}

impl PlausibilityRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn check(&self, value: f32) -> PlausibilityResult<f32> {
        check_range(value, self.min, self.max).map(|()| value)
    }

    pub fn contains(&self, value: f32) -> bool {
        self.check(value).is_ok()
    }
}

/// Externally visible output of a channel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChannelOutput {
    /// Most recently accepted value in the channel's unit
    pub rate: f32,
    /// `false` until the first value has been accepted
    pub valid: bool,
}

/// Range gate plus the sticky output it protects
#[derive(Debug, Clone, Copy)]
pub struct PlausibilityGate {
    label: &'static str,
    range: PlausibilityRange,
    output: ChannelOutput,
}

impl PlausibilityGate {
    pub const fn new(label: &'static str, min: f32, max: f32) -> Self {
        Self {
            label,
            range: PlausibilityRange::new(min, max),
            output: ChannelOutput { rate: 0.0, valid: false },
        }
    }

    /// Publish `value` if it is plausible. A rejected value leaves the
    /// current output untouched.
    pub fn offer(&mut self, value: f32) -> PlausibilityResult<f32> {
        match self.range.check(value) {
            Ok(accepted) => {
                self.output = ChannelOutput { rate: accepted, valid: true };
                Ok(accepted)
            }
            Err(err) => {
                log_debug!("{}: rejected implausible value {}", self.label, value);
                Err(err)
            }
        }
    }

    pub fn output(&self) -> ChannelOutput {
        self.output
    }

    pub fn range(&self) -> PlausibilityRange {
        self.range
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}
