//! Report Aggregator
//!
//! ## Overview
//!
//! Channels run on different cadences, but the companion app wants one
//! message per report cycle. The aggregator collects the latest value from
//! each channel, in registration order, and hands a single serialized
//! message to the [`MessageSink`] when the cycle is complete.
//!
//! ## Cycle Lifecycle
//!
//! ```text
//!           add()              add() (entries == expected)
//! [empty] ───────▶ [pending] ───────────────────────────────▶ send + reset ──▶ [empty]
//!                      │
//!                      └── finalize() ──▶ send partial + reset ──▶ [empty]
//! ```
//!
//! `finalize()` exists so a channel that never reports cannot stall the
//! cycle: the monitor calls it at the end of every report cycle that did not
//! flush on its own.
//!
//! ## Wire Format
//!
//! A flat JSON object, keys in insertion order:
//!
//! ```text
//! {"Accelerometer":96,"Gyroscope":0,"HeartRate":72,"SkinTemperature":36.41}
//! ```
//!
//! Integer values are written as integers, decimal values with two fraction
//! digits. NaN and infinities have no JSON form and are refused with
//! [`AggregatorError::NonFiniteValue`]. Keys are written verbatim and must
//! not contain `"` or `\`.
//!
//! ## Capacity
//!
//! The message is built incrementally in a fixed `heapless::String`. An
//! entry that would not fit (one byte is always reserved for the closing
//! brace) is refused with [`AggregatorError::EntryTooLarge`], so the buffer
//! never overruns and the message is always well-formed.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::constants::{AGGREGATOR_MAX_ENTRIES, AGGREGATOR_MESSAGE_BYTES};
use crate::errors::{AggregatorError, AggregatorResult};
use crate::logging::{log_debug, log_warn};
use crate::traits::MessageSink;

/// Longest single rendered entry: separator, quoted key, colon, number
const ENTRY_SCRATCH_BYTES: usize = 64;

/// Numeric value of one entry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    Integer(i32),
    Decimal(f32),
}

impl Value {
    /// Whether the value can be written as a JSON number
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Integer(_) => true,
            Value::Decimal(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{:.2}", v),
        }
    }
}

/// One `(key, value)` pair of the current cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub key: &'static str,
    pub value: Value,
}

/// Result of a successful [`Aggregator::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Stored; the cycle now holds `received` entries
    Pending { received: usize },
    /// Stored, and the cycle was complete so the message was sent
    Flushed,
}

/// Bounded message builder that owns the outbound sink
///
/// - `N`: maximum entries per cycle
/// - `CAP`: message buffer size in bytes
pub struct Aggregator<S: MessageSink, const N: usize = AGGREGATOR_MAX_ENTRIES, const CAP: usize = AGGREGATOR_MESSAGE_BYTES>
{
    sink: S,
    entries: Vec<Entry, N>,
    message: String<CAP>,
    expected_entries: usize,
    messages_sent: u32,
}

impl<S: MessageSink, const N: usize, const CAP: usize> Aggregator<S, N, CAP> {
    /// Aggregator that flushes once `expected_entries` have been added.
    /// The expectation is clamped to `1..=N`.
    pub fn new(sink: S, expected_entries: usize) -> Self {
        Self {
            sink,
            entries: Vec::new(),
            message: String::new(),
            expected_entries: expected_entries.clamp(1, N.max(1)),
            messages_sent: 0,
        }
    }

    /// Append an entry to the current cycle, flushing when it completes
    pub fn add(&mut self, key: &'static str, value: Value) -> AggregatorResult<AddOutcome> {
        if self.entries.len() >= self.expected_entries {
            log_warn!("aggregator full, dropping {}", key);
            return Err(AggregatorError::Full { expected: self.expected_entries });
        }

        if !value.is_finite() {
            log_warn!("entry {} is not finite, dropped", key);
            return Err(AggregatorError::NonFiniteValue { key });
        }

        let mut piece: String<ENTRY_SCRATCH_BYTES> = String::new();
        let separator = if self.entries.is_empty() { "{" } else { "," };
        let rendered = write!(piece, "{}\"{}\":{}", separator, key, value);

        // Keep one byte for the closing brace.
        let fits = self.message.len() + piece.len() < CAP;
        if rendered.is_err() || !fits {
            log_warn!("entry {} does not fit in the message buffer, dropped", key);
            return Err(AggregatorError::EntryTooLarge { key });
        }

        self.message
            .push_str(&piece)
            .map_err(|()| AggregatorError::EntryTooLarge { key })?;
        self.entries
            .push(Entry { key, value })
            .map_err(|_| AggregatorError::Full { expected: self.expected_entries })?;

        if self.entries.len() == self.expected_entries {
            self.flush();
            Ok(AddOutcome::Flushed)
        } else {
            Ok(AddOutcome::Pending { received: self.entries.len() })
        }
    }

    /// Send whatever the cycle holds. Returns `false` if it was empty.
    pub fn finalize(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.flush();
        true
    }

    fn flush(&mut self) {
        // Space for the brace was reserved by `add`.
        let _ = self.message.push('}');
        log_debug!("sending {} entries ({} bytes)", self.entries.len(), self.message.len());
        self.sink.send(&self.message);
        self.messages_sent = self.messages_sent.wrapping_add(1);
        self.reset();
    }

    /// Discard the current cycle without sending
    pub fn reset(&mut self) {
        self.entries.clear();
        self.message.clear();
    }

    pub fn entries_received(&self) -> usize {
        self.entries.len()
    }

    pub fn expected_entries(&self) -> usize {
        self.expected_entries
    }

    /// Entries of the current cycle in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Messages handed to the sink so far
    pub fn messages_sent(&self) -> u32 {
        self.messages_sent
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
