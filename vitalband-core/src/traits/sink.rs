//! Message Sink
//!
//! The wireless transport is outside the core. Once a report cycle is
//! complete the aggregator hands the serialized message to a `MessageSink`
//! and forgets it: there is no acknowledgement and no retry.

/// Fire-and-forget consumer of serialized messages
pub trait MessageSink {
    /// Accept one complete message
    fn send(&mut self, payload: &str);
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn send(&mut self, payload: &str) {
        (**self).send(payload)
    }
}

/// Sink that discards every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn send(&mut self, _payload: &str) {}
}
