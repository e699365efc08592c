//! Outcome event sinks.

use tokio::sync::mpsc;

use crate::workflow::outcome::OutcomeEvent;

/// Destination for outcome events.
///
/// Implementations must not block the emitting task; the workflow calls
/// `emit` from inside user and tracker tasks.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: OutcomeEvent);
}

/// Channel-backed sink shared by all users of a run.
///
/// Clones freely; the aggregator owns the receiving end. Once the
/// aggregator is gone (run teardown) emits become no-ops.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<OutcomeEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver the aggregator will drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutcomeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: OutcomeEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Outcome event dropped, aggregator already stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_emitted_events_arrive_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        sink.emit(OutcomeEvent::success("a", Duration::from_millis(1), 0));
        sink.emit(OutcomeEvent::failure("b", Duration::from_millis(2), "boom", 0));

        assert_eq!(rx.try_recv().unwrap().operation, "a");
        assert_eq!(rx.try_recv().unwrap().operation, "b");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_emit_after_receiver_dropped_is_noop() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.emit(OutcomeEvent::success("a", Duration::from_millis(1), 0));
    }
}
