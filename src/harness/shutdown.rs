//! Stop signalling for a load run.

use tokio::sync::broadcast;

/// Latch that tells every user task to wind down.
///
/// The runner owns one and fires it when the run bound elapses, an
/// interrupt arrives, or every user hits its iteration cap. User tasks
/// subscribe before their loops start; the channel carries no data, so a
/// capacity of one and lagged receivers are both harmless.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver for one user task's select loops.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the stop signal, logging how many user tasks heard it.
    pub fn trigger(&self) {
        let reached = self.tx.send(()).unwrap_or(0);
        tracing::debug!(users = reached, "Stop signal fired");
    }

    /// Number of user tasks still subscribed.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
