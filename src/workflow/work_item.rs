//! Work items: submitted blocks tracked to a terminal status.

use std::time::{Duration, Instant};

use crate::node::types::BlockId;
use crate::workflow::outcome::OutcomeEvent;

/// Lifecycle status of a tracked submission.
///
/// `Pending` transitions to `Included` or `TimedOut` through the polling
/// loop; `Failed` is reached only when submission itself fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkStatus {
    /// Submitted, inclusion not yet observed.
    Pending,
    /// The node reported the block included in the ledger.
    Included { milestone: Option<u32> },
    /// Submission was rejected or never delivered.
    Failed(String),
    /// The retry budget ran out with no inclusion observed.
    TimedOut { attempts: u32 },
}

/// One submitted block being tracked to a terminal status.
///
/// Created by `submit`, mutated only by the confirmation poller, and
/// consumed by `report`. Moving it into the outcome is what makes the
/// exactly-one-event guarantee hold.
#[derive(Debug)]
pub struct WorkItem {
    block: Option<BlockId>,
    operation: &'static str,
    payload_bytes: usize,
    started: Instant,
    finished: Option<Instant>,
    status: WorkStatus,
}

impl WorkItem {
    /// A successfully submitted item awaiting inclusion.
    pub(crate) fn pending(
        block: BlockId,
        operation: &'static str,
        payload_bytes: usize,
        started: Instant,
    ) -> Self {
        Self {
            block: Some(block),
            operation,
            payload_bytes,
            started,
            finished: None,
            status: WorkStatus::Pending,
        }
    }

    /// An item whose submission failed; terminal from birth.
    pub(crate) fn failed(
        operation: &'static str,
        payload_bytes: usize,
        started: Instant,
        error: String,
    ) -> Self {
        Self {
            block: None,
            operation,
            payload_bytes,
            started,
            finished: Some(Instant::now()),
            status: WorkStatus::Failed(error),
        }
    }

    pub fn block(&self) -> Option<&BlockId> {
        self.block.as_ref()
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn payload_bytes(&self) -> usize {
        self.payload_bytes
    }

    pub fn status(&self) -> &WorkStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, WorkStatus::Pending)
    }

    /// Time elapsed since submission started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub(crate) fn mark_included(&mut self, milestone: Option<u32>) {
        self.status = WorkStatus::Included { milestone };
        self.finished = Some(Instant::now());
    }

    pub(crate) fn mark_timed_out(&mut self, attempts: u32) {
        self.status = WorkStatus::TimedOut { attempts };
        self.finished = Some(Instant::now());
    }

    /// Consume the item into its outcome event.
    ///
    /// A still-pending item is a fire-and-forget submission: it succeeded
    /// at the submit stage and its terminal moment is now.
    pub(crate) fn into_outcome(self) -> OutcomeEvent {
        let finished = self.finished.unwrap_or_else(Instant::now);
        let duration = finished.saturating_duration_since(self.started);

        match self.status {
            WorkStatus::Pending | WorkStatus::Included { .. } => {
                OutcomeEvent::success(self.operation, duration, self.payload_bytes)
            }
            WorkStatus::Failed(error) => {
                OutcomeEvent::failure(self.operation, duration, error, self.payload_bytes)
            }
            WorkStatus::TimedOut { attempts } => {
                let description = match &self.block {
                    Some(block) => format!(
                        "block {} not included; retry budget exhausted after {} polls",
                        block, attempts
                    ),
                    None => format!("retry budget exhausted after {} polls", attempts),
                };
                OutcomeEvent::failure(self.operation, duration, description, self.payload_bytes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_item() -> WorkItem {
        WorkItem::pending(
            BlockId::from("0xfeed".to_string()),
            "submit_and_confirm",
            70,
            Instant::now(),
        )
    }

    #[test]
    fn test_pending_to_included() {
        let mut item = pending_item();
        assert!(item.is_pending());

        item.mark_included(Some(7));
        assert_eq!(item.status(), &WorkStatus::Included { milestone: Some(7) });

        let event = item.into_outcome();
        assert!(event.success);
        assert!(event.error.is_none());
        assert_eq!(event.bytes, 70);
    }

    #[test]
    fn test_pending_to_timed_out() {
        let mut item = pending_item();
        item.mark_timed_out(100);

        let event = item.into_outcome();
        assert!(!event.success);
        let error = event.error.unwrap();
        assert!(error.contains("retry budget exhausted"));
        assert!(error.contains("100"));
        assert!(error.contains("0xfeed"));
    }

    #[test]
    fn test_failed_submission_is_terminal() {
        let item = WorkItem::failed(
            "submit_block",
            70,
            Instant::now(),
            "transport error: connection refused".to_string(),
        );
        assert!(!item.is_pending());
        assert!(item.block().is_none());

        let event = item.into_outcome();
        assert!(!event.success);
        assert!(event.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_fire_and_forget_outcome_is_success() {
        let item = pending_item();
        let event = item.into_outcome();
        assert!(event.success);
        assert_eq!(event.operation, "submit_and_confirm");
    }

    #[test]
    fn test_duration_measured_from_start() {
        let started = Instant::now() - Duration::from_millis(250);
        let mut item = WorkItem::pending(
            BlockId::from("0x01".to_string()),
            "submit_and_confirm",
            0,
            started,
        );
        item.mark_included(None);
        let event = item.into_outcome();
        assert!(event.duration >= Duration::from_millis(250));
    }
}
