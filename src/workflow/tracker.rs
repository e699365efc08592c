//! Block submission and bounded confirmation polling.
//!
//! # Responsibilities
//! - Submit one tagged-data block and capture its Work Item
//! - Poll inclusion state until included or the retry budget runs out
//! - Report exactly one outcome event per Work Item

use std::time::{Duration, Instant};

use crate::metrics::sink::EventSink;
use crate::node::client::ApiClient;
use crate::workflow::work_item::{WorkItem, WorkStatus};

/// Submit one tagged-data block.
///
/// The start timestamp is taken before the request leaves, so the
/// eventual outcome duration covers the full submit round-trip. A
/// submission error yields a terminal `Failed` item; there is no retry
/// at this stage.
pub async fn submit(
    client: &ApiClient,
    operation: &'static str,
    tag: &str,
    data: &[u8],
) -> WorkItem {
    let payload_bytes = tag.len() + data.len();
    let started = Instant::now();

    match client.submit_tagged_data(tag, data).await {
        Ok(block) => {
            tracing::trace!(operation, block = %block, "Block submitted");
            WorkItem::pending(block, operation, payload_bytes, started)
        }
        Err(e) => {
            tracing::debug!(operation, error = %e, "Block submission failed");
            WorkItem::failed(operation, payload_bytes, started, e.to_string())
        }
    }
}

/// Poll a pending item's inclusion state, at most `max_retries` times.
///
/// Each poll consumes one attempt whether it answers "not yet", reports a
/// conflicting state, or fails outright; query errors are transient
/// non-results, absorbed and logged at debug. The loop has exactly two
/// exits: inclusion observed (the item becomes `Included`, later polls
/// never happen) or the budget exhausted (the item becomes `TimedOut`).
/// Non-pending items are left untouched.
///
/// # Returns
/// The number of polls performed.
pub async fn await_confirmation(
    client: &ApiClient,
    item: &mut WorkItem,
    max_retries: u32,
    retry_interval: Duration,
) -> u32 {
    let block = match item.block() {
        Some(block) if item.is_pending() => block.clone(),
        _ => return 0,
    };

    let mut attempts = 0u32;
    while attempts < max_retries {
        attempts += 1;
        match client.block_metadata(&block).await {
            Ok(metadata) => {
                if metadata.is_included() {
                    item.mark_included(metadata.referenced_by_milestone_index);
                    tracing::debug!(block = %block, attempts, "Block included in ledger");
                    return attempts;
                }
            }
            Err(e) => {
                tracing::debug!(block = %block, attempt = attempts, error = %e, "Inclusion query failed");
            }
        }
        if attempts < max_retries {
            tokio::time::sleep(retry_interval).await;
        }
    }

    item.mark_timed_out(max_retries);
    tracing::debug!(block = %block, max_retries, "Confirmation retry budget exhausted");
    attempts
}

/// Consume a Work Item into its single outcome event.
pub fn report<S: EventSink + ?Sized>(item: WorkItem, sink: &S) {
    sink.emit(item.into_outcome());
}

/// Submit, track to a terminal state, and report: the full span of one
/// tracked block.
///
/// A failed submission skips polling entirely. Cancelling the returned
/// future mid-poll abandons the item without reporting; that is the only
/// path on which no event is produced.
pub async fn run_tracked<S: EventSink + ?Sized>(
    client: &ApiClient,
    sink: &S,
    operation: &'static str,
    tag: &str,
    data: &[u8],
    max_retries: u32,
    retry_interval: Duration,
) -> WorkStatus {
    let mut item = submit(client, operation, tag, data).await;
    if item.is_pending() {
        await_confirmation(client, &mut item, max_retries, retry_interval).await;
    }
    let status = item.status().clone();
    report(item, sink);
    status
}
