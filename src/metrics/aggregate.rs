//! Outcome aggregation into per-operation statistics.
//!
//! # Responsibilities
//! - Drain the outcome channel until every producer is gone
//! - Fold events into per-operation accumulators
//! - Mirror each event into the metrics registry
//! - Produce the end-of-run summary

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::metrics::report::{OperationSummary, RunSummary};
use crate::workflow::outcome::OutcomeEvent;

/// Accumulates outcome events for one run.
pub struct Aggregator {
    ops: BTreeMap<&'static str, OperationAccumulator>,
    events: u64,
    started: Instant,
}

#[derive(Default)]
struct OperationAccumulator {
    requests: u64,
    failures: u64,
    bytes: u64,
    latencies: Vec<Duration>,
    last_error: Option<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            ops: BTreeMap::new(),
            events: 0,
            started: Instant::now(),
        }
    }

    /// Fold one event in and mirror it into the metrics registry.
    pub fn record(&mut self, event: OutcomeEvent) {
        let result = if event.success { "ok" } else { "error" };
        metrics::counter!(
            "ledger_load_outcomes_total",
            "operation" => event.operation,
            "result" => result
        )
        .increment(1);
        metrics::histogram!(
            "ledger_load_duration_seconds",
            "operation" => event.operation
        )
        .record(event.duration.as_secs_f64());

        let acc = self.ops.entry(event.operation).or_default();
        acc.requests += 1;
        acc.bytes += event.bytes as u64;
        acc.latencies.push(event.duration);
        if !event.success {
            acc.failures += 1;
            acc.last_error = event.error;
        }
        self.events += 1;
    }

    /// Consume events until the channel closes (all sinks dropped).
    pub async fn drain(&mut self, rx: &mut mpsc::UnboundedReceiver<OutcomeEvent>) {
        while let Some(event) = rx.recv().await {
            self.record(event);
        }
    }

    /// Events recorded so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Finish the run and produce its summary.
    pub fn into_summary(self, run_id: String, scenario: &str, users: usize) -> RunSummary {
        let elapsed = self.started.elapsed();
        let operations = self
            .ops
            .into_iter()
            .map(|(name, acc)| acc.summarize(name))
            .collect();
        RunSummary {
            run_id,
            scenario: scenario.to_string(),
            users,
            elapsed_secs: elapsed.as_secs_f64(),
            operations,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationAccumulator {
    fn summarize(mut self, operation: &str) -> OperationSummary {
        self.latencies.sort();
        let count = self.latencies.len();
        let sum: Duration = self.latencies.iter().sum();

        OperationSummary {
            operation: operation.to_string(),
            requests: self.requests,
            failures: self.failures,
            bytes: self.bytes,
            min_ms: as_ms(self.latencies[0]),
            max_ms: as_ms(self.latencies[count - 1]),
            mean_ms: as_ms(sum) / count as f64,
            p50_ms: as_ms(percentile(&self.latencies, 0.50)),
            p95_ms: as_ms(percentile(&self.latencies, 0.95)),
            p99_ms: as_ms(percentile(&self.latencies, 0.99)),
            last_error: self.last_error,
        }
    }
}

fn as_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn percentile(sorted: &[Duration], ratio: f64) -> Duration {
    let index = ((sorted.len() as f64 * ratio) as usize).min(sorted.len() - 1);
    sorted[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_record_splits_success_and_failure() {
        let mut agg = Aggregator::new();
        agg.record(OutcomeEvent::success("submit_block", ms(10), 64));
        agg.record(OutcomeEvent::success("submit_block", ms(20), 64));
        agg.record(OutcomeEvent::failure("submit_block", ms(30), "boom", 64));

        let summary = agg.into_summary("run".to_string(), "blocks", 1);
        assert_eq!(summary.operations.len(), 1);
        let op = &summary.operations[0];
        assert_eq!(op.requests, 3);
        assert_eq!(op.failures, 1);
        assert_eq!(op.bytes, 192);
        assert_eq!(op.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_percentiles_over_known_set() {
        let mut agg = Aggregator::new();
        for n in 1..=100u64 {
            agg.record(OutcomeEvent::success("queries", ms(n), 0));
        }
        let summary = agg.into_summary("run".to_string(), "queries", 4);
        let op = &summary.operations[0];
        assert_eq!(op.min_ms, 1.0);
        assert_eq!(op.max_ms, 100.0);
        assert_eq!(op.p50_ms, 51.0);
        assert_eq!(op.p95_ms, 96.0);
        assert_eq!(op.p99_ms, 100.0);
        assert!((op.mean_ms - 50.5).abs() < 0.001);
    }

    #[test]
    fn test_operations_sorted_by_name() {
        let mut agg = Aggregator::new();
        agg.record(OutcomeEvent::success("tips", ms(1), 0));
        agg.record(OutcomeEvent::success("node_info", ms(1), 0));
        let summary = agg.into_summary("run".to_string(), "queries", 1);
        let names: Vec<&str> = summary.operations.iter().map(|o| o.operation.as_str()).collect();
        assert_eq!(names, vec!["node_info", "tips"]);
    }

    #[tokio::test]
    async fn test_drain_stops_when_senders_drop() {
        let (sink, mut rx) = crate::metrics::sink::ChannelSink::new();
        {
            use crate::metrics::sink::EventSink;
            sink.emit(OutcomeEvent::success("submit_block", ms(5), 10));
            sink.emit(OutcomeEvent::success("submit_block", ms(7), 10));
        }
        drop(sink);

        let mut agg = Aggregator::new();
        agg.drain(&mut rx).await;
        assert_eq!(agg.events(), 2);
    }
}
