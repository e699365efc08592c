//! Metrics and reporting subsystem.
//!
//! # Data Flow
//! ```text
//! users / trackers
//!     → sink.rs (ChannelSink, cloned per user)
//!     → aggregate.rs (aggregator task drains the channel)
//!         → metrics registry (live counters/histograms, Prometheus)
//!         → report.rs (RunSummary: console table + JSON file)
//! ```
//!
//! # Design Decisions
//! - One aggregator task owns all folding; users never share counters
//! - The channel closing (all sinks dropped) is the end-of-run signal
//! - Prometheus exposition is optional and config-gated

pub mod aggregate;
pub mod report;
pub mod sink;

pub use aggregate::Aggregator;
pub use report::{OperationSummary, RunSummary};
pub use sink::{ChannelSink, EventSink};

/// Install the Prometheus exposition endpoint.
///
/// Failure to bind is logged, not fatal: a load run without live metrics
/// still produces its end-of-run summary.
pub fn init_metrics(address: std::net::SocketAddr) {
    use metrics_exporter_prometheus::PrometheusBuilder;

    match PrometheusBuilder::new().with_http_listener(address).install() {
        Ok(()) => tracing::info!(address = %address, "Prometheus exposition listening"),
        Err(e) => {
            tracing::error!(address = %address, error = %e, "Failed to start Prometheus exposition")
        }
    }
}
