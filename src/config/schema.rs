//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a load run.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a load run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoadConfig {
    /// Node API endpoint settings.
    pub node: NodeConfig,

    /// Faucet endpoint and funding-poll settings.
    pub faucet: FaucetConfig,

    /// Workload shape (users, wait times, run bound, payloads).
    pub workload: WorkloadConfig,

    /// Confirmation-polling budget and interval.
    pub confirmation: ConfirmationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Run report output.
    pub report: ReportConfig,
}

/// Node API endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Base URL of the node REST API (e.g., "http://localhost:14265").
    pub url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:14265".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Faucet endpoint configuration.
///
/// The faucet enqueues funding requests for an address; the harness then
/// watches the indexer until an output shows up for that address.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FaucetConfig {
    /// Base URL of the faucet (e.g., "http://localhost:8091").
    pub url: String,

    /// Per-request timeout in seconds. Faucets queue work behind a proof of
    /// work check, so the default is more generous than the node timeout.
    pub request_timeout_secs: u64,

    /// Maximum number of balance checks before giving up on a funding round.
    pub poll_budget: u32,

    /// Delay between balance checks in milliseconds.
    pub poll_interval_ms: u64,

    /// Bech32 addresses the funding and query scenarios may use.
    /// Addresses are opaque to the harness; key material stays outside.
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8091".to_string(),
            request_timeout_secs: 30,
            poll_budget: 45,
            poll_interval_ms: 1000,
            addresses: Vec::new(),
        }
    }
}

/// Workload shape configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of simulated users.
    pub users: usize,

    /// Lower bound of the per-iteration wait time in seconds.
    pub wait_min_secs: f64,

    /// Upper bound of the per-iteration wait time in seconds.
    pub wait_max_secs: f64,

    /// Stop the run after this many seconds of wall-clock time.
    pub duration_secs: Option<u64>,

    /// Stop each user after this many iterations.
    pub iterations: Option<u64>,

    /// Tag attached to submitted tagged-data blocks.
    pub payload_tag: String,

    /// Size of the random data section of each submitted block, in bytes.
    pub payload_size: usize,

    /// Maximum confirmation trackers in flight per user.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

fn default_max_in_flight() -> usize {
    16
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            users: 10,
            wait_min_secs: 1.0,
            wait_max_secs: 3.0,
            duration_secs: Some(30),
            iterations: None,
            payload_tag: "ledger-load".to_string(),
            payload_size: 64,
            max_in_flight: default_max_in_flight(),
        }
    }
}

/// Confirmation-polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Maximum inclusion polls per submitted block before declaring timeout.
    pub max_retries: u32,

    /// Delay between inclusion polls in milliseconds.
    pub retry_interval_ms: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            max_retries: 100,
            retry_interval_ms: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus exposition endpoint.
    pub metrics_enabled: bool,

    /// Prometheus exposition bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Run report output configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Write the end-of-run summary as JSON to this path.
    pub json_path: Option<String>,
}
