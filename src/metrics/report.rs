//! Run summaries: console output and JSON report files.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Aggregated statistics for one operation name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSummary {
    pub operation: String,
    pub requests: u64,
    pub failures: u64,
    pub bytes: u64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// End-of-run summary across all operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub scenario: String,
    pub users: usize,
    pub elapsed_secs: f64,
    pub operations: Vec<OperationSummary>,
}

impl RunSummary {
    pub fn total_requests(&self) -> u64 {
        self.operations.iter().map(|op| op.requests).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.operations.iter().map(|op| op.failures).sum()
    }

    pub fn requests_per_sec(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.total_requests() as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }

    /// Print the summary table to stdout.
    pub fn print(&self) {
        println!("\n--- Run Summary: {} ---", self.scenario);
        println!("Run ID:         {}", self.run_id);
        println!("Users:          {}", self.users);
        println!("Elapsed:        {:.2}s", self.elapsed_secs);
        println!("Total Requests: {}", self.total_requests());
        println!("Total Failures: {}", self.total_failures());
        println!("Requests/sec:   {:.2}", self.requests_per_sec());
        for op in &self.operations {
            println!("\n  [{}]", op.operation);
            println!("    Requests:    {} ({} failed)", op.requests, op.failures);
            println!("    Payload:     {} bytes", op.bytes);
            println!(
                "    Latency:     min {:.1}ms / mean {:.1}ms / max {:.1}ms",
                op.min_ms, op.mean_ms, op.max_ms
            );
            println!(
                "    P50/P95/P99: {:.1}ms / {:.1}ms / {:.1}ms",
                op.p50_ms, op.p95_ms, op.p99_ms
            );
            if let Some(error) = &op.last_error {
                println!("    Last error:  {}", error);
            }
        }
        println!("------------------------------\n");
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        fs::write(path, json)
    }

    /// Read a summary back from a JSON report file.
    pub fn read_json(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(io::Error::from)
    }
}
