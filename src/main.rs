//! ledger-load entry point.
//!
//! # Data Flow
//!
//! ```text
//!   CLI flags ──┐
//!               ▼
//!   TOML ──▶ LoadConfig ──▶ Runner ──▶ user tasks (one per simulated user)
//!                                          │
//!                                          │ scenario behavior
//!                                          ▼
//!                               workflow: submit ──▶ poll inclusion ──▶ Node REST API
//!                                          │
//!                                          ▼
//!                                   outcome events
//!                                          │
//!                                          ▼
//!                        aggregator ──▶ run summary (console / JSON file)
//!                               └─────▶ metrics registry (Prometheus, optional)
//! ```
//!
//! Startup wires the pieces in order: parse flags, load and validate the
//! config, bring up logging and the optional metrics exporter, probe the
//! node once, then hand the chosen scenario to the runner and wait for the
//! run bound (or Ctrl+C) to end the run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ledger_load::config::loader::{load_config, ConfigError};
use ledger_load::config::validation::validate_config;
use ledger_load::config::LoadConfig;
use ledger_load::harness::Runner;
use ledger_load::metrics::{self, Aggregator, ChannelSink};
use ledger_load::node::ApiClient;
use ledger_load::scenario::{BlocksUser, ConfirmedUser, FundingUser, QueriesUser};

#[derive(Parser)]
#[command(name = "ledger-load")]
#[command(about = "Load harness for distributed-ledger node HTTP APIs")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Node API base URL (overrides the config file).
    #[arg(long)]
    node_url: Option<String>,

    /// Number of simulated users (overrides the config file).
    #[arg(short, long)]
    users: Option<usize>,

    /// Run duration in seconds (overrides the config file).
    #[arg(short, long)]
    duration: Option<u64>,

    /// Iterations per user (overrides the config file).
    #[arg(long)]
    iterations: Option<u64>,

    /// Write the run summary as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    scenario: Scenario,
}

#[derive(Subcommand, Clone, Copy)]
enum Scenario {
    /// Fire-and-forget tagged-data block submissions
    Blocks,
    /// Track every submitted block to ledger inclusion
    Confirmed,
    /// Read-only load across the info, tips, metadata, and output endpoints
    Queries,
    /// Faucet round-trips: enqueue funding and wait for it to land
    Funding,
}

impl Scenario {
    fn name(&self) -> &'static str {
        match self {
            Scenario::Blocks => "blocks",
            Scenario::Confirmed => "confirmed",
            Scenario::Queries => "queries",
            Scenario::Funding => "funding",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 1. Configuration: file (or defaults), then CLI overrides, then validation.
    let config = build_config(&cli)?;

    // 2. Logging. RUST_LOG wins over the config level when set.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ledger_load={}", config.observability.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let scenario = cli.scenario;
    tracing::info!(
        scenario = scenario.name(),
        users = config.workload.users,
        node_url = %config.node.url,
        "ledger-load starting"
    );

    // 3. Optional Prometheus exporter.
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(address) => metrics::init_metrics(address),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address, exporter disabled"
            ),
        }
    }

    // 4. Preflight: surface an unreachable or unhealthy node before spawning users.
    let probe = ApiClient::new(&config.node)?;
    if probe.is_healthy().await {
        tracing::info!(node_url = %config.node.url, "Node preflight ok");
    } else {
        tracing::warn!(node_url = %config.node.url, "Node preflight failed, starting anyway");
    }

    // 5. Outcome pipeline: every user clones the sink, the aggregator owns
    //    the receiving end and folds events until the channel closes.
    let (sink, mut events) = ChannelSink::new();
    let aggregator = tokio::spawn(async move {
        let mut aggregator = Aggregator::new();
        aggregator.drain(&mut events).await;
        aggregator
    });

    // 6. Run the chosen scenario.
    let runner = Runner::from_config(&config.workload);
    let report = match scenario {
        Scenario::Blocks => {
            runner
                .run(|_| BlocksUser::new(&config, sink.clone()))
                .await?
        }
        Scenario::Confirmed => {
            runner
                .run(|_| ConfirmedUser::new(&config, sink.clone()))
                .await?
        }
        Scenario::Queries => {
            runner
                .run(|_| QueriesUser::new(&config, sink.clone()))
                .await?
        }
        Scenario::Funding => {
            runner
                .run(|user_id| FundingUser::new(&config, user_id, sink.clone()))
                .await?
        }
    };

    // 7. Close the channel so the aggregator drains and finishes.
    drop(sink);
    let aggregator = aggregator.await?;
    let summary = aggregator.into_summary(
        uuid::Uuid::new_v4().to_string(),
        scenario.name(),
        config.workload.users,
    );
    summary.print();

    let report_path = cli
        .report
        .clone()
        .or_else(|| config.report.json_path.as_ref().map(PathBuf::from));
    if let Some(path) = report_path {
        summary.write_json(&path)?;
        tracing::info!(path = %path.display(), "Run report written");
    }

    tracing::info!(
        iterations = report.total_iterations(),
        elapsed_secs = report.elapsed.as_secs_f64(),
        "Run complete"
    );
    Ok(())
}

/// Assembles the effective config: file (or defaults), CLI overrides,
/// then validation. Validation failures come back as `ConfigError` so
/// `main` can propagate them with `?` like any other startup error.
fn build_config(cli: &Cli) -> Result<LoadConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoadConfig::default(),
    };
    apply_overrides(&mut config, cli);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Folds CLI flags into the loaded config.
///
/// An explicit `--duration` or `--iterations` replaces the other bound from
/// the config file unless both flags are given, so `--iterations 50` means
/// "exactly 50 iterations" even when the file sets a default duration.
fn apply_overrides(config: &mut LoadConfig, cli: &Cli) {
    if let Some(url) = &cli.node_url {
        config.node.url = url.clone();
    }
    if let Some(users) = cli.users {
        config.workload.users = users;
    }
    if let Some(duration) = cli.duration {
        config.workload.duration_secs = Some(duration);
        if cli.iterations.is_none() {
            config.workload.iterations = None;
        }
    }
    if let Some(iterations) = cli.iterations {
        config.workload.iterations = Some(iterations);
        if cli.duration.is_none() {
            config.workload.duration_secs = None;
        }
    }
}
