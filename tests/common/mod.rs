//! Shared mock node for integration testing.
//!
//! Speaks just enough of the core, indexer, and faucet HTTP APIs for the
//! harness to run real scenarios against it, with knobs to inject outages
//! and control when blocks become included or addresses become funded.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use ledger_load::config::LoadConfig;

/// Behavior knobs and request counters, shared with the test body.
#[derive(Default)]
pub struct MockState {
    /// Per-block metadata poll counts.
    metadata_calls: Mutex<HashMap<String, u32>>,
    /// The first N metadata polls for each block answer 500.
    pub fail_first: AtomicU32,
    /// The 1-based metadata poll at which a block becomes included.
    /// 0 means "never included".
    pub included_at_call: AtomicU32,
    /// When set, block submissions answer 500.
    pub reject_submissions: AtomicBool,
    /// The first N indexer queries report no outputs for any address.
    pub funded_after: AtomicU32,
    indexer_calls: AtomicU32,
    /// Accepted block submissions.
    pub submitted: AtomicU64,
    /// Faucet enqueue requests.
    pub enqueued: AtomicU64,
}

impl MockState {
    #[allow(dead_code)]
    pub fn metadata_calls_for(&self, block: &str) -> u32 {
        self.metadata_calls
            .lock()
            .unwrap()
            .get(block)
            .copied()
            .unwrap_or(0)
    }

    #[allow(dead_code)]
    pub fn total_metadata_calls(&self) -> u32 {
        self.metadata_calls.lock().unwrap().values().sum()
    }

    #[allow(dead_code)]
    pub fn indexer_calls(&self) -> u32 {
        self.indexer_calls.load(Ordering::SeqCst)
    }
}

/// A mock node bound to an ephemeral local port.
pub struct MockNode {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockNode {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/core/v2/info", get(info))
            .route("/api/core/v2/tips", get(tips))
            .route("/api/core/v2/blocks", post(submit_block))
            .route("/api/core/v2/blocks/{id}/metadata", get(block_metadata))
            .route("/api/core/v2/outputs/{id}", get(output))
            .route("/api/indexer/v1/outputs/basic", get(basic_outputs))
            .route("/api/enqueue", post(enqueue))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Config pointing every endpoint at the mock node, tuned for fast tests:
/// no wait time, one iteration per user, tight polling intervals.
#[allow(dead_code)]
pub fn test_config(node: &MockNode) -> LoadConfig {
    let mut config = LoadConfig::default();
    config.node.url = node.url();
    config.node.request_timeout_secs = 5;
    config.faucet.url = node.url();
    config.faucet.request_timeout_secs = 5;
    config.faucet.poll_interval_ms = 5;
    config.faucet.poll_budget = 10;
    config.workload.users = 1;
    config.workload.wait_min_secs = 0.0;
    config.workload.wait_max_secs = 0.0;
    config.workload.duration_secs = None;
    config.workload.iterations = Some(1);
    config.confirmation.max_retries = 20;
    config.confirmation.retry_interval_ms = 2;
    config
}

async fn info() -> Json<Value> {
    Json(json!({
        "name": "mock-node",
        "version": "2.0.0-test",
        "status": { "isHealthy": true }
    }))
}

async fn tips() -> Json<Value> {
    Json(json!({
        "tips": [
            format!("0x{:064x}", 1),
            format!("0x{:064x}", 2)
        ]
    }))
}

async fn submit_block(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    if state.reject_submissions.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "mock submission outage" })),
        );
    }
    let n = state.submitted.fetch_add(1, Ordering::SeqCst) + 1;
    (
        StatusCode::CREATED,
        Json(json!({ "blockId": format!("0x{:064x}", n) })),
    )
}

async fn block_metadata(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let call = {
        let mut calls = state.metadata_calls.lock().unwrap();
        let entry = calls.entry(id.clone()).or_insert(0);
        *entry += 1;
        *entry
    };

    if call <= state.fail_first.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "mock metadata outage" })),
        );
    }

    let included_at = state.included_at_call.load(Ordering::SeqCst);
    let body = if included_at != 0 && call >= included_at {
        json!({
            "blockId": id,
            "ledgerInclusionState": "included",
            "referencedByMilestoneIndex": 4242
        })
    } else {
        json!({ "blockId": id })
    };
    (StatusCode::OK, Json(body))
}

async fn output(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "metadata": {
            "blockId": format!("0x{:064x}", 7),
            "outputId": id,
            "isSpent": false
        },
        "output": { "type": 3, "amount": "1000000" }
    }))
}

async fn basic_outputs(State(state): State<Arc<MockState>>) -> Json<Value> {
    let call = state.indexer_calls.fetch_add(1, Ordering::SeqCst) + 1;
    let items: Vec<String> = if call > state.funded_after.load(Ordering::SeqCst) {
        vec![format!("0x{:068x}", 1)]
    } else {
        Vec::new()
    };
    Json(json!({ "ledgerIndex": 1000, "items": items }))
}

async fn enqueue(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.enqueued.fetch_add(1, Ordering::SeqCst);
    let address = body
        .get("address")
        .and_then(Value::as_str)
        .unwrap_or_default();
    (
        StatusCode::ACCEPTED,
        Json(json!({ "address": address, "waitingRequests": 1 })),
    )
}
