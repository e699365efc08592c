//! The behavior contract for simulated users.

use std::future::Future;

use thiserror::Error;

use crate::node::types::ApiError;

/// Errors raised outside measured operations (setup, teardown, run
/// supervision). Failures of measured operations are never errors here;
/// they surface as failure counts in the aggregated summary.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Scenario construction or user setup failed.
    #[error("user setup failed: {0}")]
    Setup(String),

    /// A node or faucet call outside any measured operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// What one user did during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserReport {
    pub user_id: usize,
    pub iterations: u64,
}

/// One simulated user's scenario logic.
///
/// Implementations own their node client and all per-user state; the
/// runner drives `iteration` in a loop with a sampled wait in between.
/// Futures must be `Send` because each user runs on its own spawned task.
pub trait Behavior: Send + 'static {
    /// One-time setup before the iteration loop (clients, funding, seeds).
    fn on_start(&mut self) -> impl Future<Output = Result<(), HarnessError>> + Send {
        async { Ok(()) }
    }

    /// A single scenario iteration. Measured failures are reported to the
    /// sink inside, never returned.
    fn iteration(&mut self) -> impl Future<Output = ()> + Send;

    /// Teardown after the loop exits (normally or via shutdown).
    fn on_stop(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }
}
