//! Tracked submission scenario: every block is followed to inclusion.
//!
//! # Responsibilities
//! - Submit tagged-data blocks through the confirmation workflow
//! - Supervise one tracker task per submission in the user's JoinSet
//! - Keep in-flight trackers under the configured cap
//! - Wind down trackers on teardown, abandoning the stragglers

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::schema::LoadConfig;
use crate::harness::user::{Behavior, HarnessError};
use crate::metrics::sink::ChannelSink;
use crate::node::client::ApiClient;
use crate::scenario::random_payload;
use crate::workflow;

const OPERATION: &str = "submit_and_confirm";

/// Grace allowed at teardown for in-flight trackers to reach a terminal
/// state before they are abandoned.
const TRACKER_GRACE: Duration = Duration::from_secs(5);

/// Submits tagged-data blocks and tracks each one to a terminal
/// inclusion state through a supervised tracker task.
pub struct ConfirmedUser {
    client: Arc<ApiClient>,
    sink: ChannelSink,
    tag: String,
    payload_size: usize,
    max_retries: u32,
    retry_interval: Duration,
    limiter: Arc<Semaphore>,
    trackers: JoinSet<()>,
}

impl ConfirmedUser {
    pub fn new(config: &LoadConfig, sink: ChannelSink) -> Result<Self, HarnessError> {
        Ok(Self {
            client: Arc::new(ApiClient::new(&config.node)?),
            sink,
            tag: config.workload.payload_tag.clone(),
            payload_size: config.workload.payload_size,
            max_retries: config.confirmation.max_retries,
            retry_interval: Duration::from_millis(config.confirmation.retry_interval_ms),
            limiter: Arc::new(Semaphore::new(config.workload.max_in_flight)),
            trackers: JoinSet::new(),
        })
    }

    fn reap_finished(&mut self) {
        while let Some(joined) = self.trackers.try_join_next() {
            if let Err(e) = joined {
                if e.is_panic() {
                    tracing::error!(error = %e, "Confirmation tracker panicked");
                }
            }
        }
    }
}

impl Behavior for ConfirmedUser {
    async fn iteration(&mut self) {
        self.reap_finished();

        // Backpressure: wait for a slot under the in-flight cap.
        let Ok(permit) = self.limiter.clone().acquire_owned().await else {
            return;
        };

        let client = self.client.clone();
        let sink = self.sink.clone();
        let tag = self.tag.clone();
        let data = random_payload(self.payload_size);
        let max_retries = self.max_retries;
        let retry_interval = self.retry_interval;

        self.trackers.spawn(async move {
            let _permit = permit;
            workflow::run_tracked(
                client.as_ref(),
                &sink,
                OPERATION,
                &tag,
                &data,
                max_retries,
                retry_interval,
            )
            .await;
        });
    }

    async fn on_stop(&mut self) {
        if self.trackers.is_empty() {
            return;
        }
        tracing::debug!(
            outstanding = self.trackers.len(),
            "Waiting for in-flight confirmation trackers"
        );

        let drain = async {
            while let Some(joined) = self.trackers.join_next().await {
                if let Err(e) = joined {
                    if e.is_panic() {
                        tracing::error!(error = %e, "Confirmation tracker panicked");
                    }
                }
            }
        };
        if tokio::time::timeout(TRACKER_GRACE, drain).await.is_err() {
            tracing::debug!(
                abandoned = self.trackers.len(),
                "Abandoning unfinished confirmation trackers"
            );
            self.trackers.abort_all();
            while self.trackers.join_next().await.is_some() {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_from_defaults() {
        let (sink, _rx) = ChannelSink::new();
        let user = ConfirmedUser::new(&LoadConfig::default(), sink).unwrap();
        assert_eq!(user.max_retries, 100);
        assert_eq!(user.retry_interval, Duration::from_millis(100));
        assert_eq!(user.limiter.available_permits(), 16);
    }
}
