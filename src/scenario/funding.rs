//! Faucet round-trip scenario.

use std::time::{Duration, Instant};

use crate::config::schema::LoadConfig;
use crate::harness::user::{Behavior, HarnessError};
use crate::metrics::sink::{ChannelSink, EventSink};
use crate::node::client::ApiClient;
use crate::node::faucet::{wait_until_funded, FaucetClient};
use crate::workflow::outcome::OutcomeEvent;

const OPERATION: &str = "faucet_funding";

/// Enqueues faucet funding for an address and waits until the funds
/// become visible through the node's indexer.
pub struct FundingUser {
    node: ApiClient,
    faucet: FaucetClient,
    sink: ChannelSink,
    address: String,
    poll_budget: u32,
    poll_interval: Duration,
}

impl FundingUser {
    pub fn new(
        config: &LoadConfig,
        user_id: usize,
        sink: ChannelSink,
    ) -> Result<Self, HarnessError> {
        let addresses = &config.faucet.addresses;
        if addresses.is_empty() {
            return Err(HarnessError::Setup(
                "funding scenario needs at least one address in faucet.addresses".to_string(),
            ));
        }
        let address = addresses[user_id % addresses.len()].clone();

        Ok(Self {
            node: ApiClient::new(&config.node)?,
            faucet: FaucetClient::new(&config.faucet)?,
            sink,
            address,
            poll_budget: config.faucet.poll_budget,
            poll_interval: Duration::from_millis(config.faucet.poll_interval_ms),
        })
    }
}

impl Behavior for FundingUser {
    async fn iteration(&mut self) {
        let started = Instant::now();
        let result = async {
            self.faucet.enqueue(&self.address).await?;
            wait_until_funded(&self.node, &self.address, self.poll_budget, self.poll_interval)
                .await
        }
        .await;

        if let Err(e) = &result {
            tracing::debug!(address = %self.address, error = %e, "Funding round failed");
        }
        self.sink
            .emit(OutcomeEvent::from_result(OPERATION, started.elapsed(), &result, 0));
    }
}
