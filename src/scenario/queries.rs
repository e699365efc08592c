//! Read-only API load scenario.

use std::future::Future;
use std::time::Instant;

use crate::config::schema::LoadConfig;
use crate::harness::user::{Behavior, HarnessError};
use crate::metrics::sink::{ChannelSink, EventSink};
use crate::node::client::ApiClient;
use crate::node::types::{ApiResult, BlockId};
use crate::scenario::random_payload;
use crate::workflow::outcome::OutcomeEvent;

const OP_INFO: &str = "node_info";
const OP_TIPS: &str = "tips";
const OP_METADATA: &str = "block_metadata";
const OP_OUTPUTS: &str = "output_ids";
const OP_OUTPUT: &str = "output";

/// Drives the node's read endpoints with a randomized mix of node-info,
/// tips, block-metadata, and output requests. The output arm lists basic
/// output ids for a configured address, then fetches one of them by id.
pub struct QueriesUser {
    client: ApiClient,
    sink: ChannelSink,
    tag: String,
    addresses: Vec<String>,
    seed_block: Option<BlockId>,
}

impl QueriesUser {
    pub fn new(config: &LoadConfig, sink: ChannelSink) -> Result<Self, HarnessError> {
        Ok(Self {
            client: ApiClient::new(&config.node)?,
            sink,
            tag: config.workload.payload_tag.clone(),
            addresses: config.faucet.addresses.clone(),
            seed_block: None,
        })
    }

    /// Runs one read call, emits its outcome event, and hands back the
    /// decoded value so an arm can chain a follow-up query on success.
    async fn timed<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = ApiResult<T>>,
    ) -> Option<T> {
        let started = Instant::now();
        let result = call.await;
        if let Err(e) = &result {
            tracing::debug!(operation, error = %e, "Read query failed");
        }
        self.sink
            .emit(OutcomeEvent::from_result(operation, started.elapsed(), &result, 0));
        result.ok()
    }
}

impl Behavior for QueriesUser {
    async fn on_start(&mut self) -> Result<(), HarnessError> {
        // Seed one block so metadata queries have a real target. Going
        // without is fine; the mix falls back to the other endpoints.
        let data = random_payload(32);
        match self.client.submit_tagged_data(&self.tag, &data).await {
            Ok(block) => self.seed_block = Some(block),
            Err(e) => {
                tracing::warn!(error = %e, "Seed block submission failed, skipping metadata arm")
            }
        }
        Ok(())
    }

    async fn iteration(&mut self) {
        match fastrand::usize(0..4) {
            0 => {
                self.timed(OP_INFO, self.client.info()).await;
            }
            1 => {
                self.timed(OP_TIPS, self.client.tips()).await;
            }
            2 => match &self.seed_block {
                Some(block) => {
                    self.timed(OP_METADATA, self.client.block_metadata(block)).await;
                }
                None => {
                    self.timed(OP_INFO, self.client.info()).await;
                }
            },
            _ => {
                if self.addresses.is_empty() {
                    self.timed(OP_TIPS, self.client.tips()).await;
                } else {
                    let address = &self.addresses[fastrand::usize(0..self.addresses.len())];
                    let page = self.timed(OP_OUTPUTS, self.client.basic_output_ids(address)).await;
                    // Follow the listing with a single-output fetch when it found any.
                    if let Some(output_id) = page.and_then(|p| p.items.into_iter().next()) {
                        self.timed(OP_OUTPUT, self.client.output(&output_id)).await;
                    }
                }
            }
        }
    }
}
