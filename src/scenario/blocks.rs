//! Fire-and-forget block submission scenario.

use crate::config::schema::LoadConfig;
use crate::harness::user::{Behavior, HarnessError};
use crate::metrics::sink::ChannelSink;
use crate::node::client::ApiClient;
use crate::scenario::random_payload;
use crate::workflow;

const OPERATION: &str = "submit_block";

/// Submits tagged-data blocks without tracking inclusion; the outcome
/// times the submit round-trip only.
pub struct BlocksUser {
    client: ApiClient,
    sink: ChannelSink,
    tag: String,
    payload_size: usize,
}

impl BlocksUser {
    pub fn new(config: &LoadConfig, sink: ChannelSink) -> Result<Self, HarnessError> {
        Ok(Self {
            client: ApiClient::new(&config.node)?,
            sink,
            tag: config.workload.payload_tag.clone(),
            payload_size: config.workload.payload_size,
        })
    }
}

impl Behavior for BlocksUser {
    async fn iteration(&mut self) {
        let data = random_payload(self.payload_size);
        let item = workflow::submit(&self.client, OPERATION, &self.tag, &data).await;
        workflow::report(item, &self.sink);
    }
}
