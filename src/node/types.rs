//! Node API types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export NodeConfig from config module to avoid duplication
pub use crate::config::schema::NodeConfig;

/// Block identifier returned by the node on submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockId(pub String);

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur during node or faucet API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// An endpoint URL could not be parsed or joined.
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Faucet funding was not observed within the polling budget.
    #[error("funding not observed after {attempts} balance checks")]
    FundingTimeout { attempts: u32 },
}

/// Result type for node API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Ledger inclusion state reported by the block-metadata endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InclusionState {
    /// The block's transaction is part of the ledger.
    Included,
    /// The block references a conflicting transaction.
    Conflicting,
    /// The block carries no value transaction.
    NoTransaction,
}

/// Subset of `GET /api/core/v2/info` the harness reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub name: String,
    pub version: String,
    pub status: NodeStatus,
}

/// Node health section of the info response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub is_healthy: bool,
}

/// Response of `GET /api/core/v2/tips`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tips {
    pub tips: Vec<String>,
}

/// Response of `POST /api/core/v2/blocks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub block_id: String,
}

/// Subset of `GET /api/core/v2/blocks/{id}/metadata` the harness reads.
///
/// `ledger_inclusion_state` is absent until the block has been referenced
/// by a milestone; an absent state means "keep polling".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    pub block_id: String,
    #[serde(default)]
    pub ledger_inclusion_state: Option<InclusionState>,
    #[serde(default)]
    pub referenced_by_milestone_index: Option<u32>,
}

impl BlockMetadata {
    /// True once the node reports the block included in the ledger.
    pub fn is_included(&self) -> bool {
        matches!(self.ledger_inclusion_state, Some(InclusionState::Included))
    }
}

/// Tagged-data payload attached to submitted blocks.
///
/// Tag and data travel hex-encoded with a `0x` prefix, mirroring the
/// node's JSON wire format. Payload type 5 is tagged data.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedDataPayload {
    #[serde(rename = "type")]
    pub kind: u8,
    pub tag: String,
    pub data: String,
}

impl TaggedDataPayload {
    pub fn new(tag: &str, data: &[u8]) -> Self {
        Self {
            kind: 5,
            tag: format!("0x{}", hex::encode(tag.as_bytes())),
            data: format!("0x{}", hex::encode(data)),
        }
    }
}

/// Body of `POST /api/core/v2/blocks`. Parents and proof-of-work are
/// filled in by the node.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitBlockRequest {
    pub payload: TaggedDataPayload,
}

/// One page of `GET /api/indexer/v1/outputs/basic`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputIdsPage {
    pub ledger_index: u32,
    #[serde(default)]
    pub cursor: Option<String>,
    pub items: Vec<String>,
}

/// Subset of `GET /api/core/v2/outputs/{id}` the harness reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputResponse {
    pub metadata: OutputMetadata,
    pub output: serde_json::Value,
}

/// Metadata section of an output response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMetadata {
    pub block_id: String,
    pub output_id: String,
    pub is_spent: bool,
}

/// Response of the faucet enqueue endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetEnqueueResponse {
    pub address: String,
    #[serde(default)]
    pub waiting_requests: u32,
}
