//! Node REST API client with timeout and error handling.
//!
//! # Responsibilities
//! - Issue requests against the node core and indexer APIs
//! - Map transport, status, and decode failures into ApiError
//! - Provide a health probe for preflight checks
//!
//! Every simulated user constructs and owns its own client; nothing in
//! this module is shared global state.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::node::types::{
    ApiError, ApiResult, BlockId, BlockMetadata, NodeConfig, NodeInfo, OutputIdsPage,
    OutputResponse, SubmitBlockRequest, SubmitResponse, TaggedDataPayload, Tips,
};

const INFO_PATH: &str = "api/core/v2/info";
const TIPS_PATH: &str = "api/core/v2/tips";
const BLOCKS_PATH: &str = "api/core/v2/blocks";
const BASIC_OUTPUTS_PATH: &str = "api/indexer/v1/outputs/basic";

/// Client for one node's REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a new client for the configured node.
    ///
    /// # Arguments
    /// * `config` - Node endpoint configuration
    pub fn new(config: &NodeConfig) -> ApiResult<Self> {
        let base = parse_base_url(&config.url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base.join(path).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        let response = self.http.get(url).send().await?;
        decode_json(path, response).await
    }

    /// Fetch node information (`GET /api/core/v2/info`).
    pub async fn info(&self) -> ApiResult<NodeInfo> {
        self.get_json(INFO_PATH).await
    }

    /// Fetch current tips (`GET /api/core/v2/tips`).
    pub async fn tips(&self) -> ApiResult<Tips> {
        self.get_json(TIPS_PATH).await
    }

    /// Submit a tagged-data block (`POST /api/core/v2/blocks`).
    ///
    /// # Returns
    /// The block id assigned by the node.
    pub async fn submit_tagged_data(&self, tag: &str, data: &[u8]) -> ApiResult<BlockId> {
        let url = self.endpoint(BLOCKS_PATH)?;
        let body = SubmitBlockRequest {
            payload: TaggedDataPayload::new(tag, data),
        };
        let response = self.http.post(url).json(&body).send().await?;
        let submitted: SubmitResponse = decode_json(BLOCKS_PATH, response).await?;
        Ok(BlockId(submitted.block_id))
    }

    /// Fetch metadata for a submitted block
    /// (`GET /api/core/v2/blocks/{id}/metadata`).
    pub async fn block_metadata(&self, id: &BlockId) -> ApiResult<BlockMetadata> {
        let path = format!("{}/{}/metadata", BLOCKS_PATH, id.0);
        self.get_json(&path).await
    }

    /// Fetch one output (`GET /api/core/v2/outputs/{id}`).
    pub async fn output(&self, output_id: &str) -> ApiResult<OutputResponse> {
        let path = format!("api/core/v2/outputs/{}", output_id);
        self.get_json(&path).await
    }

    /// List basic output ids held by an address
    /// (`GET /api/indexer/v1/outputs/basic?address=…`).
    pub async fn basic_output_ids(&self, address: &str) -> ApiResult<OutputIdsPage> {
        let mut url = self.endpoint(BASIC_OUTPUTS_PATH)?;
        url.query_pairs_mut().append_pair("address", address);
        let response = self.http.get(url).send().await?;
        decode_json(BASIC_OUTPUTS_PATH, response).await
    }

    /// Check that the node is reachable and reports itself healthy.
    pub async fn is_healthy(&self) -> bool {
        match self.info().await {
            Ok(info) => info.status.is_healthy,
            Err(e) => {
                tracing::warn!(error = %e, "Node health probe failed");
                false
            }
        }
    }

    /// Base URL this client points at.
    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .finish()
    }
}

pub(crate) fn parse_base_url(raw: &str) -> ApiResult<Url> {
    // A base URL without a trailing slash would swallow its last path
    // segment on join().
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) async fn decode_json<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    response.json::<T>().await.map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = NodeConfig::default();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:14265/");
    }

    #[test]
    fn test_base_url_normalization() {
        let with_slash = parse_base_url("http://localhost:14265/").unwrap();
        let without = parse_base_url("http://localhost:14265").unwrap();
        assert_eq!(with_slash, without);

        let joined = without.join(INFO_PATH).unwrap();
        assert_eq!(joined.as_str(), "http://localhost:14265/api/core/v2/info");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = NodeConfig {
            url: "::not-a-url::".to_string(),
            ..NodeConfig::default()
        };
        let result = ApiClient::new(&config);
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }

    #[test]
    fn test_output_ids_query_encoding() {
        let client = ApiClient::new(&NodeConfig::default()).unwrap();
        let mut url = client.endpoint(BASIC_OUTPUTS_PATH).unwrap();
        url.query_pairs_mut().append_pair("address", "rms1qtest");
        assert_eq!(
            url.as_str(),
            "http://localhost:14265/api/indexer/v1/outputs/basic?address=rms1qtest"
        );
    }
}
