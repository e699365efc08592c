//! Faucet client and funding-wait helper.
//!
//! # Responsibilities
//! - Enqueue funding requests for an address
//! - Wait for funds to land by polling the node's indexer

use std::time::Duration;

use reqwest::Url;

use crate::config::schema::FaucetConfig;
use crate::node::client::{decode_json, parse_base_url, ApiClient};
use crate::node::types::{ApiError, ApiResult, FaucetEnqueueResponse};

const ENQUEUE_PATH: &str = "api/enqueue";

/// Client for a faucet's enqueue endpoint.
#[derive(Clone)]
pub struct FaucetClient {
    http: reqwest::Client,
    base: Url,
}

impl FaucetClient {
    /// Create a new faucet client.
    pub fn new(config: &FaucetConfig) -> ApiResult<Self> {
        let base = parse_base_url(&config.url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, base })
    }

    /// Ask the faucet to fund an address (`POST /api/enqueue`).
    pub async fn enqueue(&self, address: &str) -> ApiResult<FaucetEnqueueResponse> {
        let url = self.base.join(ENQUEUE_PATH).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base, ENQUEUE_PATH),
            reason: e.to_string(),
        })?;
        let body = serde_json::json!({ "address": address });
        let response = self.http.post(url).json(&body).send().await?;
        decode_json(ENQUEUE_PATH, response).await
    }
}

impl std::fmt::Debug for FaucetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaucetClient")
            .field("base", &self.base.as_str())
            .finish()
    }
}

/// Poll the indexer until `address` holds at least one basic output.
///
/// Transient query errors are absorbed and consume one attempt each, the
/// same bounded shape the confirmation poller uses.
///
/// # Returns
/// The number of balance checks performed before funds were observed.
pub async fn wait_until_funded(
    node: &ApiClient,
    address: &str,
    poll_budget: u32,
    poll_interval: Duration,
) -> ApiResult<u32> {
    let mut attempts = 0u32;
    while attempts < poll_budget {
        attempts += 1;
        match node.basic_output_ids(address).await {
            Ok(page) if !page.items.is_empty() => {
                tracing::debug!(address, attempts, outputs = page.items.len(), "Funds observed");
                return Ok(attempts);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(address, attempt = attempts, error = %e, "Balance check failed");
            }
        }
        if attempts < poll_budget {
            tokio::time::sleep(poll_interval).await;
        }
    }
    Err(ApiError::FundingTimeout { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faucet_client_creation() {
        let client = FaucetClient::new(&FaucetConfig::default()).unwrap();
        assert_eq!(client.base.as_str(), "http://localhost:8091/");
    }

    #[test]
    fn test_timeout_comes_from_config() {
        let mut config = FaucetConfig::default();
        config.request_timeout_secs = 3;
        assert!(FaucetClient::new(&config).is_ok());
    }

    #[test]
    fn test_enqueue_url() {
        let client = FaucetClient::new(&FaucetConfig::default()).unwrap();
        let url = client.base.join(ENQUEUE_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8091/api/enqueue");
    }
}
