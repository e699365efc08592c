//! Node and faucet API integration subsystem.
//!
//! # Data Flow
//! ```text
//! LoadConfig (node URL, faucet URL, timeouts)
//!     → client.rs (core + indexer API requests)
//!     → faucet.rs (funding enqueue, balance wait)
//!     → types.rs (wire shapes, ApiError)
//! ```
//!
//! # Design Decisions
//! - Endpoints are consumed, never reimplemented; the node owns the
//!   protocol, proof-of-work, and signing
//! - Every request carries the configured timeout
//! - Each simulated user owns its own client instance

pub mod client;
pub mod faucet;
pub mod types;

pub use client::ApiClient;
pub use faucet::{wait_until_funded, FaucetClient};
pub use types::{ApiError, ApiResult, BlockId, BlockMetadata, InclusionState, NodeInfo};
