//! Concrete user behaviors driving the node.
//!
//! # Data Flow
//! ```text
//! Runner factory (one behavior per user id)
//!     → blocks.rs     fire-and-forget submissions
//!     → confirmed.rs  submissions tracked to inclusion
//!     → queries.rs    read-endpoint mix
//!     → funding.rs    faucet enqueue + balance wait
//! all of them → workflow/ + metrics::ChannelSink
//! ```
//!
//! # Design Decisions
//! - Every behavior builds and owns its own clients in its constructor
//! - Measured failures flow to the sink, never out of iteration()
//! - Payload data is random per block so submissions never deduplicate

pub mod blocks;
pub mod confirmed;
pub mod funding;
pub mod queries;

pub use blocks::BlocksUser;
pub use confirmed::ConfirmedUser;
pub use funding::FundingUser;
pub use queries::QueriesUser;

/// Random data section for a tagged-data block.
pub(crate) fn random_payload(len: usize) -> Vec<u8> {
    (0..len).map(|_| fastrand::u8(..)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_payload_length() {
        assert_eq!(random_payload(0).len(), 0);
        assert_eq!(random_payload(64).len(), 64);
    }
}
