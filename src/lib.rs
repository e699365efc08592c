//! Load harness for distributed-ledger node HTTP APIs.

pub mod config;
pub mod harness;
pub mod metrics;
pub mod node;
pub mod scenario;
pub mod workflow;

pub use config::schema::LoadConfig;
pub use harness::Runner;
pub use workflow::{OutcomeEvent, WorkItem, WorkStatus};
