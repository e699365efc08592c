//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoadConfig (validated, immutable)
//!     → CLI flag overrides applied, re-validated
//!     → handed to the runner and scenarios
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a run starts; there is no reload
//! - All fields have defaults so an empty file describes a sane local run
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ConfirmationConfig;
pub use schema::FaucetConfig;
pub use schema::LoadConfig;
pub use schema::NodeConfig;
pub use schema::WorkloadConfig;
