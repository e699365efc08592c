//! Submission-and-confirmation workflow subsystem.
//!
//! # Data Flow
//! ```text
//! scenario iteration
//!     → tracker.rs submit()            (POST block, capture WorkItem)
//!     → tracker.rs await_confirmation() (bounded inclusion polling)
//!     → tracker.rs report()            (WorkItem → one OutcomeEvent → sink)
//! ```
//!
//! # Design Decisions
//! - A Work Item is consumed by value when reported; the type system
//!   enforces one event per item
//! - Query errors during polling are transient non-results: absorbed,
//!   debug-logged, each consuming one retry attempt
//! - Only two polling exits exist: inclusion observed or budget exhausted
//! - Cancellation mid-poll abandons the item without reporting

pub mod outcome;
pub mod tracker;
pub mod work_item;

pub use outcome::OutcomeEvent;
pub use tracker::{await_confirmation, report, run_tracked, submit};
pub use work_item::{WorkItem, WorkStatus};
