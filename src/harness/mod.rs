//! Load-harness subsystem: simulated users and run supervision.
//!
//! # Data Flow
//! ```text
//! Runner::run(factory)
//!     → one Behavior per user (own client, own state)
//!     → drive_user loop: iteration → sampled wait → iteration …
//!     → run bound elapses or ctrl-c → Shutdown broadcast
//!     → users wind down (current iterations abandoned), JoinSet drained
//! ```
//!
//! # Design Decisions
//! - Users are tokio tasks in a JoinSet, never detached threads
//! - All pauses are async sleeps; a waiting user costs no thread
//! - Shutdown is cooperative: select! against the broadcast channel
//! - Drain has a deadline; stuck users are aborted after it

pub mod runner;
pub mod shutdown;
pub mod user;
pub mod wait;

pub use runner::{RunBound, RunReport, Runner};
pub use shutdown::Shutdown;
pub use user::{Behavior, HarnessError, UserReport};
pub use wait::WaitTime;
