//! # Chronos Client
//!
//! This crate provides an async Rust client for the Chronos distributed job
//! scheduler, plus a small harness for running chains of dependent calls
//! against a live server.
//!
//! ## Features
//!
//! - **Facade**: Jobs, tasks, dependency graphs, metrics and ping, each call
//!   addressed to its own `(host, port, secure)` endpoint
//! - **Deferred results**: Calls run in the background; callers wait with an
//!   explicit bound
//! - **Harness**: Strictly ordered steps with a per-step timeout and
//!   care-flagged success evaluation
//!
//! ## Quick Start
//!
//! ### Calling the scheduler
//!
//! ```rust,no_run
//! use chronos_client::chronos;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut jobs = chronos::global()?.scheduler.jobs.list("localhost", 4400, false)?;
//!
//!     for job in jobs.retrieve(Duration::from_secs(4)).await? {
//!         println!("{}", job);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Verifying a sequence of calls
//!
//! ```rust,no_run
//! use chronos_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = chronos::global()?;
//!     let job = Job::scheduled("nightly", "echo hi", "R/2030-01-01T00:00:00Z/P1D");
//!     let name = job.name.clone();
//!
//!     let steps = vec![
//!         Step::do_not_check(move || client.scheduler.jobs.delete("localhost", 4400, false, "nightly")),
//!         Step::check(move || client.scheduler.jobs.submit("localhost", 4400, false, &job)),
//!         Step::check(move || client.scheduler.jobs.delete("localhost", 4400, false, &name)),
//!     ];
//!
//!     Harness::default().run_and_evaluate(steps).await?;
//!     Ok(())
//! }
//! ```

pub mod chronos;
pub mod config;
pub mod debug;
pub mod deferred;
pub mod error;
pub mod evaluate;
pub mod harness;
pub mod metrics;
pub mod model;
pub mod response;
pub mod scheduler;
pub mod target;
mod transport;

pub use chronos::Chronos;
pub use config::ClientDefaults;
pub use deferred::Deferred;
pub use error::{Result, SdkError, TransportError};
pub use evaluate::{all_success, SuccessEvaluationError};
pub use harness::{Checked, Harness, HarnessError, SequenceAborted, Step};
pub use response::{AnyResponse, ServerResponse};
pub use target::ConnectionTarget;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chronos::{self, Chronos};
    pub use crate::config::ClientDefaults;
    pub use crate::deferred::Deferred;
    pub use crate::error::SdkError;
    pub use crate::evaluate::all_success;
    pub use crate::harness::{Checked, Harness, Step};
    pub use crate::model::{Acknowledgement, Job, ServerMetrics};
    pub use crate::response::{AnyResponse, ServerResponse};
    pub use crate::target::ConnectionTarget;
}
