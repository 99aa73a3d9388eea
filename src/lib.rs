//! Dispatch simulator for a small solar, wind, and run-of-river hydro plant
//! with bounded energy storage.

/// REST API over a finished run.
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
pub mod io;
pub mod profiles;
pub mod runner;
/// Dispatch engine, thresholds, and summaries.
pub mod sim;

pub use error::{DispatchError, DispatchResult};
pub use sim::engine::{DispatchEngine, run};
pub use sim::types::{Decision, DecisionRecord, DispatchOutcome};
