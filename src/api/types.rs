//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::profiles::{Horizon, SourceTotal};
use crate::sim::summary::DispatchSummary;
use crate::sim::thresholds::Thresholds;
use crate::sim::types::{DecisionRecord, StorageWarning};

/// Combined state response for a finished run.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub horizon: Horizon,
    pub storage_capacity: f64,
    pub thresholds: Thresholds,
    pub summary: DispatchSummary,
    pub production_by_source: Vec<SourceTotal>,
    pub warnings: Vec<StorageWarning>,
    /// Record of the last interval, `None` for an empty run.
    pub latest_decision: Option<DecisionRecord>,
}

/// Optional range query parameters for the decisions endpoint.
#[derive(Debug, Deserialize)]
pub struct DecisionQuery {
    /// Start index (inclusive).
    pub from: Option<usize>,
    /// End index (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
