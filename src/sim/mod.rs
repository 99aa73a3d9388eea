pub mod engine;
/// Input alignment and validation.
pub mod series;
pub mod state;
pub mod summary;
/// Percentile and fixed sell thresholds.
pub mod thresholds;
pub mod types;
