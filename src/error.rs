//! Error types for dispatch runs.

use thiserror::Error;

/// Names one of the aligned input sequences in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Price,
    Demand,
    Production,
}

impl Series {
    pub fn as_str(self) -> &'static str {
        match self {
            Series::Price => "price",
            Series::Demand => "demand",
            Series::Production => "production",
        }
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal precondition failures. The engine never substitutes defaults for
/// invalid input, so every variant aborts the run before step 0.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// Input sequences have different lengths.
    #[error("length mismatch: price={prices}, demand={demands}, production={productions}")]
    LengthMismatch {
        prices: usize,
        demands: usize,
        productions: usize,
    },

    /// A production source has a different length from the first source.
    #[error("source {source_name} has {found} intervals, expected {expected}")]
    SourceLengthMismatch {
        source_name: &'static str,
        expected: usize,
        found: usize,
    },

    /// Non-positive or non-finite capacity, or non-finite thresholds.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Demand or production below zero.
    #[error("negative {series} at index {index}: {value}")]
    NegativeInput {
        series: Series,
        index: usize,
        value: f64,
    },

    /// NaN or infinite value in any sequence.
    #[error("non-finite {series} at index {index}")]
    NonFiniteInput { series: Series, index: usize },

    /// A statistic was requested over an empty sequence.
    #[error("cannot compute {0} over an empty series")]
    EmptySeries(&'static str),
}

/// Convenience alias for dispatch results.
pub type DispatchResult<T> = Result<T, DispatchError>;
