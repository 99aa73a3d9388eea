//! Production aggregation across plant sources.

use serde::Serialize;

use crate::error::{DispatchError, DispatchResult, Series};

/// Per-source production sequence (energy per interval).
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Total energy contributed by one source over the horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceTotal {
    pub name: &'static str,
    pub energy: f64,
}

/// Aggregated plant production.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantProduction {
    /// Sum over all sources per interval.
    pub total: Vec<f64>,
    /// Per-source totals in input order.
    pub by_source: Vec<SourceTotal>,
}

impl PlantProduction {
    /// Total energy over all sources and intervals.
    pub fn total_energy(&self) -> f64 {
        self.by_source.iter().map(|s| s.energy).sum()
    }
}

/// Sums per-source sequences into a single production sequence.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductionAggregator;

impl ProductionAggregator {
    /// Aggregates `sources` element-wise.
    ///
    /// # Errors
    ///
    /// * `SourceLengthMismatch` if a source differs in length from the first
    /// * `NonFiniteInput` / `NegativeInput` for invalid production values
    pub fn aggregate(&self, sources: &[SourceSeries]) -> DispatchResult<PlantProduction> {
        let len = sources.first().map_or(0, |s| s.values.len());
        if let Some(bad) = sources.iter().find(|s| s.values.len() != len) {
            return Err(DispatchError::SourceLengthMismatch {
                source_name: bad.name,
                expected: len,
                found: bad.values.len(),
            });
        }

        let mut total = vec![0.0; len];
        let mut by_source = Vec::with_capacity(sources.len());
        for source in sources {
            for (index, &v) in source.values.iter().enumerate() {
                if !v.is_finite() {
                    return Err(DispatchError::NonFiniteInput {
                        series: Series::Production,
                        index,
                    });
                }
                if v < 0.0 {
                    return Err(DispatchError::NegativeInput {
                        series: Series::Production,
                        index,
                        value: v,
                    });
                }
                total[index] += v;
            }
            by_source.push(SourceTotal {
                name: source.name,
                energy: source.values.iter().sum(),
            });
        }

        Ok(PlantProduction { total, by_source })
    }
}
