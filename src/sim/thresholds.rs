//! Sell thresholds derived from the price and demand series.
//!
//! Percentile thresholds are calibrated over the full horizon before the
//! first step runs, so a percentile-driven run is retrospective rather than
//! a causal online controller. [`ThresholdPolicy::Fixed`] is the online
//! alternative.

use serde::Serialize;

use crate::error::{DispatchError, DispatchResult};

use super::series::AlignedSeries;

/// Price and demand cutoffs, frozen for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub price: f64,
    pub demand: f64,
}

/// How thresholds are obtained for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdPolicy {
    /// Quantiles (0.0-1.0) of the full price and demand series.
    Percentile { price: f64, demand: f64 },
    /// Pre-configured values.
    Fixed { price: f64, demand: f64 },
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        ThresholdPolicy::Percentile {
            price: 0.8,
            demand: 0.9,
        }
    }
}

impl ThresholdPolicy {
    /// Resolves the policy against a validated series.
    ///
    /// # Errors
    ///
    /// Propagates [`percentile`] errors; fixed thresholds must be finite.
    pub fn resolve(&self, series: &AlignedSeries) -> DispatchResult<Thresholds> {
        match *self {
            ThresholdPolicy::Percentile { price, demand } => Ok(Thresholds {
                price: percentile(series.prices(), price)?,
                demand: percentile(series.demands(), demand)?,
            }),
            ThresholdPolicy::Fixed { price, demand } => {
                if !price.is_finite() || !demand.is_finite() {
                    return Err(DispatchError::InvalidConfig(format!(
                        "fixed thresholds must be finite, got price={price}, demand={demand}"
                    )));
                }
                Ok(Thresholds { price, demand })
            }
        }
    }
}

/// Quantile `q` of `values` with linear interpolation between closest ranks.
///
/// Uses `rank = q * (n - 1)`, so `q = 0.0` is the minimum and `q = 1.0` the
/// maximum.
///
/// # Errors
///
/// * `EmptySeries` if `values` is empty
/// * `InvalidConfig` if `q` is outside `[0, 1]` or any value is NaN
pub fn percentile(values: &[f64], q: f64) -> DispatchResult<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(DispatchError::InvalidConfig(format!(
            "percentile must be in [0, 1], got {q}"
        )));
    }
    if values.is_empty() {
        return Err(DispatchError::EmptySeries("percentile"));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(DispatchError::InvalidConfig(
            "percentile input contains NaN".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}
