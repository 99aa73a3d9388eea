//! Alignment and validation of the price, demand, and production sequences.

use crate::error::{DispatchError, DispatchResult, Series};

use super::types::TimeStep;

/// Three index-aligned sequences that passed validation.
///
/// Positional indexing over independently produced vectors would silently
/// truncate to the shortest one; constructing an `AlignedSeries` fails fast
/// instead.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    prices: Vec<f64>,
    demands: Vec<f64>,
    productions: Vec<f64>,
}

impl AlignedSeries {
    /// Validates and aligns the inputs.
    ///
    /// # Errors
    ///
    /// * `LengthMismatch` if the three lengths differ
    /// * `NonFiniteInput` for any NaN or infinite value
    /// * `NegativeInput` for negative demand or production (price may be negative)
    pub fn new(prices: Vec<f64>, demands: Vec<f64>, productions: Vec<f64>) -> DispatchResult<Self> {
        if prices.len() != demands.len() || prices.len() != productions.len() {
            return Err(DispatchError::LengthMismatch {
                prices: prices.len(),
                demands: demands.len(),
                productions: productions.len(),
            });
        }

        check_finite(Series::Price, &prices)?;
        check_finite(Series::Demand, &demands)?;
        check_finite(Series::Production, &productions)?;
        check_non_negative(Series::Demand, &demands)?;
        check_non_negative(Series::Production, &productions)?;

        Ok(Self {
            prices,
            demands,
            productions,
        })
    }

    /// Borrowing variant of [`AlignedSeries::new`].
    ///
    /// # Errors
    ///
    /// Same as [`AlignedSeries::new`].
    pub fn from_slices(
        prices: &[f64],
        demands: &[f64],
        productions: &[f64],
    ) -> DispatchResult<Self> {
        Self::new(prices.to_vec(), demands.to_vec(), productions.to_vec())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn demands(&self) -> &[f64] {
        &self.demands
    }

    pub fn productions(&self) -> &[f64] {
        &self.productions
    }

    /// Iterates the aligned steps in index order.
    pub fn steps(&self) -> impl Iterator<Item = TimeStep> + '_ {
        self.prices
            .iter()
            .zip(&self.demands)
            .zip(&self.productions)
            .enumerate()
            .map(|(index, ((&price, &demand), &production))| TimeStep {
                index,
                price,
                demand,
                production,
            })
    }
}

fn check_finite(series: Series, values: &[f64]) -> DispatchResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DispatchError::NonFiniteInput { series, index }),
        None => Ok(()),
    }
}

fn check_non_negative(series: Series, values: &[f64]) -> DispatchResult<()> {
    match values.iter().enumerate().find(|(_, v)| **v < 0.0) {
        Some((index, &value)) => Err(DispatchError::NegativeInput {
            series,
            index,
            value,
        }),
        None => Ok(()),
    }
}
