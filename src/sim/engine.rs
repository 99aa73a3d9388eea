//! Dispatch engine: sequential sell/hoard decisions over a bounded store.

use tracing::{debug, info, warn};

use crate::error::{DispatchError, DispatchResult};

use super::series::AlignedSeries;
use super::state::DispatchState;
use super::thresholds::Thresholds;
use super::types::{Decision, DecisionRecord, DispatchOutcome, StorageWarning, TimeStep};

/// Default storage capacity (energy units).
pub const DEFAULT_STORAGE_CAPACITY: f64 = 1000.0;

/// Dispatch engine holding the run configuration.
///
/// The engine itself is immutable: storage and totals live in a
/// [`DispatchState`] created per run, so repeated runs on the same input
/// produce identical outcomes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchEngine {
    storage_capacity: f64,
    thresholds: Thresholds,
}

impl DispatchEngine {
    /// Creates a new engine.
    ///
    /// # Arguments
    ///
    /// * `storage_capacity` - Maximum storable energy (finite, > 0)
    /// * `thresholds` - Price and demand cutoffs for the sell branch (finite)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a non-positive or non-finite capacity or
    /// non-finite thresholds.
    pub fn new(storage_capacity: f64, thresholds: Thresholds) -> DispatchResult<Self> {
        if !storage_capacity.is_finite() || storage_capacity <= 0.0 {
            return Err(DispatchError::InvalidConfig(format!(
                "storage capacity must be finite and > 0, got {storage_capacity}"
            )));
        }
        if !thresholds.price.is_finite() || !thresholds.demand.is_finite() {
            return Err(DispatchError::InvalidConfig(format!(
                "thresholds must be finite, got price={}, demand={}",
                thresholds.price, thresholds.demand
            )));
        }
        Ok(Self {
            storage_capacity,
            thresholds,
        })
    }

    pub fn storage_capacity(&self) -> f64 {
        self.storage_capacity
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Decides one interval and updates `state`.
    ///
    /// Production joins the stored energy first. On the sell branch up to
    /// `demand` is sold from that pool; otherwise the pool is kept, and
    /// anything above capacity is sold as excess.
    ///
    /// A `Sell` record can carry a non-zero `excess`: when the pool left
    /// after meeting demand still exceeds capacity, the overflow is sold in
    /// the same interval and both amounts are added to `sold_energy`.
    ///
    /// # Returns
    ///
    /// The record for this interval. Any storage postcondition violation is
    /// appended to `warnings`.
    pub fn step(
        &self,
        state: &mut DispatchState,
        input: &TimeStep,
        warnings: &mut Vec<StorageWarning>,
    ) -> DecisionRecord {
        let capacity = self.storage_capacity;
        let available = state.stored_energy + input.production;

        let (decision, sold, hoarded, excess) = if input.price >= self.thresholds.price
            && input.demand >= self.thresholds.demand
        {
            let sell_amount = available.min(input.demand);
            let remaining = available - sell_amount;
            let stored = remaining.min(capacity);
            let excess = remaining - stored;
            state.stored_energy = stored;
            state.sold_energy += sell_amount + excess;
            (Decision::Sell, sell_amount, 0.0, excess)
        } else if available <= capacity {
            state.stored_energy = available;
            state.hoarded_energy += input.production;
            (Decision::Hoard, 0.0, input.production, 0.0)
        } else {
            let excess = available - capacity;
            state.stored_energy = capacity;
            state.sold_energy += excess;
            (Decision::SellExcess, 0.0, 0.0, excess)
        };

        if !state.within_bounds(capacity) {
            let index = input.index;
            let stored_energy = state.stored_energy;
            warnings.push(if stored_energy < 0.0 {
                StorageWarning::BelowZero {
                    index,
                    stored_energy,
                }
            } else {
                StorageWarning::AboveCapacity {
                    index,
                    stored_energy,
                }
            });
        }

        debug!(
            index = input.index,
            decision = decision.label(),
            sold,
            hoarded,
            excess,
            stored = state.stored_energy,
            "dispatch step"
        );

        DecisionRecord {
            index: input.index,
            price: input.price,
            demand: input.demand,
            production: input.production,
            decision,
            sold,
            hoarded,
            excess,
            stored_after: state.stored_energy,
        }
    }

    /// Runs every step of `series` from an empty store.
    pub fn run(&self, series: &AlignedSeries) -> DispatchOutcome {
        info!(
            steps = series.len(),
            capacity = self.storage_capacity,
            price_threshold = self.thresholds.price,
            demand_threshold = self.thresholds.demand,
            "starting dispatch run"
        );

        let mut state = DispatchState::new();
        let mut warnings = Vec::new();
        let mut records = Vec::with_capacity(series.len());
        for input in series.steps() {
            records.push(self.step(&mut state, &input, &mut warnings));
        }

        for w in &warnings {
            warn!("{w}");
        }
        info!(
            sold = state.sold_energy,
            hoarded = state.hoarded_energy,
            final_storage = state.stored_energy,
            warnings = warnings.len(),
            "dispatch run finished"
        );

        DispatchOutcome {
            records,
            sold_total: state.sold_energy,
            hoarded_total: state.hoarded_energy,
            final_storage: state.stored_energy,
            warnings,
        }
    }
}

/// Validates raw sequences and runs the engine over them.
///
/// # Arguments
///
/// * `prices`, `demands`, `productions` - Equal-length aligned sequences
/// * `storage_capacity` - Maximum storable energy
/// * `price_threshold`, `demand_threshold` - Sell-branch cutoffs
///
/// # Errors
///
/// Fails before any step executes with `LengthMismatch`, `InvalidConfig`,
/// `NegativeInput`, or `NonFiniteInput`.
pub fn run(
    prices: &[f64],
    demands: &[f64],
    productions: &[f64],
    storage_capacity: f64,
    price_threshold: f64,
    demand_threshold: f64,
) -> DispatchResult<DispatchOutcome> {
    let engine = DispatchEngine::new(
        storage_capacity,
        Thresholds {
            price: price_threshold,
            demand: demand_threshold,
        },
    )?;
    let series = AlignedSeries::from_slices(prices, demands, productions)?;
    Ok(engine.run(&series))
}
