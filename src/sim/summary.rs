//! Post-hoc aggregates computed from a finished dispatch run.

use std::fmt;

use serde::Serialize;

use super::types::{Decision, DispatchOutcome};

/// Aggregate figures derived from a complete dispatch run.
///
/// Computed from the decision records rather than tracked during the run, so
/// the summary always agrees with the per-step data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchSummary {
    /// Number of dispatch intervals.
    pub steps: usize,
    /// Intervals decided as `Sell`.
    pub sell_count: usize,
    /// Intervals decided as `Hoard`.
    pub hoard_count: usize,
    /// Intervals decided as `SellExcess`.
    pub sell_excess_count: usize,
    /// Total energy sold (demand sales plus excess).
    pub sold_total: f64,
    /// Energy sold because storage was full.
    pub excess_total: f64,
    /// Total energy moved into storage on `Hoard` steps.
    pub hoarded_total: f64,
    /// Storage level after the last interval.
    pub final_storage: f64,
    /// Highest storage level observed after any interval.
    pub peak_storage: f64,
    /// Peak storage as a fraction of capacity.
    pub storage_utilisation: f64,
    /// Sum of production over all intervals.
    pub total_production: f64,
    /// Sum of demand over all intervals.
    pub total_demand: f64,
    /// Number of storage postcondition warnings.
    pub warning_count: usize,
}

impl DispatchSummary {
    /// Computes the summary for `outcome`.
    ///
    /// # Arguments
    ///
    /// * `outcome` - Complete dispatch run
    /// * `storage_capacity` - Capacity used for the run, for utilisation
    pub fn from_outcome(outcome: &DispatchOutcome, storage_capacity: f64) -> Self {
        let mut sell_count = 0;
        let mut hoard_count = 0;
        let mut sell_excess_count = 0;
        let mut excess_total = 0.0;
        let mut peak_storage = 0.0_f64;
        let mut total_production = 0.0;
        let mut total_demand = 0.0;

        for r in &outcome.records {
            match r.decision {
                Decision::Sell => sell_count += 1,
                Decision::Hoard => hoard_count += 1,
                Decision::SellExcess => sell_excess_count += 1,
            }
            excess_total += r.excess;
            peak_storage = peak_storage.max(r.stored_after);
            total_production += r.production;
            total_demand += r.demand;
        }

        let storage_utilisation = if storage_capacity > 0.0 {
            peak_storage / storage_capacity
        } else {
            0.0
        };

        Self {
            steps: outcome.records.len(),
            sell_count,
            hoard_count,
            sell_excess_count,
            sold_total: outcome.sold_total,
            excess_total,
            hoarded_total: outcome.hoarded_total,
            final_storage: outcome.final_storage,
            peak_storage,
            storage_utilisation,
            total_production,
            total_demand,
            warning_count: outcome.warnings.len(),
        }
    }
}

impl fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Summary ---")?;
        writeln!(f, "Steps:                 {}", self.steps)?;
        writeln!(
            f,
            "Decisions:             sell={} hoard={} sell_excess={}",
            self.sell_count, self.hoard_count, self.sell_excess_count
        )?;
        writeln!(f, "Total sold energy:     {:.3} MWh", self.sold_total)?;
        writeln!(f, "Excess sold energy:    {:.3} MWh", self.excess_total)?;
        writeln!(f, "Total hoarded energy:  {:.3} MWh", self.hoarded_total)?;
        writeln!(f, "Final storage:         {:.3} MWh", self.final_storage)?;
        writeln!(
            f,
            "Peak storage:          {:.3} MWh ({:.1}% of capacity)",
            self.peak_storage,
            self.storage_utilisation * 100.0
        )?;
        writeln!(f, "Total production:      {:.3} MWh", self.total_production)?;
        writeln!(f, "Total demand:          {:.3} MWh", self.total_demand)?;
        write!(f, "Storage warnings:      {}", self.warning_count)
    }
}
