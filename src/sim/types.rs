//! Core dispatch types: per-step inputs, decisions, and run outcomes.

use std::fmt;

use serde::Serialize;

/// Aligned inputs for one interval.
///
/// Produced by iterating an [`AlignedSeries`](super::series::AlignedSeries),
/// which guarantees demand and production are finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStep {
    /// Interval index.
    pub index: usize,
    /// Market price (currency per energy unit, may be negative).
    pub price: f64,
    /// Demand for this interval (energy units, >= 0).
    pub demand: f64,
    /// Total plant production for this interval (energy units, >= 0).
    pub production: f64,
}

/// Dispatch action chosen for one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Decision {
    /// Price and demand both at or above threshold: sell up to demand.
    Sell,
    /// Production fits in storage and is kept.
    Hoard,
    /// Storage is full: the overflow is sold.
    SellExcess,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Sell, Decision::Hoard, Decision::SellExcess];

    /// Report label.
    pub fn label(self) -> &'static str {
        match self {
            Decision::Sell => "Sell",
            Decision::Hoard => "Hoard",
            Decision::SellExcess => "Sell Excess",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete record of one dispatch interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    /// Interval index, aligned with the input sequences.
    pub index: usize,
    pub price: f64,
    pub demand: f64,
    pub production: f64,
    pub decision: Decision,
    /// Energy sold against demand on the `Sell` branch.
    pub sold: f64,
    /// Energy added to storage on the `Hoard` branch.
    pub hoarded: f64,
    /// Energy sold because the store was full.
    pub excess: f64,
    /// Storage level after this interval.
    pub stored_after: f64,
}

impl fmt::Display for DecisionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "i={:>4} | price={:>8.2}  demand={:>8.2}  prod={:>8.2} | {:<11} \
             sold={:.2}  hoarded={:.2}  excess={:.2} | stored={:.2}",
            self.index,
            self.price,
            self.demand,
            self.production,
            self.decision.label(),
            self.sold,
            self.hoarded,
            self.excess,
            self.stored_after,
        )
    }
}

/// Storage postcondition violation found after a step.
///
/// The sell formula keeps storage inside `[0, capacity]`; these are reported
/// instead of clamped so a regression cannot corrupt totals silently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StorageWarning {
    BelowZero { index: usize, stored_energy: f64 },
    AboveCapacity { index: usize, stored_energy: f64 },
}

impl fmt::Display for StorageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageWarning::BelowZero {
                index,
                stored_energy,
            } => write!(f, "storage below zero at i={index}: {stored_energy}"),
            StorageWarning::AboveCapacity {
                index,
                stored_energy,
            } => write!(f, "storage above capacity at i={index}: {stored_energy}"),
        }
    }
}

/// Result of a full dispatch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchOutcome {
    /// One record per input interval, index-aligned.
    pub records: Vec<DecisionRecord>,
    /// Total energy sold, on demand and as excess.
    pub sold_total: f64,
    /// Total energy moved into storage on `Hoard` steps.
    pub hoarded_total: f64,
    /// Storage level after the final step.
    pub final_storage: f64,
    /// Storage postcondition violations, empty on a healthy run.
    pub warnings: Vec<StorageWarning>,
}

impl DispatchOutcome {
    /// Decision labels in step order.
    pub fn decisions(&self) -> Vec<Decision> {
        self.records.iter().map(|r| r.decision).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_report_vocabulary() {
        assert_eq!(Decision::Sell.label(), "Sell");
        assert_eq!(Decision::Hoard.label(), "Hoard");
        assert_eq!(Decision::SellExcess.label(), "Sell Excess");
    }

    #[test]
    fn record_display_does_not_panic() {
        let r = DecisionRecord {
            index: 3,
            price: -12.5,
            demand: 40.0,
            production: 18.2,
            decision: Decision::SellExcess,
            sold: 0.0,
            hoarded: 0.0,
            excess: 8.2,
            stored_after: 1000.0,
        };
        let s = format!("{r}");
        assert!(s.contains("Sell Excess"));
    }

    #[test]
    fn warning_display_names_index() {
        let w = StorageWarning::BelowZero {
            index: 7,
            stored_energy: -0.5,
        };
        assert!(w.to_string().contains("i=7"));
    }
}
