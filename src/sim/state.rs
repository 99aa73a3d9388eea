//! Mutable storage and accumulator state carried between dispatch steps.

/// Storage level and running totals for a single run.
///
/// Created fresh for every run and threaded through the step loop; nothing
/// outside the engine mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchState {
    /// Energy currently held in storage.
    pub stored_energy: f64,
    /// Cumulative energy sold, on demand and as excess (non-decreasing).
    pub sold_energy: f64,
    /// Cumulative energy moved into storage on `Hoard` steps (non-decreasing).
    pub hoarded_energy: f64,
}

impl DispatchState {
    /// Empty storage, zero totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the storage level lies in `[0, capacity]`.
    pub fn within_bounds(&self, capacity: f64) -> bool {
        (0.0..=capacity).contains(&self.stored_energy)
    }
}
