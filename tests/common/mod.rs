//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dispatch_sim::config::PlantConfig;
use dispatch_sim::sim::thresholds::Thresholds;

/// Price and demand cutoffs used by the hand-built scenarios.
pub const PRICE_THRESHOLD: f64 = 50.0;
pub const DEMAND_THRESHOLD: f64 = 3.0;

pub fn thresholds() -> Thresholds {
    Thresholds {
        price: PRICE_THRESHOLD,
        demand: DEMAND_THRESHOLD,
    }
}

/// Baseline plant shortened to a single day.
pub fn one_day_config() -> PlantConfig {
    let mut cfg = PlantConfig::baseline();
    cfg.simulation.days = 1;
    cfg
}

/// Random aligned inputs: `(prices, demands, productions)`.
///
/// Prices range over `[-20, 120)` so both threshold outcomes occur; demand
/// and production are non-negative.
pub fn random_inputs(seed: u64, len: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut prices = Vec::with_capacity(len);
    let mut demands = Vec::with_capacity(len);
    let mut productions = Vec::with_capacity(len);
    for _ in 0..len {
        prices.push(rng.random::<f64>() * 140.0 - 20.0);
        demands.push(rng.random::<f64>() * 8.0);
        productions.push(rng.random::<f64>() * 12.0);
    }
    (prices, demands, productions)
}
