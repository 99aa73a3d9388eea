use rand::{SeedableRng, rngs::StdRng};

use super::types::{Horizon, Profile, gaussian_noise};

/// Run-of-river hydro output: a steady base with inflow noise.
#[derive(Debug, Clone)]
pub struct Hydro {
    /// Mean output (MW).
    pub base_mw: f64,
    /// Output noise standard deviation (MW).
    pub noise_std: f64,
    horizon: Horizon,
    rng: StdRng,
}

impl Hydro {
    pub fn new(base_mw: f64, noise_std: f64, horizon: &Horizon, seed: u64) -> Self {
        Self {
            base_mw: base_mw.max(0.0),
            noise_std: noise_std.max(0.0),
            horizon: *horizon,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Profile for Hydro {
    fn value(&mut self, _t: usize) -> f64 {
        let mw = self.base_mw + gaussian_noise(&mut self.rng, self.noise_std);
        mw.max(0.0) * self.horizon.dt_hours
    }

    fn profile_type(&self) -> &'static str {
        "Hydro"
    }
}
