use rand::{SeedableRng, rngs::StdRng};

use super::types::{Horizon, Profile, gaussian_noise};

/// Wind farm output driven by an AR(1) capacity factor.
///
/// The capacity factor reverts towards `mean_cf` with persistence `alpha`
/// and is clamped to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Wind {
    /// Installed capacity (MW).
    pub mw_rated: f64,
    /// Long-run mean capacity factor (0.0-1.0).
    pub mean_cf: f64,
    /// AR(1) persistence (0.0-1.0).
    pub alpha: f64,
    /// Innovation noise standard deviation.
    pub noise_std: f64,
    cf: f64,
    horizon: Horizon,
    rng: StdRng,
}

impl Wind {
    pub fn new(
        mw_rated: f64,
        mean_cf: f64,
        alpha: f64,
        noise_std: f64,
        horizon: &Horizon,
        seed: u64,
    ) -> Self {
        let mean_cf = mean_cf.clamp(0.0, 1.0);
        Self {
            mw_rated: mw_rated.max(0.0),
            mean_cf,
            alpha: alpha.clamp(0.0, 1.0),
            noise_std: noise_std.max(0.0),
            cf: mean_cf,
            horizon: *horizon,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Profile for Wind {
    fn value(&mut self, _t: usize) -> f64 {
        let epsilon = gaussian_noise(&mut self.rng, self.noise_std);
        self.cf = (self.alpha * self.cf + (1.0 - self.alpha) * self.mean_cf + epsilon)
            .clamp(0.0, 1.0);
        self.mw_rated * self.cf * self.horizon.dt_hours
    }

    fn profile_type(&self) -> &'static str {
        "Wind"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noiseless_stays_at_mean() {
        let h = Horizon::new(24, 1, 0);
        let mut w = Wind::new(10.0, 0.3, 0.9, 0.0, &h, 0);
        for v in w.sample(24) {
            assert!((v - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bounded_by_rating() {
        let h = Horizon::new(24, 10, 0);
        let mut w = Wind::new(5.63, 0.35, 0.7, 0.4, &h, 3);
        for v in w.sample(h.total_steps()) {
            assert!((0.0..=5.63 + 1e-9).contains(&v));
        }
    }
}
