use rand::{Rng, SeedableRng, rngs::StdRng};

use super::types::{Horizon, Profile, gaussian_noise};

/// Day-ahead style market price with a daily shape, noise, and rare spikes.
///
/// Prices are per energy unit (EUR/MWh) and may go negative.
#[derive(Debug, Clone)]
pub struct MarketPrice {
    /// Mean price.
    pub base: f64,
    /// Sinusoidal amplitude.
    pub amp: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation.
    pub noise_std: f64,
    /// Probability (0.0-1.0) that an interval carries a price spike.
    pub spike_prob: f64,
    /// Amount added to the price on a spike.
    pub spike_amount: f64,
    horizon: Horizon,
    rng: StdRng,
}

impl MarketPrice {
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        base: f64,
        amp: f64,
        phase_rad: f64,
        noise_std: f64,
        spike_prob: f64,
        spike_amount: f64,
        horizon: &Horizon,
        seed: u64,
    ) -> Self {
        Self {
            base,
            amp,
            phase_rad,
            noise_std: noise_std.max(0.0),
            spike_prob: spike_prob.clamp(0.0, 1.0),
            spike_amount,
            horizon: *horizon,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Profile for MarketPrice {
    fn value(&mut self, t: usize) -> f64 {
        let angle = 2.0 * std::f64::consts::PI * self.horizon.day_pos(t) + self.phase_rad;
        let noise = gaussian_noise(&mut self.rng, self.noise_std);
        let spike = if self.spike_prob > 0.0 && self.rng.random::<f64>() < self.spike_prob {
            self.spike_amount
        } else {
            0.0
        };
        self.base + self.amp * angle.sin() + noise + spike
    }

    fn profile_type(&self) -> &'static str {
        "MarketPrice"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn may_go_negative() {
        let h = Horizon::new(24, 1, 0);
        let mut p = MarketPrice::new(-5.0, 0.0, 0.0, 0.0, 0.0, 0.0, &h, 0);
        assert_eq!(p.value(0), -5.0);
    }

    #[test]
    fn certain_spike_is_applied() {
        let h = Horizon::new(24, 1, 0);
        let mut p = MarketPrice::new(50.0, 0.0, 0.0, 0.0, 1.0, 200.0, &h, 0);
        assert_eq!(p.value(3), 250.0);
    }

    #[test]
    fn seed_determinism() {
        let h = Horizon::new(24, 2, 0);
        let mut a = MarketPrice::new(60.0, 20.0, 0.0, 8.0, 0.05, 150.0, &h, 9);
        let mut b = MarketPrice::new(60.0, 20.0, 0.0, 8.0, 0.05, 150.0, &h, 9);
        assert_eq!(a.sample(48), b.sample(48));
    }
}
