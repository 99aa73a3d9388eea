use rand::{SeedableRng, rngs::StdRng};

use super::types::{Horizon, Profile, gaussian_noise};

/// Plant-side demand with a daily sinusoidal shape.
///
/// Values are energy per interval (MWh): the instantaneous demand in MW is
/// integrated over the interval length.
///
/// # Examples
///
/// ```
/// use dispatch_sim::profiles::{Demand, Horizon, Profile};
///
/// let h = Horizon::new(24, 1, 42);
/// let mut demand = Demand::new(8.0, 3.0, 1.2, 0.0, &h, 42);
/// assert!(demand.value(12) >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Demand {
    /// Mean demand (MW).
    pub base_mw: f64,
    /// Sinusoidal amplitude (MW).
    pub amp_mw: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (MW).
    pub noise_std: f64,
    horizon: Horizon,
    rng: StdRng,
}

impl Demand {
    pub fn new(
        base_mw: f64,
        amp_mw: f64,
        phase_rad: f64,
        noise_std: f64,
        horizon: &Horizon,
        seed: u64,
    ) -> Self {
        Self {
            base_mw,
            amp_mw,
            phase_rad,
            noise_std: noise_std.max(0.0),
            horizon: *horizon,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Profile for Demand {
    /// Demand energy for interval `t`, never negative.
    fn value(&mut self, t: usize) -> f64 {
        let angle = 2.0 * std::f64::consts::PI * self.horizon.day_pos(t) + self.phase_rad;
        let noise = gaussian_noise(&mut self.rng, self.noise_std);
        let mw = self.base_mw + self.amp_mw * angle.sin() + noise;
        mw.max(0.0) * self.horizon.dt_hours
    }

    fn profile_type(&self) -> &'static str {
        "Demand"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_negative() {
        let h = Horizon::new(24, 3, 0);
        let mut d = Demand::new(1.0, 5.0, 0.0, 2.0, &h, 7);
        for t in 0..h.total_steps() {
            assert!(d.value(t) >= 0.0);
        }
    }

    #[test]
    fn noiseless_follows_sine() {
        let h = Horizon::new(4, 1, 0);
        let mut d = Demand::new(10.0, 2.0, 0.0, 0.0, &h, 0);
        // t=1 -> angle pi/2, 12 MW over 6 h
        assert_eq!(d.value(0), 60.0);
        assert!((d.value(1) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn seed_determinism() {
        let h = Horizon::new(24, 2, 0);
        let mut a = Demand::new(8.0, 3.0, 1.2, 0.5, &h, 42);
        let mut b = Demand::new(8.0, 3.0, 1.2, 0.5, &h, 42);
        assert_eq!(a.sample(48), b.sample(48));
    }
}
