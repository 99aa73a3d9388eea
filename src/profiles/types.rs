//! Common types and traits for synthetic input profiles.

use rand::{Rng, rngs::StdRng};

/// Simulation horizon shared by every profile.
///
/// # Examples
///
/// ```
/// use dispatch_sim::profiles::Horizon;
///
/// let h = Horizon::new(24, 7, 42);
/// assert_eq!(h.dt_hours, 1.0);
/// assert_eq!(h.total_steps(), 168);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Horizon {
    /// Number of intervals per simulated day.
    pub steps_per_day: usize,
    /// Number of days to simulate.
    pub days: usize,
    /// Duration of one interval in hours, derived as `24.0 / steps_per_day`.
    pub dt_hours: f64,
    /// Master random seed.
    pub seed: u64,
}

impl Horizon {
    /// Creates a new horizon. Zero `steps_per_day` is raised to 1.
    pub fn new(steps_per_day: usize, days: usize, seed: u64) -> Self {
        let steps_per_day = steps_per_day.max(1);
        Self {
            steps_per_day,
            days,
            dt_hours: 24.0 / steps_per_day as f64,
            seed,
        }
    }

    /// Total number of intervals across all days.
    pub fn total_steps(&self) -> usize {
        self.steps_per_day * self.days
    }

    /// Position of interval `t` within its day, in `[0, 1)`.
    pub fn day_pos(&self, t: usize) -> f64 {
        (t % self.steps_per_day) as f64 / self.steps_per_day as f64
    }
}

/// A seeded generator producing one value per interval.
///
/// Implementations are stateful (RNG, AR(1) memory) and must be sampled in
/// increasing interval order.
pub trait Profile {
    /// Returns the value for interval `t`.
    fn value(&mut self, t: usize) -> f64;

    /// Human-readable profile name.
    fn profile_type(&self) -> &'static str;

    /// Samples intervals `0..steps` in order.
    fn sample(&mut self, steps: usize) -> Vec<f64> {
        (0..steps).map(|t| self.value(t)).collect()
    }
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

/// Daylight shape for interval `t`: a half sine between sunrise (inclusive)
/// and sunset (exclusive), 0 at night.
pub fn daylight_frac(t: usize, steps_per_day: usize, sunrise_idx: usize, sunset_idx: usize) -> f64 {
    let idx = t % steps_per_day.max(1);
    if idx < sunrise_idx || idx >= sunset_idx || sunrise_idx >= sunset_idx {
        return 0.0;
    }
    let span = (sunset_idx - sunrise_idx) as f64;
    let x = (idx - sunrise_idx) as f64 + 0.5;
    (std::f64::consts::PI * x / span).sin()
}
