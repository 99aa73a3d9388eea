//! Solar production with temporally correlated cloud cover (AR(1) process).

use rand::{SeedableRng, rngs::StdRng};

use super::types::{Horizon, Profile, daylight_frac, gaussian_noise};

/// Minimum cloud multiplier (heavy overcast).
const MULTIPLIER_MIN: f64 = 0.2;
/// Maximum cloud multiplier (enhanced irradiance from cloud edges).
const MULTIPLIER_MAX: f64 = 1.2;

/// Solar array output as energy per interval.
///
/// The clear-sky shape is a half sine between sunrise and sunset, scaled by
/// a cloud multiplier that evolves as
/// ```text
/// m(t) = alpha * m(t-1) + (1 - alpha) + epsilon(t)
/// ```
/// and is clamped to \[0.2, 1.2\]. The multiplier advances every interval,
/// including at night, so cloud fronts persist across dawn.
#[derive(Debug, Clone)]
pub struct Solar {
    /// Peak output under clear sky (MW).
    pub mw_peak: f64,
    /// Sunrise interval index within the day (inclusive).
    pub sunrise_idx: usize,
    /// Sunset interval index within the day (exclusive).
    pub sunset_idx: usize,
    /// AR(1) correlation coefficient (0.0 = uncorrelated, 1.0 = fully persistent).
    pub alpha: f64,
    /// Standard deviation of the AR(1) innovation noise.
    pub cloud_noise_std: f64,
    multiplier: f64,
    horizon: Horizon,
    rng: StdRng,
}

impl Solar {
    pub fn new(
        mw_peak: f64,
        sunrise_idx: usize,
        sunset_idx: usize,
        alpha: f64,
        cloud_noise_std: f64,
        horizon: &Horizon,
        seed: u64,
    ) -> Self {
        Self {
            mw_peak: mw_peak.max(0.0),
            sunrise_idx,
            sunset_idx,
            alpha: alpha.clamp(0.0, 1.0),
            cloud_noise_std: cloud_noise_std.max(0.0),
            multiplier: 1.0,
            horizon: *horizon,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn advance_multiplier(&mut self) -> f64 {
        let epsilon = gaussian_noise(&mut self.rng, self.cloud_noise_std);
        self.multiplier = self.alpha * self.multiplier + (1.0 - self.alpha) + epsilon;
        self.multiplier = self.multiplier.clamp(MULTIPLIER_MIN, MULTIPLIER_MAX);
        self.multiplier
    }
}

impl Profile for Solar {
    fn value(&mut self, t: usize) -> f64 {
        let m = self.advance_multiplier();
        let frac = daylight_frac(
            t,
            self.horizon.steps_per_day,
            self.sunrise_idx,
            self.sunset_idx,
        );
        if frac <= 0.0 {
            return 0.0;
        }
        self.mw_peak * frac * m * self.horizon.dt_hours
    }

    fn profile_type(&self) -> &'static str {
        "Solar"
    }
}
