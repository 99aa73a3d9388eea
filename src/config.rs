//! TOML-based plant configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::engine::DEFAULT_STORAGE_CAPACITY;
use crate::sim::thresholds::ThresholdPolicy;

/// Top-level plant configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`PlantConfig::from_toml_file`] or use
/// [`PlantConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlantConfig {
    /// Horizon and seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Storage reservoir.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Sell thresholds.
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Market price profile.
    #[serde(default)]
    pub price: PriceConfig,
    /// Demand profile.
    #[serde(default)]
    pub demand: DemandConfig,
    /// Solar production profile.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Wind production profile.
    #[serde(default)]
    pub wind: WindConfig,
    /// Run-of-river hydro production profile.
    #[serde(default)]
    pub hydro: HydroConfig,
}

/// Horizon and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of intervals per simulated day (must be > 0).
    pub steps_per_day: usize,
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps_per_day: 24,
            days: 7,
            seed: 42,
        }
    }
}

/// Storage reservoir parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Maximum storable energy (MWh, must be finite and > 0).
    pub capacity: f64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_STORAGE_CAPACITY,
        }
    }
}

/// Sell threshold parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    /// `"percentile"` (calibrated over the full horizon) or `"fixed"`.
    pub mode: String,
    /// Price quantile for percentile mode (0.0-1.0).
    pub price_percentile: f64,
    /// Demand quantile for percentile mode (0.0-1.0).
    pub demand_percentile: f64,
    /// Price threshold for fixed mode (EUR/MWh).
    pub price: f64,
    /// Demand threshold for fixed mode (MWh per interval).
    pub demand: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            mode: "percentile".to_string(),
            price_percentile: 0.8,
            demand_percentile: 0.9,
            price: 80.0,
            demand: 10.0,
        }
    }
}

impl ThresholdConfig {
    /// Converts to the engine-side policy. Call after [`PlantConfig::validate`].
    pub fn policy(&self) -> ThresholdPolicy {
        if self.mode == "fixed" {
            ThresholdPolicy::Fixed {
                price: self.price,
                demand: self.demand,
            }
        } else {
            ThresholdPolicy::Percentile {
                price: self.price_percentile,
                demand: self.demand_percentile,
            }
        }
    }
}

/// Market price profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceConfig {
    /// Mean price (EUR/MWh).
    pub base: f64,
    /// Daily sinusoidal amplitude (EUR/MWh).
    pub amp: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (EUR/MWh).
    pub noise_std: f64,
    /// Probability of a price spike per interval (0.0-1.0).
    pub spike_prob: f64,
    /// Spike height (EUR/MWh).
    pub spike_amount: f64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base: 60.0,
            amp: 25.0,
            phase_rad: -1.6,
            noise_std: 8.0,
            spike_prob: 0.02,
            spike_amount: 120.0,
        }
    }
}

/// Demand profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandConfig {
    /// Mean demand (MW).
    pub base_mw: f64,
    /// Daily sinusoidal amplitude (MW).
    pub amp_mw: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (MW).
    pub noise_std: f64,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            base_mw: 8.0,
            amp_mw: 3.0,
            phase_rad: -1.6,
            noise_std: 0.5,
        }
    }
}

/// Solar profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Peak output (MW).
    pub mw_peak: f64,
    /// Sunrise interval index (inclusive).
    pub sunrise_idx: usize,
    /// Sunset interval index (exclusive).
    pub sunset_idx: usize,
    /// AR(1) cloud persistence (0.0-1.0).
    pub alpha: f64,
    /// AR(1) innovation noise standard deviation.
    pub cloud_noise_std: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            mw_peak: 4.03,
            sunrise_idx: 6,
            sunset_idx: 18,
            alpha: 0.9,
            cloud_noise_std: 0.2,
        }
    }
}

/// Wind profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindConfig {
    /// Installed capacity (MW).
    pub mw_rated: f64,
    /// Mean capacity factor (0.0-1.0).
    pub mean_cf: f64,
    /// AR(1) persistence (0.0-1.0).
    pub alpha: f64,
    /// Innovation noise standard deviation.
    pub noise_std: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            mw_rated: 5.63,
            mean_cf: 0.35,
            alpha: 0.85,
            noise_std: 0.08,
        }
    }
}

/// Run-of-river hydro profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydroConfig {
    /// Mean output (MW).
    pub base_mw: f64,
    /// Output noise standard deviation (MW).
    pub noise_std: f64,
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            base_mw: 2.0,
            noise_std: 0.2,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"storage.capacity"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl PlantConfig {
    /// Returns the baseline scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the small-storage preset: a 40 MWh reservoir that fills
    /// within the first day, so overflow sales dominate.
    pub fn small_storage() -> Self {
        Self {
            storage: StorageConfig { capacity: 40.0 },
            ..Self::default()
        }
    }

    /// Returns the volatile-prices preset: wide price swings, frequent
    /// spikes, and negative prices around midday.
    pub fn volatile_prices() -> Self {
        Self {
            simulation: SimulationConfig {
                seed: 7,
                ..SimulationConfig::default()
            },
            price: PriceConfig {
                base: 40.0,
                amp: 55.0,
                noise_std: 20.0,
                spike_prob: 0.08,
                spike_amount: 250.0,
                ..PriceConfig::default()
            },
            thresholds: ThresholdConfig {
                price_percentile: 0.7,
                demand_percentile: 0.7,
                ..ThresholdConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "small_storage", "volatile_prices"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "small_storage" => Ok(Self::small_storage()),
            "volatile_prices" => Ok(Self::volatile_prices()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns every error found.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.steps_per_day == 0 {
            errors.push(ConfigError::new("simulation.steps_per_day", "must be > 0"));
        }
        if s.days == 0 {
            errors.push(ConfigError::new("simulation.days", "must be > 0"));
        }

        let cap = self.storage.capacity;
        if !cap.is_finite() || cap <= 0.0 {
            errors.push(ConfigError::new("storage.capacity", "must be finite and > 0"));
        }

        let t = &self.thresholds;
        match t.mode.as_str() {
            "percentile" => {
                if !(0.0..=1.0).contains(&t.price_percentile) {
                    errors.push(ConfigError::new(
                        "thresholds.price_percentile",
                        "must be in [0.0, 1.0]",
                    ));
                }
                if !(0.0..=1.0).contains(&t.demand_percentile) {
                    errors.push(ConfigError::new(
                        "thresholds.demand_percentile",
                        "must be in [0.0, 1.0]",
                    ));
                }
            }
            "fixed" => {
                if !t.price.is_finite() {
                    errors.push(ConfigError::new("thresholds.price", "must be finite"));
                }
                if !t.demand.is_finite() || t.demand < 0.0 {
                    errors.push(ConfigError::new(
                        "thresholds.demand",
                        "must be finite and >= 0",
                    ));
                }
            }
            other => errors.push(ConfigError::new(
                "thresholds.mode",
                format!("must be \"percentile\" or \"fixed\", got \"{other}\""),
            )),
        }

        let sol = &self.solar;
        if sol.sunrise_idx >= sol.sunset_idx {
            errors.push(ConfigError::new("solar.sunrise_idx", "must be < solar.sunset_idx"));
        }
        if s.steps_per_day > 0 && sol.sunset_idx > s.steps_per_day {
            errors.push(ConfigError::new(
                "solar.sunset_idx",
                "must be <= simulation.steps_per_day",
            ));
        }
        if !(0.0..=1.0).contains(&sol.alpha) {
            errors.push(ConfigError::new("solar.alpha", "must be in [0.0, 1.0]"));
        }
        if sol.mw_peak < 0.0 {
            errors.push(ConfigError::new("solar.mw_peak", "must be >= 0"));
        }

        let w = &self.wind;
        if !(0.0..=1.0).contains(&w.mean_cf) {
            errors.push(ConfigError::new("wind.mean_cf", "must be in [0.0, 1.0]"));
        }
        if !(0.0..=1.0).contains(&w.alpha) {
            errors.push(ConfigError::new("wind.alpha", "must be in [0.0, 1.0]"));
        }
        if w.mw_rated < 0.0 {
            errors.push(ConfigError::new("wind.mw_rated", "must be >= 0"));
        }

        if self.hydro.base_mw < 0.0 {
            errors.push(ConfigError::new("hydro.base_mw", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.price.spike_prob) {
            errors.push(ConfigError::new("price.spike_prob", "must be in [0.0, 1.0]"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let errors = PlantConfig::baseline().validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_uses_default_capacity() {
        assert_eq!(PlantConfig::baseline().storage.capacity, 1000.0);
    }

    #[test]
    fn from_preset_unknown() {
        let err = PlantConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
steps_per_day = 48
days = 2
seed = 99

[storage]
capacity = 250.0

[thresholds]
mode = "fixed"
price = 90.0
demand = 12.0

[price]
base = 55.0
amp = 20.0
phase_rad = 0.0
noise_std = 5.0
spike_prob = 0.0
spike_amount = 0.0

[demand]
base_mw = 6.0
amp_mw = 2.0
phase_rad = 0.0
noise_std = 0.1

[solar]
mw_peak = 4.0
sunrise_idx = 12
sunset_idx = 36
alpha = 0.85
cloud_noise_std = 0.25

[wind]
mw_rated = 5.0
mean_cf = 0.4
alpha = 0.8
noise_std = 0.05

[hydro]
base_mw = 1.5
noise_std = 0.0
"#;
        let cfg = PlantConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.steps_per_day), Some(48));
        assert_eq!(cfg.as_ref().map(|c| c.storage.capacity), Some(250.0));
        assert_eq!(
            cfg.as_ref().map(|c| c.thresholds.policy()),
            Some(ThresholdPolicy::Fixed {
                price: 90.0,
                demand: 12.0,
            })
        );
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[storage]
capacity = 10.0
bogus_field = true
"#;
        assert!(PlantConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_zero_capacity() {
        let mut cfg = PlantConfig::baseline();
        cfg.storage.capacity = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "storage.capacity"));
    }

    #[test]
    fn validation_catches_infinite_capacity() {
        let mut cfg = PlantConfig::baseline();
        cfg.storage.capacity = f64::INFINITY;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "storage.capacity"));
    }

    #[test]
    fn validation_catches_bad_percentile() {
        let mut cfg = PlantConfig::baseline();
        cfg.thresholds.price_percentile = 1.2;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "thresholds.price_percentile"));
    }

    #[test]
    fn validation_catches_bad_mode() {
        let mut cfg = PlantConfig::baseline();
        cfg.thresholds.mode = "rolling".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "thresholds.mode"));
    }

    #[test]
    fn validation_catches_zero_days() {
        let mut cfg = PlantConfig::baseline();
        cfg.simulation.days = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.days"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in PlantConfig::PRESETS {
            let cfg = PlantConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn small_storage_has_smaller_reservoir() {
        let base = PlantConfig::baseline();
        let small = PlantConfig::small_storage();
        assert!(small.storage.capacity < base.storage.capacity);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 99
"#;
        let cfg = PlantConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.seed), Some(99));
        assert_eq!(cfg.as_ref().map(|c| c.simulation.steps_per_day), Some(24));
        assert_eq!(cfg.as_ref().map(|c| c.thresholds.price_percentile), Some(0.8));
        assert_eq!(cfg.as_ref().map(|c| c.storage.capacity), Some(1000.0));
    }

    #[test]
    fn bundled_scenario_files_parse_and_validate() {
        let files = [
            ("baseline", include_str!("../scenarios/baseline.toml")),
            ("small_storage", include_str!("../scenarios/small_storage.toml")),
            ("volatile_prices", include_str!("../scenarios/volatile_prices.toml")),
            ("fixed_thresholds", include_str!("../scenarios/fixed_thresholds.toml")),
        ];
        for (name, content) in files {
            let cfg = PlantConfig::from_toml_str(content)
                .unwrap_or_else(|e| panic!("{name} should parse: {e}"));
            let errors = cfg.validate();
            assert!(errors.is_empty(), "{name} should be valid: {errors:?}");
        }
    }

    #[test]
    fn fixed_mode_maps_to_fixed_policy() {
        let cfg = PlantConfig::from_toml_str(include_str!("../scenarios/fixed_thresholds.toml"))
            .expect("fixed scenario parses");
        assert_eq!(
            cfg.thresholds.policy(),
            ThresholdPolicy::Fixed {
                price: 75.0,
                demand: 9.0
            }
        );
    }
}
