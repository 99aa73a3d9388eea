//! Seeded synthetic profiles for price, demand, and plant production.

pub mod aggregate;
/// Plant-side demand profile.
pub mod demand;
/// Run-of-river hydro profile.
pub mod hydro;
/// Market price profile.
pub mod price;
pub mod solar;
pub mod types;
/// Wind farm profile.
pub mod wind;

pub use aggregate::{PlantProduction, ProductionAggregator, SourceSeries, SourceTotal};
pub use demand::Demand;
pub use hydro::Hydro;
pub use price::MarketPrice;
pub use solar::Solar;
pub use types::{Horizon, Profile};
pub use wind::Wind;
