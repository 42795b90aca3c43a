//! Plantwatch Geo - Plant-location correlation and spatial helpers
//!
//! Everything in this crate is synchronous and side-effect free, so it can be
//! called on every render with the static catalog tables.

pub mod correlate;
pub mod search;
pub mod spatial;

pub use correlate::{correlate, PlantLocationCorrelator};
pub use search::{filter_plants, PlantQuery};
pub use spatial::{distance_meters, fit_viewport, nearest_first};
