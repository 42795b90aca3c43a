pub mod geometry;
pub mod glyph;
pub mod location;
pub mod plant;
pub mod session;

pub use geometry::{GeoCoordinate, Viewport};
pub use glyph::SpeciesGlyphTable;
pub use location::{EnrichedPlantLocation, LocationTable, PlantLocationEntry};
pub use plant::{Owner, OwnerKind, Placement, PlantRecord};
pub use session::{DisplayMode, LocationSessionState};
