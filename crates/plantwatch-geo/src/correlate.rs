//! Join plants with their recorded locations for the map and list views.

use plantwatch_core::models::{
    EnrichedPlantLocation, LocationTable, PlantRecord, SpeciesGlyphTable,
};

/// Joins plant records against a location table and a glyph table.
///
/// Holds only borrowed, read-only tables; construct one per render or keep it
/// around, it is equally cheap.
#[derive(Debug, Clone, Copy)]
pub struct PlantLocationCorrelator<'a> {
    locations: &'a LocationTable,
    glyphs: &'a SpeciesGlyphTable,
}

impl<'a> PlantLocationCorrelator<'a> {
    pub fn new(locations: &'a LocationTable, glyphs: &'a SpeciesGlyphTable) -> Self {
        Self { locations, glyphs }
    }

    /// Enrich every plant that has a recorded location.
    ///
    /// Plants without a location entry are left out. The output keeps the
    /// input order of `plants`.
    pub fn correlate<'p, I>(&self, plants: I) -> Vec<EnrichedPlantLocation>
    where
        I: IntoIterator<Item = &'p PlantRecord>,
    {
        plants.into_iter().filter_map(|plant| self.enrich(plant)).collect()
    }

    /// Enrich a single plant, or `None` when it has no recorded location
    pub fn enrich(&self, plant: &PlantRecord) -> Option<EnrichedPlantLocation> {
        let entry = self.locations.lookup(&plant.id)?;
        Some(EnrichedPlantLocation {
            plant: plant.clone(),
            coordinate: entry.coordinate,
            region_name: entry.region_name.clone(),
            glyph: self.glyphs.lookup(&plant.species).to_string(),
        })
    }
}

/// Enrich every plant in `plants` that has an entry in `locations`
pub fn correlate(
    plants: &[PlantRecord],
    locations: &LocationTable,
    glyphs: &SpeciesGlyphTable,
) -> Vec<EnrichedPlantLocation> {
    PlantLocationCorrelator::new(locations, glyphs).correlate(plants)
}
