//! Plant-to-location lookup table and the enriched records built from it.

use super::geometry::GeoCoordinate;
use super::plant::PlantRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recorded physical location of a single plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantLocationEntry {
    pub plant_id: String,
    pub coordinate: GeoCoordinate,
    pub region_name: String,
}

impl PlantLocationEntry {
    pub fn new(
        plant_id: impl Into<String>,
        coordinate: GeoCoordinate,
        region_name: impl Into<String>,
    ) -> Self {
        Self { plant_id: plant_id.into(), coordinate, region_name: region_name.into() }
    }
}

/// Read-only table of plant locations keyed by plant identifier.
///
/// A plant has at most one entry; plants without an entry are simply absent.
/// Serialized as a flat list of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PlantLocationEntry>", into = "Vec<PlantLocationEntry>")]
pub struct LocationTable {
    entries: HashMap<String, PlantLocationEntry>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry for the same plant
    pub fn insert(&mut self, entry: PlantLocationEntry) -> Option<PlantLocationEntry> {
        self.entries.insert(entry.plant_id.clone(), entry)
    }

    /// Look up the location of a plant
    pub fn lookup(&self, plant_id: &str) -> Option<&PlantLocationEntry> {
        self.entries.get(plant_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlantLocationEntry> {
        self.entries.values()
    }
}

impl FromIterator<PlantLocationEntry> for LocationTable {
    fn from_iter<I: IntoIterator<Item = PlantLocationEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl From<Vec<PlantLocationEntry>> for LocationTable {
    fn from(entries: Vec<PlantLocationEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<LocationTable> for Vec<PlantLocationEntry> {
    fn from(table: LocationTable) -> Self {
        let mut entries: Vec<_> = table.entries.into_values().collect();
        entries.sort_by(|a, b| a.plant_id.cmp(&b.plant_id));
        entries
    }
}

/// A plant joined with its recorded location and display glyph.
///
/// Recomputed on demand; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPlantLocation {
    pub plant: PlantRecord,
    pub coordinate: GeoCoordinate,
    pub region_name: String,
    pub glyph: String,
}
