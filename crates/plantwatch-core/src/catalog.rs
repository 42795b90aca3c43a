//! Read-only plant catalog tables.
//!
//! A `Catalog` is built once and handed by reference to whatever needs it; there
//! are no process-wide tables.

use crate::error::{PlantwatchError, Result};
use crate::models::{
    GeoCoordinate, LocationTable, Owner, OwnerKind, Placement, PlantLocationEntry, PlantRecord,
    SpeciesGlyphTable,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Owners, plants, plant locations, and species glyphs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub plants: Vec<PlantRecord>,
    #[serde(default)]
    pub locations: LocationTable,
    #[serde(default)]
    pub glyphs: SpeciesGlyphTable,
}

impl Catalog {
    /// The demo data set: one household and one commercial owner with five plants
    pub fn sample() -> Self {
        let owners = vec![
            Owner {
                id: "1".to_string(),
                name: "Alice Johnson".to_string(),
                email: "alice@example.com".to_string(),
                kind: OwnerKind::Household,
            },
            Owner {
                id: "2".to_string(),
                name: "Bob Smith".to_string(),
                email: "bob@farmcorp.com".to_string(),
                kind: OwnerKind::Commercial,
            },
        ];

        let plants = vec![
            plant("1", "Monstera", "Monstera deliciosa", Placement::Indoor, 26, "1")
                .sensor("sensor-001")
                .handle("@moody_monstera")
                .image("https://images.pexels.com/photos/3097770/pexels-photo-3097770.jpeg")
                .build(),
            plant("2", "Fiddle Leaf Fig", "Ficus lyrata", Placement::Indoor, 52, "1")
                .sensor("sensor-002")
                .handle("@fiddle_feelings")
                .image("https://images.pexels.com/photos/2123482/pexels-photo-2123482.jpeg")
                .build(),
            plant("3", "Snake Plant", "Sansevieria trifasciata", Placement::Indoor, 18, "1")
                .sensor("sensor-003")
                .handle("@sassy_snake")
                .image("https://images.pexels.com/photos/2132227/pexels-photo-2132227.jpeg")
                .build(),
            plant("4", "Tomato Garden", "Solanum lycopersicum", Placement::Outdoor, 8, "2")
                .sensor("sensor-farm-001")
                .image("https://images.pexels.com/photos/1198643/pexels-photo-1198643.jpeg")
                .build(),
            plant("5", "Wheat Field A", "Triticum", Placement::Outdoor, 16, "2")
                .sensor("sensor-farm-002")
                .image("https://images.pexels.com/photos/326082/pexels-photo-326082.jpeg")
                .build(),
        ];

        let locations: LocationTable = vec![
            PlantLocationEntry::new("1", GeoCoordinate::new(40.7128, -74.0060), "Living Room"),
            PlantLocationEntry::new("2", GeoCoordinate::new(40.7135, -74.0046), "Kitchen"),
            PlantLocationEntry::new("3", GeoCoordinate::new(40.7140, -74.0065), "Bedroom"),
            PlantLocationEntry::new("4", GeoCoordinate::new(38.8951, -77.0364), "Greenhouse"),
            PlantLocationEntry::new("5", GeoCoordinate::new(38.8980, -77.0390), "Field A"),
        ]
        .into();

        let glyphs = SpeciesGlyphTable::default()
            .with_glyph("Monstera deliciosa", "🌿")
            .with_glyph("Ficus lyrata", "🌱")
            .with_glyph("Sansevieria trifasciata", "🪴")
            .with_glyph("Solanum lycopersicum", "🍅")
            .with_glyph("Triticum", "🌾");

        Self { owners, plants, locations, glyphs }
    }

    /// Load a catalog from a JSON file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let catalog: Catalog = serde_json::from_str(&content).map_err(|e| {
            PlantwatchError::Serialization(format!(
                "Failed to parse catalog {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        catalog.validate()?;

        tracing::debug!(
            path = %path.as_ref().display(),
            plants = catalog.plants.len(),
            locations = catalog.locations.len(),
            "Loaded plant catalog"
        );

        Ok(catalog)
    }

    /// Reject duplicate plant ids and out-of-range coordinates.
    ///
    /// Location entries for unknown plants are allowed; they never match.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for plant in &self.plants {
            if !seen.insert(plant.id.as_str()) {
                return Err(PlantwatchError::CatalogInvalid {
                    reason: format!("duplicate plant id '{}'", plant.id),
                });
            }
        }

        for entry in self.locations.iter() {
            if !entry.coordinate.is_valid() {
                return Err(PlantwatchError::CatalogInvalid {
                    reason: format!(
                        "location for plant '{}' has invalid coordinate ({}, {})",
                        entry.plant_id, entry.coordinate.latitude, entry.coordinate.longitude
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn owner(&self, id: &str) -> Option<&Owner> {
        self.owners.iter().find(|owner| owner.id == id)
    }

    /// Plants belonging to an owner, in catalog order
    pub fn plants_for_owner(&self, owner_id: &str) -> Vec<&PlantRecord> {
        self.plants.iter().filter(|plant| plant.owner_id == owner_id).collect()
    }
}

struct PlantBuilder {
    record: PlantRecord,
}

fn plant(
    id: &str,
    name: &str,
    species: &str,
    placement: Placement,
    age_weeks: u32,
    owner_id: &str,
) -> PlantBuilder {
    PlantBuilder {
        record: PlantRecord {
            id: id.to_string(),
            name: name.to_string(),
            species: species.to_string(),
            image_ref: String::new(),
            placement,
            age_weeks,
            owner_id: owner_id.to_string(),
            sensor_ref: None,
            social_handle: None,
        },
    }
}

impl PlantBuilder {
    fn sensor(mut self, sensor: &str) -> Self {
        self.record.sensor_ref = Some(sensor.to_string());
        self
    }

    fn handle(mut self, handle: &str) -> Self {
        self.record.social_handle = Some(handle.to_string());
        self
    }

    fn image(mut self, image: &str) -> Self {
        self.record.image_ref = image.to_string();
        self
    }

    fn build(self) -> PlantRecord {
        self.record
    }
}
