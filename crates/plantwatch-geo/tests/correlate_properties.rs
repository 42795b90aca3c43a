//! Property tests for the plant-location join

use plantwatch_core::catalog::Catalog;
use plantwatch_core::models::{
    GeoCoordinate, LocationTable, Placement, PlantLocationEntry, PlantRecord, SpeciesGlyphTable,
};
use plantwatch_geo::{correlate, PlantLocationCorrelator};
use proptest::prelude::*;
use std::collections::HashSet;

fn plant(id: String, species: String) -> PlantRecord {
    PlantRecord {
        id,
        name: "plant".to_string(),
        species,
        image_ref: String::new(),
        placement: Placement::Indoor,
        age_weeks: 1,
        owner_id: "1".to_string(),
        sensor_ref: None,
        social_handle: None,
    }
}

fn plants_strategy() -> impl Strategy<Value = Vec<PlantRecord>> {
    prop::collection::vec(
        ("[a-f0-9]{1,3}", prop::sample::select(vec!["Triticum", "Ficus lyrata", "Unknown"])),
        0..20,
    )
    .prop_map(|pairs| {
        pairs.into_iter().map(|(id, species)| plant(id, species.to_string())).collect()
    })
}

fn locations_strategy() -> impl Strategy<Value = LocationTable> {
    prop::collection::vec(("[a-f0-9]{1,3}", -90.0f64..90.0, -180.0f64..180.0), 0..20).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(id, lat, lon)| {
                    PlantLocationEntry::new(id, GeoCoordinate::new(lat, lon), "Region")
                })
                .collect()
        },
    )
}

fn glyphs() -> SpeciesGlyphTable {
    SpeciesGlyphTable::new("🌱").with_glyph("Triticum", "🌾")
}

proptest! {
    #[test]
    fn prop_output_is_ordered_subsequence_of_located_plants(
        plants in plants_strategy(),
        locations in locations_strategy(),
    ) {
        let result = correlate(&plants, &locations, &glyphs());

        let expected: Vec<&PlantRecord> =
            plants.iter().filter(|p| locations.lookup(&p.id).is_some()).collect();
        prop_assert_eq!(result.len(), expected.len());
        for (record, plant) in result.iter().zip(expected) {
            prop_assert_eq!(&record.plant, plant);
        }
    }

    #[test]
    fn prop_every_record_carries_its_entry(
        plants in plants_strategy(),
        locations in locations_strategy(),
    ) {
        let glyphs = glyphs();
        for record in correlate(&plants, &locations, &glyphs) {
            let entry = locations.lookup(&record.plant.id).unwrap();
            prop_assert_eq!(record.coordinate, entry.coordinate);
            prop_assert_eq!(&record.region_name, &entry.region_name);
            prop_assert_eq!(record.glyph.as_str(), glyphs.lookup(&record.plant.species));
        }
    }

    #[test]
    fn prop_empty_location_table_yields_nothing(plants in plants_strategy()) {
        prop_assert!(correlate(&plants, &LocationTable::new(), &glyphs()).is_empty());
    }

    #[test]
    fn prop_repeated_calls_agree(
        plants in plants_strategy(),
        locations in locations_strategy(),
    ) {
        let glyphs = glyphs();
        let correlator = PlantLocationCorrelator::new(&locations, &glyphs);
        prop_assert_eq!(correlator.correlate(&plants), correlator.correlate(&plants));
    }
}

#[test]
fn test_sample_catalog_correlates_every_plant() {
    let catalog = Catalog::sample();
    let result = correlate(&catalog.plants, &catalog.locations, &catalog.glyphs);

    let ids: Vec<_> = result.iter().map(|r| r.plant.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(result[0].glyph, "🌿");
    assert_eq!(result[0].region_name, "Living Room");
    assert_eq!(result[4].glyph, "🌾");
    assert_eq!(result[4].region_name, "Field A");

    let distinct: HashSet<_> = result.iter().map(|r| r.region_name.as_str()).collect();
    assert_eq!(distinct.len(), 5);
}
