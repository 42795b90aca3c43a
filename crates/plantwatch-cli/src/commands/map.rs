//! Map command implementation

use crate::cli::MapArgs;
use crate::output::OutputWriter;
use crate::output_types::{MapOutput, PinOutput, PinRow};
use anyhow::Result;
use plantwatch_core::catalog::Catalog;
use plantwatch_core::models::{EnrichedPlantLocation, PlantRecord};
use plantwatch_geo::{fit_viewport, nearest_first, PlantLocationCorrelator};

pub fn execute(args: MapArgs, catalog: &Catalog, output: &OutputWriter) -> Result<()> {
    let plants: Vec<&PlantRecord> = match &args.owner {
        Some(owner_id) => {
            if catalog.owner(owner_id).is_none() {
                output.warning(format!("No owner with id '{}'", owner_id));
            }
            catalog.plants_for_owner(owner_id)
        }
        None => catalog.plants.iter().collect(),
    };
    let total_plants = plants.len();

    let correlator = PlantLocationCorrelator::new(&catalog.locations, &catalog.glyphs);
    let pins = correlator.correlate(plants);

    let ranked: Vec<(EnrichedPlantLocation, Option<f64>)> = match &args.near {
        Some(origin) => nearest_first(&pins, origin)
            .into_iter()
            .map(|(pin, distance)| (pin, Some(distance)))
            .collect(),
        None => pins.iter().cloned().map(|pin| (pin, None)).collect(),
    };

    let fit = if args.fit { fit_viewport(&pins, args.padding) } else { None };

    if output.is_json() {
        let pins = ranked
            .into_iter()
            .map(|(pin, distance_meters)| PinOutput {
                plant_id: pin.plant.id,
                name: pin.plant.name,
                species: pin.plant.species,
                glyph: pin.glyph,
                region: pin.region_name,
                latitude: pin.coordinate.latitude,
                longitude: pin.coordinate.longitude,
                distance_meters,
            })
            .collect();
        return output.result(MapOutput { total_plants, pins, fit });
    }

    output.info(format!(
        "{} of {} plants have a recorded location",
        pins.len(),
        total_plants
    ));

    let rows = ranked
        .into_iter()
        .map(|(pin, distance)| PinRow {
            glyph: pin.glyph,
            name: pin.plant.name,
            region: pin.region_name,
            latitude: format!("{:.4}", pin.coordinate.latitude),
            longitude: format!("{:.4}", pin.coordinate.longitude),
            distance: distance.map(format_distance).unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    output.table(rows);

    if args.fit {
        output.section("Fit Viewport");
        match fit {
            Some(viewport) => {
                output.kv(
                    "Center",
                    format!("{:.4}, {:.4}", viewport.center().latitude, viewport.center().longitude),
                );
                output.kv("Latitude Span", format!("{:.4}", viewport.latitude_span()));
                output.kv("Longitude Span", format!("{:.4}", viewport.longitude_span()));
            }
            None => output.info("No pins to fit"),
        }
    }

    Ok(())
}

fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
