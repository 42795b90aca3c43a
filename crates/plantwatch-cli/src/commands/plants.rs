//! Plants command implementation

use crate::cli::PlantsArgs;
use crate::output::OutputWriter;
use crate::output_types::{PlantRow, PlantsOutput};
use anyhow::Result;
use plantwatch_core::catalog::Catalog;
use plantwatch_geo::{filter_plants, PlantQuery};

pub fn execute(args: PlantsArgs, catalog: &Catalog, output: &OutputWriter) -> Result<()> {
    let query = PlantQuery { text: args.query, placement: args.placement, owner_id: args.owner };
    let matches = filter_plants(&catalog.plants, &query);

    if output.is_json() {
        return output.result(PlantsOutput {
            plants: matches.into_iter().cloned().collect(),
            query,
        });
    }

    let rows = matches
        .into_iter()
        .map(|plant| PlantRow {
            id: plant.id.clone(),
            name: plant.name.clone(),
            species: plant.species.clone(),
            placement: plant.placement.to_string(),
            age_weeks: plant.age_weeks,
            owner: catalog
                .owner(&plant.owner_id)
                .map(|owner| owner.name.clone())
                .unwrap_or_else(|| plant.owner_id.clone()),
            sensor: plant.sensor_ref.clone().unwrap_or_else(|| "-".to_string()),
            social: plant.social_handle.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    output.table(rows);

    Ok(())
}
