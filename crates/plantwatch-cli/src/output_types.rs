use plantwatch_core::config::ConfigSource;
use plantwatch_core::models::{DisplayMode, LocationSessionState, PlantRecord, Viewport};
use plantwatch_geo::PlantQuery;
use serde::Serialize;
use tabled::Tabled;

/// Output for locate command
#[derive(Debug, Serialize)]
pub struct LocateOutput {
    pub transitions: Vec<LocationSessionState>,
    pub state: LocationSessionState,
    pub display: DisplayMode,
    pub viewport: Viewport,
    pub permission_requests: usize,
    pub position_requests: usize,
}

/// Output for map command
#[derive(Debug, Serialize)]
pub struct MapOutput {
    pub total_plants: usize,
    pub pins: Vec<PinOutput>,
    pub fit: Option<Viewport>,
}

#[derive(Debug, Serialize)]
pub struct PinOutput {
    pub plant_id: String,
    pub name: String,
    pub species: String,
    pub glyph: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
}

/// Output for plants command
#[derive(Debug, Serialize)]
pub struct PlantsOutput {
    pub query: PlantQuery,
    pub plants: Vec<PlantRecord>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub entries: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source", display_with = "display_source")]
    pub source: ConfigSource,
}

fn display_source(source: &ConfigSource) -> String {
    format!("{:?}", source)
}

#[derive(Tabled)]
pub struct PinRow {
    #[tabled(rename = "")]
    pub glyph: String,
    #[tabled(rename = "Plant")]
    pub name: String,
    #[tabled(rename = "Region")]
    pub region: String,
    #[tabled(rename = "Latitude")]
    pub latitude: String,
    #[tabled(rename = "Longitude")]
    pub longitude: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
}

#[derive(Tabled)]
pub struct PlantRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Species")]
    pub species: String,
    #[tabled(rename = "Placement")]
    pub placement: String,
    #[tabled(rename = "Age (weeks)")]
    pub age_weeks: u32,
    #[tabled(rename = "Owner")]
    pub owner: String,
    #[tabled(rename = "Sensor")]
    pub sensor: String,
    #[tabled(rename = "Social")]
    pub social: String,
}
