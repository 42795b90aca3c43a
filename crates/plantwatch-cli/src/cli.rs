use clap::{Parser, Subcommand};
use plantwatch_core::config::CliConfigOverrides;
use plantwatch_core::models::{GeoCoordinate, Placement};
use plantwatch_core::ports::Accuracy;
use std::path::PathBuf;

/// Plantwatch - plant locations and device location sessions
#[derive(Parser, Debug)]
#[command(name = "plantwatch")]
#[command(about = "Plant locations and device location sessions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./plantwatch.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON plant catalog to use instead of the built-in sample data
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one location session against the simulated location service
    Locate(LocateArgs),

    /// List plants that have a recorded location
    Map(MapArgs),

    /// Search the plant catalog
    Plants(PlantsArgs),

    /// Show effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Simulate the user refusing location access
    #[arg(long, conflicts_with_all = ["fail", "hang"])]
    pub deny: bool,

    /// Simulate the device failing to produce a position
    #[arg(long, conflicts_with = "hang")]
    pub fail: bool,

    /// Simulate a position fix that never answers (ends by timeout)
    #[arg(long)]
    pub hang: bool,

    /// Delay before the simulated fix answers, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Position fix timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Accuracy hint (lowest, low, balanced, high, highest, best_for_navigation)
    #[arg(long, value_parser = parse_accuracy)]
    pub accuracy: Option<Accuracy>,

    /// Latitude the simulated device reports
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude the simulated device reports
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    pub longitude: Option<f64>,
}

impl LocateArgs {
    pub fn config_overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            accuracy: self.accuracy,
            fix_timeout_secs: self.timeout_secs,
            simulation_delay_ms: self.delay_ms,
        }
    }
}

#[derive(Parser, Debug)]
pub struct MapArgs {
    /// Only show plants belonging to this owner id
    #[arg(long)]
    pub owner: Option<String>,

    /// Order plants by distance from "LAT,LON"
    #[arg(long, value_name = "LAT,LON", value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub near: Option<GeoCoordinate>,

    /// Also print a viewport that fits every pin
    #[arg(long)]
    pub fit: bool,

    /// Span multiplier for --fit
    #[arg(long, default_value = "1.2")]
    pub padding: f64,
}

#[derive(Parser, Debug)]
pub struct PlantsArgs {
    /// Text matched against plant name or species (case-insensitive)
    pub query: Option<String>,

    /// Only indoor or only outdoor plants
    #[arg(long, value_parser = parse_placement)]
    pub placement: Option<Placement>,

    /// Only plants belonging to this owner id
    #[arg(long)]
    pub owner: Option<String>,
}

fn parse_accuracy(s: &str) -> Result<Accuracy, String> {
    s.parse().map_err(|e: plantwatch_core::PlantwatchError| e.to_string())
}

fn parse_placement(s: &str) -> Result<Placement, String> {
    s.parse().map_err(|e: plantwatch_core::PlantwatchError| e.to_string())
}

/// Parse "LAT,LON" into a validated coordinate
fn parse_coordinate(s: &str) -> Result<GeoCoordinate, String> {
    let (lat, lon) = s.split_once(',').ok_or_else(|| format!("expected LAT,LON, got '{}'", s))?;
    let latitude: f64 =
        lat.trim().parse().map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let longitude: f64 =
        lon.trim().parse().map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    GeoCoordinate::validated(latitude, longitude).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(
            parse_coordinate("40.7128, -74.0060").unwrap(),
            GeoCoordinate::new(40.7128, -74.0060)
        );
        assert!(parse_coordinate("40.7128").is_err());
        assert!(parse_coordinate("95,0").is_err());
        assert!(parse_coordinate("north,0").is_err());
    }

    #[test]
    fn test_locate_flags_conflict() {
        let result = Cli::try_parse_from(["plantwatch", "locate", "--deny", "--fail"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_locate_overrides() {
        let cli = Cli::try_parse_from([
            "plantwatch",
            "locate",
            "--timeout-secs",
            "3",
            "--accuracy",
            "high",
        ])
        .unwrap();
        let Commands::Locate(args) = cli.command else {
            panic!("expected locate command");
        };
        let overrides = args.config_overrides();
        assert_eq!(overrides.fix_timeout_secs, Some(3));
        assert_eq!(overrides.accuracy, Some(Accuracy::High));
        assert_eq!(overrides.simulation_delay_ms, None);
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let cli =
            Cli::try_parse_from(["plantwatch", "map", "--near", "-33.86,151.21"]).unwrap();
        let Commands::Map(args) = cli.command else {
            panic!("expected map command");
        };
        assert_eq!(args.near, Some(GeoCoordinate::new(-33.86, 151.21)));
    }
}
