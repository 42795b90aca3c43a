//! Integration tests for CLI output
//!
//! These tests run the `plantwatch` binary and check its JSON output.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

fn plantwatch(args: &[&str]) -> Output {
    // Run from an empty directory so no stray plantwatch.toml is picked up
    let cwd = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_plantwatch"))
        .args(args)
        .current_dir(cwd.path())
        .env("RUST_LOG", "error")
        .env_remove("PLANTWATCH_FIX_TIMEOUT_SECS")
        .env_remove("PLANTWATCH_SIMULATION_DELAY_MS")
        .output()
        .expect("Failed to execute command")
}

fn json_data(output: &Output) -> serde_json::Value {
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(parsed["status"], "success");
    parsed["data"].clone()
}

#[test]
fn test_map_json_lists_located_plants_in_catalog_order() {
    let data = json_data(&plantwatch(&["map", "--json"]));

    assert_eq!(data["total_plants"], 5);
    let ids: Vec<_> =
        data["pins"].as_array().unwrap().iter().map(|p| p["plant_id"].clone()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(data["pins"][0]["glyph"], "🌿");
    assert_eq!(data["pins"][0]["region"], "Living Room");
    assert!(data["fit"].is_null());
}

#[test]
fn test_map_near_orders_by_distance() {
    let data = json_data(&plantwatch(&["map", "--json", "--near", "38.8951,-77.0364"]));

    let pins = data["pins"].as_array().unwrap();
    assert_eq!(pins[0]["plant_id"], "4");
    assert_eq!(pins[0]["distance_meters"], 0.0);
    assert_eq!(pins[1]["plant_id"], "5");
}

#[test]
fn test_map_owner_filter_with_fit() {
    let data = json_data(&plantwatch(&["map", "--json", "--owner", "2", "--fit"]));

    assert_eq!(data["total_plants"], 2);
    assert_eq!(data["pins"].as_array().unwrap().len(), 2);
    assert!(data["fit"]["latitude_span"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_map_unknown_owner_warns_on_stderr() {
    let output = plantwatch(&["map", "--json", "--owner", "99"]);
    let data = json_data(&output);

    assert_eq!(data["total_plants"], 0);
    assert!(data["pins"].as_array().unwrap().is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"status\":\"warning\""));
    assert!(stderr.contains("No owner with id '99'"));
}

#[test]
fn test_plants_search() {
    let data = json_data(&plantwatch(&["plants", "FIG", "--json"]));

    let plants = data["plants"].as_array().unwrap();
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0]["name"], "Fiddle Leaf Fig");
}

#[test]
fn test_plants_table_shows_social_handle() {
    let output = plantwatch(&["plants", "fig"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fiddle Leaf Fig"));
    assert!(stdout.contains("@fiddle_feelings"));
    assert!(!stdout.contains("Monstera"));
}

#[test]
fn test_plants_placement_filter() {
    let data = json_data(&plantwatch(&["plants", "--placement", "outdoor", "--json"]));
    assert_eq!(data["plants"].as_array().unwrap().len(), 2);
}

#[test]
fn test_locate_resolves() {
    let data = json_data(&plantwatch(&[
        "locate",
        "--json",
        "--delay-ms",
        "0",
        "--latitude",
        "51.5",
        "--longitude",
        "-0.12",
    ]));

    let transitions: Vec<_> =
        data["transitions"].as_array().unwrap().iter().map(|t| t["state"].clone()).collect();
    assert_eq!(transitions, vec!["requesting", "resolved"]);
    assert_eq!(data["display"]["mode"], "content");
    assert_eq!(data["viewport"]["center"]["latitude"], 51.5);
    assert_eq!(data["viewport"]["latitude_span"], 0.02);
    assert_eq!(data["permission_requests"], 1);
    assert_eq!(data["position_requests"], 1);
}

#[test]
fn test_locate_denied_keeps_default_viewport() {
    let data = json_data(&plantwatch(&["locate", "--json", "--deny", "--delay-ms", "0"]));

    let transitions: Vec<_> =
        data["transitions"].as_array().unwrap().iter().map(|t| t["state"].clone()).collect();
    assert_eq!(transitions, vec!["requesting", "permission_denied"]);
    assert_eq!(data["state"]["state"], "permission_denied");
    assert_eq!(data["display"]["mode"], "error");
    assert_eq!(data["viewport"]["latitude_span"], 0.0922);
    assert_eq!(data["position_requests"], 0);
}

#[test]
fn test_locate_timeout() {
    let data = json_data(&plantwatch(&["locate", "--json", "--hang", "--timeout-secs", "1"]));
    assert_eq!(data["state"]["state"], "position_unavailable");
}

#[test]
fn test_config_file_is_reported_with_source() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "accuracy = \"high\"").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let data = json_data(&plantwatch(&["config", "--json", "--config", &path]));

    let entries = data["entries"].as_array().unwrap();
    let accuracy = entries.iter().find(|e| e["key"] == "accuracy").unwrap();
    assert_eq!(accuracy["value"], "high");
    assert_eq!(accuracy["source"], "File");
}

#[test]
fn test_missing_catalog_fails() {
    let output = plantwatch(&["map", "--catalog", "/nonexistent/catalog.json"]);
    assert!(!output.status.success());
}
