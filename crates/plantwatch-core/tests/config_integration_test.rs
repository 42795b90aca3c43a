//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use plantwatch_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use plantwatch_core::ports::Accuracy;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const ENV_KEYS: [&str; 7] = [
    "PLANTWATCH_DEFAULT_LATITUDE",
    "PLANTWATCH_DEFAULT_LONGITUDE",
    "PLANTWATCH_DEFAULT_LATITUDE_SPAN",
    "PLANTWATCH_DEFAULT_LONGITUDE_SPAN",
    "PLANTWATCH_ACCURACY",
    "PLANTWATCH_FIX_TIMEOUT_SECS",
    "PLANTWATCH_SIMULATION_DELAY_MS",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
accuracy = "low"
fix_timeout_secs = 30
"#
    )
    .unwrap();

    env::set_var("PLANTWATCH_ACCURACY", "highest");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.accuracy.value, Accuracy::Highest);
    assert_eq!(config.accuracy.source, ConfigSource::Environment);
    assert_eq!(config.fix_timeout_secs.value, 30);
    assert_eq!(config.fix_timeout_secs.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("PLANTWATCH_FIX_TIMEOUT_SECS", "20");
    env::set_var("PLANTWATCH_SIMULATION_DELAY_MS", "250");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    assert_eq!(config.fix_timeout_secs.value, 20);

    config.update_from_cli(CliConfigOverrides {
        fix_timeout_secs: Some(3),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(config.fix_timeout_secs.value, 3);
    assert_eq!(config.fix_timeout_secs.source, ConfigSource::Cli);
    assert_eq!(config.simulation_delay_ms.value, 250);
    assert_eq!(config.simulation_delay_ms.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    env::set_var("PLANTWATCH_ACCURACY", "telepathic");
    env::set_var("PLANTWATCH_DEFAULT_LATITUDE", "north");
    env::set_var("PLANTWATCH_FIX_TIMEOUT_SECS", "0");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.accuracy.value, Accuracy::Balanced);
    assert_eq!(config.accuracy.source, ConfigSource::Default);
    assert_eq!(config.default_latitude.source, ConfigSource::Default);
    assert_eq!(config.fix_timeout_secs.value, 15);

    clear_env();
}

#[test]
#[serial]
fn test_out_of_range_env_viewport_keeps_lower_layer() {
    clear_env();
    env::set_var("PLANTWATCH_DEFAULT_LATITUDE", "200");
    env::set_var("PLANTWATCH_DEFAULT_LONGITUDE", "-181");
    env::set_var("PLANTWATCH_DEFAULT_LATITUDE_SPAN", "-1");
    env::set_var("PLANTWATCH_DEFAULT_LONGITUDE_SPAN", "NaN");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "default_latitude_span = 0.5").unwrap();

    let config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.default_latitude.source, ConfigSource::Default);
    assert_eq!(config.default_longitude.source, ConfigSource::Default);
    assert_eq!(config.default_latitude_span.value, 0.5);
    assert_eq!(config.default_latitude_span.source, ConfigSource::File);
    assert_eq!(config.default_longitude_span.source, ConfigSource::Default);

    let viewport = config.default_viewport().unwrap();
    assert_eq!(viewport.center().latitude, 40.7128);
    assert_eq!(viewport.latitude_span(), 0.5);

    clear_env();
}

#[test]
#[serial]
fn test_in_range_env_viewport_is_applied() {
    clear_env();
    env::set_var("PLANTWATCH_DEFAULT_LATITUDE", "-90");
    env::set_var("PLANTWATCH_DEFAULT_LONGITUDE_SPAN", "0.25");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.default_latitude.value, -90.0);
    assert_eq!(config.default_latitude.source, ConfigSource::Environment);
    assert_eq!(config.default_viewport().unwrap().longitude_span(), 0.25);

    clear_env();
}

#[test]
fn test_cli_rejects_zero_timeout() {
    let mut config = LayeredConfig::with_defaults();

    let result = config.update_from_cli(CliConfigOverrides {
        fix_timeout_secs: Some(0),
        simulation_delay_ms: Some(5),
        ..Default::default()
    });

    assert!(result.is_err());
    assert_eq!(config.fix_timeout_secs.value, 15);
    assert_eq!(config.simulation_delay_ms.source, ConfigSource::Default);
}

#[test]
fn test_load_from_dir_if_present() {
    let dir = TempDir::new().unwrap();

    let config = LayeredConfig::with_defaults().load_from_dir_if_present(dir.path()).unwrap();
    assert_eq!(config.simulation_delay_ms.source, ConfigSource::Default);

    fs::write(dir.path().join("plantwatch.toml"), "simulation_delay_ms = 10\n").unwrap();
    let config = LayeredConfig::with_defaults().load_from_dir_if_present(dir.path()).unwrap();
    assert_eq!(config.simulation_delay_ms.value, 10);
    assert_eq!(config.simulation_delay_ms.source, ConfigSource::File);
}

#[test]
fn test_invalid_toml_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "fix_timeout_secs = \"soon\"").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}
