use crate::error::{PlantwatchError, Result};
use crate::models::{GeoCoordinate, Viewport};
use crate::ports::Accuracy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "plantwatch.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Plantwatch
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub default_latitude: ConfigValue<f64>,
    pub default_longitude: ConfigValue<f64>,
    pub default_latitude_span: ConfigValue<f64>,
    pub default_longitude_span: ConfigValue<f64>,
    pub accuracy: ConfigValue<Accuracy>,
    pub fix_timeout_secs: ConfigValue<u64>,
    pub simulation_delay_ms: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let viewport = Viewport::DEFAULT;
        Self {
            default_latitude: ConfigValue::new(viewport.center().latitude, ConfigSource::Default),
            default_longitude: ConfigValue::new(
                viewport.center().longitude,
                ConfigSource::Default,
            ),
            default_latitude_span: ConfigValue::new(
                viewport.latitude_span(),
                ConfigSource::Default,
            ),
            default_longitude_span: ConfigValue::new(
                viewport.longitude_span(),
                ConfigSource::Default,
            ),
            accuracy: ConfigValue::new(Accuracy::Balanced, ConfigSource::Default),
            fix_timeout_secs: ConfigValue::new(15, ConfigSource::Default),
            simulation_delay_ms: ConfigValue::new(1000, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| PlantwatchError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| PlantwatchError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(latitude) = file_config.default_latitude {
            self.default_latitude.update(latitude, ConfigSource::File);
        }

        if let Some(longitude) = file_config.default_longitude {
            self.default_longitude.update(longitude, ConfigSource::File);
        }

        if let Some(span) = file_config.default_latitude_span {
            self.default_latitude_span.update(span, ConfigSource::File);
        }

        if let Some(span) = file_config.default_longitude_span {
            self.default_longitude_span.update(span, ConfigSource::File);
        }

        if let Some(accuracy) = file_config.accuracy {
            self.accuracy.update(accuracy.parse()?, ConfigSource::File);
        }

        if let Some(timeout) = file_config.fix_timeout_secs {
            if timeout == 0 {
                return Err(PlantwatchError::ConfigInvalid {
                    key: "fix_timeout_secs".to_string(),
                    reason: "timeout must be at least one second".to_string(),
                });
            }
            self.fix_timeout_secs.update(timeout, ConfigSource::File);
        }

        if let Some(delay) = file_config.simulation_delay_ms {
            self.simulation_delay_ms.update(delay, ConfigSource::File);
        }

        // Surface a bad viewport at load time rather than on first use
        self.default_viewport()?;

        Ok(self)
    }

    /// Load the default config file if it exists in `dir`
    pub fn load_from_dir_if_present<P: AsRef<Path>>(self, dir: P) -> Result<Self> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // PLANTWATCH_DEFAULT_LATITUDE
        if let Some(latitude) = env_value_where(
            "PLANTWATCH_DEFAULT_LATITUDE",
            "a latitude between -90 and 90",
            |latitude: &f64| (-90.0..=90.0).contains(latitude),
        ) {
            self.default_latitude.update(latitude, ConfigSource::Environment);
        }

        // PLANTWATCH_DEFAULT_LONGITUDE
        if let Some(longitude) = env_value_where(
            "PLANTWATCH_DEFAULT_LONGITUDE",
            "a longitude between -180 and 180",
            |longitude: &f64| (-180.0..=180.0).contains(longitude),
        ) {
            self.default_longitude.update(longitude, ConfigSource::Environment);
        }

        // PLANTWATCH_DEFAULT_LATITUDE_SPAN
        if let Some(span) =
            env_value_where("PLANTWATCH_DEFAULT_LATITUDE_SPAN", "a positive number", is_span)
        {
            self.default_latitude_span.update(span, ConfigSource::Environment);
        }

        // PLANTWATCH_DEFAULT_LONGITUDE_SPAN
        if let Some(span) =
            env_value_where("PLANTWATCH_DEFAULT_LONGITUDE_SPAN", "a positive number", is_span)
        {
            self.default_longitude_span.update(span, ConfigSource::Environment);
        }

        // PLANTWATCH_ACCURACY
        if let Ok(accuracy_str) = env::var("PLANTWATCH_ACCURACY") {
            match accuracy_str.parse::<Accuracy>() {
                Ok(accuracy) => self.accuracy.update(accuracy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLANTWATCH_ACCURACY value '{}': expected lowest, low, balanced, high, highest, or best_for_navigation",
                    accuracy_str
                ),
            }
        }

        // PLANTWATCH_FIX_TIMEOUT_SECS
        if let Some(timeout) = env_value_where(
            "PLANTWATCH_FIX_TIMEOUT_SECS",
            "a positive integer",
            |timeout: &u64| *timeout > 0,
        ) {
            self.fix_timeout_secs.update(timeout, ConfigSource::Environment);
        }

        // PLANTWATCH_SIMULATION_DELAY_MS
        if let Some(delay) = env_value::<u64>("PLANTWATCH_SIMULATION_DELAY_MS", "an integer") {
            self.simulation_delay_ms.update(delay, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) -> Result<()> {
        if overrides.fix_timeout_secs == Some(0) {
            return Err(PlantwatchError::ConfigInvalid {
                key: "fix_timeout_secs".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        if let Some(accuracy) = overrides.accuracy {
            self.accuracy.update(accuracy, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.fix_timeout_secs {
            self.fix_timeout_secs.update(timeout, ConfigSource::Cli);
        }

        if let Some(delay) = overrides.simulation_delay_ms {
            self.simulation_delay_ms.update(delay, ConfigSource::Cli);
        }

        Ok(())
    }

    /// The viewport shown before a position is known, and after failures
    pub fn default_viewport(&self) -> Result<Viewport> {
        let center = GeoCoordinate::validated(
            self.default_latitude.value,
            self.default_longitude.value,
        )?;
        Viewport::new(center, self.default_latitude_span.value, self.default_longitude_span.value)
    }

    /// Upper bound on how long a position fix may take
    pub fn fix_timeout(&self) -> Duration {
        Duration::from_secs(self.fix_timeout_secs.value)
    }

    /// Delay before the simulated location service answers
    pub fn simulation_delay(&self) -> Duration {
        Duration::from_millis(self.simulation_delay_ms.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "default_latitude".to_string(),
            (self.default_latitude.value.to_string(), self.default_latitude.source),
        );

        map.insert(
            "default_longitude".to_string(),
            (self.default_longitude.value.to_string(), self.default_longitude.source),
        );

        map.insert(
            "default_latitude_span".to_string(),
            (self.default_latitude_span.value.to_string(), self.default_latitude_span.source),
        );

        map.insert(
            "default_longitude_span".to_string(),
            (self.default_longitude_span.value.to_string(), self.default_longitude_span.source),
        );

        map.insert("accuracy".to_string(), (self.accuracy.value.to_string(), self.accuracy.source));

        map.insert(
            "fix_timeout_secs".to_string(),
            (self.fix_timeout_secs.value.to_string(), self.fix_timeout_secs.source),
        );

        map.insert(
            "simulation_delay_ms".to_string(),
            (self.simulation_delay_ms.value.to_string(), self.simulation_delay_ms.source),
        );

        map
    }
}

/// Read and parse an environment variable, warning when it is malformed
fn env_value<T: FromStr>(key: &str, expected: &str) -> Option<T> {
    env_value_where(key, expected, |_: &T| true)
}

/// Like `env_value`, but values failing `valid` are also rejected
fn env_value_where<T: FromStr>(key: &str, expected: &str, valid: impl Fn(&T) -> bool) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Some(value),
        _ => {
            tracing::warn!("Invalid {} value '{}': expected {}", key, raw, expected);
            None
        }
    }
}

fn is_span(span: &f64) -> bool {
    span.is_finite() && *span > 0.0
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    default_latitude: Option<f64>,
    default_longitude: Option<f64>,
    default_latitude_span: Option<f64>,
    default_longitude_span: Option<f64>,
    accuracy: Option<String>,
    fix_timeout_secs: Option<u64>,
    simulation_delay_ms: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub accuracy: Option<Accuracy>,
    pub fix_timeout_secs: Option<u64>,
    pub simulation_delay_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.default_latitude.value, 40.7128);
        assert_eq!(config.default_latitude.source, ConfigSource::Default);
        assert_eq!(config.accuracy.value, Accuracy::Balanced);
        assert_eq!(config.fix_timeout(), Duration::from_secs(15));
        assert_eq!(config.default_viewport().unwrap(), Viewport::DEFAULT);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
default_latitude = 38.8951
default_longitude = -77.0364
accuracy = "high"
fix_timeout_secs = 5
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.default_latitude.value, 38.8951);
        assert_eq!(config.default_latitude.source, ConfigSource::File);
        assert_eq!(config.accuracy.value, Accuracy::High);
        assert_eq!(config.fix_timeout_secs.value, 5);
        assert_eq!(config.default_latitude_span.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_rejects_non_positive_span() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_latitude_span = 0.0").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(PlantwatchError::InvalidViewport { .. })));
    }

    #[test]
    fn test_file_rejects_zero_timeout() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "fix_timeout_secs = 0").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(PlantwatchError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_inspection_map_has_every_key() {
        let map = LayeredConfig::with_defaults().to_inspection_map();
        assert_eq!(map.len(), 7);
        assert_eq!(map["accuracy"], ("balanced".to_string(), ConfigSource::Default));
    }
}
