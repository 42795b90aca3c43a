use crate::error::{PlantwatchError, Result};
use crate::models::GeoCoordinate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a foreground location permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Accuracy hint passed to the platform when requesting a position fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    Lowest,
    Low,
    #[default]
    Balanced,
    High,
    Highest,
    BestForNavigation,
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Accuracy::Lowest => "lowest",
            Accuracy::Low => "low",
            Accuracy::Balanced => "balanced",
            Accuracy::High => "high",
            Accuracy::Highest => "highest",
            Accuracy::BestForNavigation => "best_for_navigation",
        };
        f.write_str(name)
    }
}

impl FromStr for Accuracy {
    type Err = PlantwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "lowest" => Ok(Accuracy::Lowest),
            "low" => Ok(Accuracy::Low),
            "balanced" => Ok(Accuracy::Balanced),
            "high" => Ok(Accuracy::High),
            "highest" => Ok(Accuracy::Highest),
            "best_for_navigation" | "navigation" => Ok(Accuracy::BestForNavigation),
            _ => Err(PlantwatchError::ConfigInvalid {
                key: "accuracy".to_string(),
                reason: format!(
                    "Invalid accuracy: {}. Use lowest, low, balanced, high, highest, or best_for_navigation",
                    s
                ),
            }),
        }
    }
}

/// Port for the platform geolocation service
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask the user for foreground location access
    async fn request_foreground_permission(&self) -> Result<PermissionStatus>;

    /// Request a single position fix
    ///
    /// # Arguments
    /// * `accuracy` - Accuracy hint for the fix
    ///
    /// # Returns
    /// The device position, or an error when no fix could be produced
    async fn current_position(&self, accuracy: Accuracy) -> Result<GeoCoordinate>;
}
