use crate::error::{PlantwatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a plant is grown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Indoor,
    Outdoor,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Indoor => write!(f, "indoor"),
            Placement::Outdoor => write!(f, "outdoor"),
        }
    }
}

impl FromStr for Placement {
    type Err = PlantwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "indoor" | "in" => Ok(Placement::Indoor),
            "outdoor" | "out" => Ok(Placement::Outdoor),
            _ => Err(PlantwatchError::ConfigInvalid {
                key: "placement".to_string(),
                reason: format!("Invalid placement: {}. Use indoor or outdoor", s),
            }),
        }
    }
}

/// A monitored plant as held in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    pub species: String,
    pub image_ref: String,
    pub placement: Placement,
    pub age_weeks: u32,
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_handle: Option<String>,
}

/// Kind of account that owns plants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    Household,
    Commercial,
}

/// An account that owns plants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub email: String,
    pub kind: OwnerKind,
}
