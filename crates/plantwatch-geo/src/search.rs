//! Plant list search and filtering.

use plantwatch_core::models::{Placement, PlantRecord};
use serde::{Deserialize, Serialize};

/// Filters applied to the plant list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantQuery {
    /// Case-insensitive substring matched against name or species
    pub text: Option<String>,
    pub placement: Option<Placement>,
    pub owner_id: Option<String>,
}

impl PlantQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Check whether a plant satisfies every set filter
    pub fn matches(&self, plant: &PlantRecord) -> bool {
        if let Some(placement) = self.placement {
            if plant.placement != placement {
                return false;
            }
        }

        if let Some(owner_id) = &self.owner_id {
            if &plant.owner_id != owner_id {
                return false;
            }
        }

        match self.needle() {
            Some(needle) => {
                plant.name.to_lowercase().contains(&needle)
                    || plant.species.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Lowercased search text, or `None` when blank
    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }
}

/// Plants matching `query`, in input order
pub fn filter_plants<'a>(plants: &'a [PlantRecord], query: &PlantQuery) -> Vec<&'a PlantRecord> {
    plants.iter().filter(|plant| query.matches(plant)).collect()
}
