//! Error types for Plantwatch

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlantwatchError {
    // Geometry errors
    #[error("Invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("Invalid coordinate ({latitude}, {longitude}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    // Location provider errors
    #[error("Location permission request failed: {reason}")]
    PermissionRequestFailed { reason: String },

    #[error("Position unavailable: {reason}")]
    PositionUnavailable { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Catalog errors
    #[error("Invalid plant catalog: {reason}")]
    CatalogInvalid { reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, PlantwatchError>;
