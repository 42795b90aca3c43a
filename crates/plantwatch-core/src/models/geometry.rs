//! Coordinate and map-region types shared by the location session and the
//! correlator.

use crate::error::{PlantwatchError, Result};
use serde::{Deserialize, Serialize};

/// A WGS 84 latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Create a coordinate, rejecting values outside the valid degree ranges
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self::new(latitude, longitude);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(PlantwatchError::InvalidCoordinate { latitude, longitude })
        }
    }

    /// Check that latitude is within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A map camera region: a center plus the latitude/longitude extent to show.
///
/// Both spans are strictly positive; every constructor enforces this, including
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewport")]
pub struct Viewport {
    center: GeoCoordinate,
    latitude_span: f64,
    longitude_span: f64,
}

impl Viewport {
    /// Latitude span used once a real position fix is known
    pub const RESOLVED_LATITUDE_SPAN: f64 = 0.02;

    /// Longitude span used once a real position fix is known
    pub const RESOLVED_LONGITUDE_SPAN: f64 = 0.01;

    /// Region shown before any position is known, and after a failed request
    pub const DEFAULT: Viewport = Viewport {
        center: GeoCoordinate::new(40.7128, -74.0060),
        latitude_span: 0.0922,
        longitude_span: 0.0421,
    };

    /// Create a viewport, validating the center and both spans
    pub fn new(center: GeoCoordinate, latitude_span: f64, longitude_span: f64) -> Result<Self> {
        if !center.is_valid() {
            return Err(PlantwatchError::InvalidCoordinate {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }
        validate_span("latitude_span", latitude_span)?;
        validate_span("longitude_span", longitude_span)?;

        Ok(Self { center, latitude_span, longitude_span })
    }

    /// The tight zoom envelope centered exactly on a resolved position
    pub fn around(center: GeoCoordinate) -> Self {
        Self {
            center,
            latitude_span: Self::RESOLVED_LATITUDE_SPAN,
            longitude_span: Self::RESOLVED_LONGITUDE_SPAN,
        }
    }

    pub fn center(&self) -> GeoCoordinate {
        self.center
    }

    pub fn latitude_span(&self) -> f64 {
        self.latitude_span
    }

    pub fn longitude_span(&self) -> f64 {
        self.longitude_span
    }

    /// Check whether a coordinate falls inside the visible region
    pub fn contains(&self, coordinate: &GeoCoordinate) -> bool {
        let half_lat = self.latitude_span / 2.0;
        let half_lon = self.longitude_span / 2.0;
        (coordinate.latitude - self.center.latitude).abs() <= half_lat
            && (coordinate.longitude - self.center.longitude).abs() <= half_lon
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn validate_span(name: &str, span: f64) -> Result<()> {
    if span.is_finite() && span > 0.0 {
        Ok(())
    } else {
        Err(PlantwatchError::InvalidViewport {
            reason: format!("{} must be strictly positive, got {}", name, span),
        })
    }
}

#[derive(Deserialize)]
struct RawViewport {
    center: GeoCoordinate,
    latitude_span: f64,
    longitude_span: f64,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = PlantwatchError;

    fn try_from(raw: RawViewport) -> Result<Self> {
        Viewport::new(raw.center, raw.latitude_span, raw.longitude_span)
    }
}
