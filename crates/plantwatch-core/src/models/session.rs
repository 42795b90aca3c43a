//! States of a one-shot location request and how the UI should present them.

use super::geometry::{GeoCoordinate, Viewport};
use serde::Serialize;

/// Message surfaced when the user or platform refuses location access
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission to access location was denied";

/// Message surfaced when no position fix could be obtained
pub const POSITION_UNAVAILABLE_MESSAGE: &str =
    "Failed to get location. Please ensure location services are enabled.";

/// Lifecycle of a location session. Exactly one state is active at a time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LocationSessionState {
    /// No request issued yet
    #[default]
    Idle,
    /// Permission and position requests in flight
    Requesting,
    /// Access refused; terminal
    PermissionDenied { message: String },
    /// The device could not produce a position; terminal
    PositionUnavailable { message: String },
    /// A position fix was obtained; terminal
    Resolved { position: GeoCoordinate, viewport: Viewport },
}

impl LocationSessionState {
    pub fn permission_denied() -> Self {
        LocationSessionState::PermissionDenied { message: PERMISSION_DENIED_MESSAGE.to_string() }
    }

    pub fn position_unavailable() -> Self {
        LocationSessionState::PositionUnavailable {
            message: POSITION_UNAVAILABLE_MESSAGE.to_string(),
        }
    }

    /// Resolved state with the viewport centered exactly on `position`
    pub fn resolved(position: GeoCoordinate) -> Self {
        LocationSessionState::Resolved { position, viewport: Viewport::around(position) }
    }

    /// Whether no further transition can happen from this state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LocationSessionState::PermissionDenied { .. }
                | LocationSessionState::PositionUnavailable { .. }
                | LocationSessionState::Resolved { .. }
        )
    }

    /// Short state name, for logs and tables
    pub fn name(&self) -> &'static str {
        match self {
            LocationSessionState::Idle => "idle",
            LocationSessionState::Requesting => "requesting",
            LocationSessionState::PermissionDenied { .. } => "permission_denied",
            LocationSessionState::PositionUnavailable { .. } => "position_unavailable",
            LocationSessionState::Resolved { .. } => "resolved",
        }
    }

    /// How a screen consuming this state must render it
    pub fn display_mode(&self) -> DisplayMode {
        match self {
            LocationSessionState::Idle | LocationSessionState::Requesting => DisplayMode::Loading,
            LocationSessionState::PermissionDenied { message }
            | LocationSessionState::PositionUnavailable { message } => {
                DisplayMode::Error { message: message.clone() }
            }
            LocationSessionState::Resolved { viewport, .. } => {
                DisplayMode::Content { viewport: *viewport }
            }
        }
    }
}

/// The single presentation mode a screen renders for a session state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayMode {
    Loading,
    Error { message: String },
    Content { viewport: Viewport },
}
