//! Locate command implementation

use crate::cli::LocateArgs;
use crate::output::OutputWriter;
use crate::output_types::LocateOutput;
use anyhow::{Context, Result};
use plantwatch_core::config::LayeredConfig;
use plantwatch_core::models::{DisplayMode, GeoCoordinate, LocationSessionState};
use plantwatch_location::{LocationSession, SessionOptions, SimulatedLocationProvider};
use std::sync::Arc;

pub async fn execute(args: LocateArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let options = SessionOptions::from_config(config).context("Invalid location configuration")?;
    let provider = Arc::new(build_provider(&args, config)?);

    let session = LocationSession::idle(provider.clone(), options);
    let mut subscription = session.subscribe();
    session.start();

    let mut transitions = Vec::new();
    while let Some(state) = subscription.next().await {
        // Subscribed before start, so the idle snapshot comes first
        if matches!(state, LocationSessionState::Idle) {
            continue;
        }
        if !output.is_json() {
            output.info(describe(&state));
        }
        transitions.push(state);
    }

    let state = session.state();
    let display = session.display_mode();
    let viewport = session.viewport();

    if output.is_json() {
        return output.result(LocateOutput {
            transitions,
            state,
            display,
            viewport,
            permission_requests: provider.permission_requests(),
            position_requests: provider.position_requests(),
        });
    }

    match &display {
        DisplayMode::Content { .. } => output.success("Location resolved"),
        DisplayMode::Error { message } => output.error(message),
        DisplayMode::Loading => output.warning("Location session ended before settling"),
    }

    output.section("Viewport");
    output.kv("Center", format_coordinate(&viewport.center()));
    output.kv("Latitude Span", viewport.latitude_span());
    output.kv("Longitude Span", viewport.longitude_span());
    output.kv(
        "Requests",
        format!(
            "{} permission, {} position",
            provider.permission_requests(),
            provider.position_requests()
        ),
    );

    Ok(())
}

fn build_provider(args: &LocateArgs, config: &LayeredConfig) -> Result<SimulatedLocationProvider> {
    let mut provider = SimulatedLocationProvider::from_config(config)?;

    if let (Some(latitude), Some(longitude)) = (args.latitude, args.longitude) {
        provider = provider.with_position(GeoCoordinate::validated(latitude, longitude)?);
    }
    if args.deny {
        provider = provider.deny_permission();
    }
    if args.fail {
        provider = provider.fail_position("simulated provider error");
    }
    if args.hang {
        provider = provider.never_resolve();
    }

    Ok(provider)
}

fn describe(state: &LocationSessionState) -> String {
    match state {
        LocationSessionState::Idle | LocationSessionState::Requesting => {
            "Requesting location permission and position".to_string()
        }
        LocationSessionState::PermissionDenied { message } => format!("Permission denied: {}", message),
        LocationSessionState::PositionUnavailable { message } => {
            format!("Position unavailable: {}", message)
        }
        LocationSessionState::Resolved { position, .. } => {
            format!("Resolved at {}", format_coordinate(position))
        }
    }
}

fn format_coordinate(coordinate: &GeoCoordinate) -> String {
    format!("{:.4}, {:.4}", coordinate.latitude, coordinate.longitude)
}
