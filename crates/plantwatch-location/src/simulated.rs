//! Simulated location service for development and testing.

use async_trait::async_trait;
use plantwatch_core::config::LayeredConfig;
use plantwatch_core::error::{PlantwatchError, Result};
use plantwatch_core::models::GeoCoordinate;
use plantwatch_core::ports::{Accuracy, LocationProvider, PermissionStatus};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum PermissionScript {
    Grant,
    Deny,
    Fail(String),
}

#[derive(Debug, Clone, PartialEq)]
enum FixScript {
    Succeed,
    Fail(String),
    NeverResolve,
}

/// Location provider that answers from a script instead of a device.
///
/// By default it grants permission and, after a fixed delay, reports a fixed
/// position. It counts the requests it receives.
#[derive(Debug)]
pub struct SimulatedLocationProvider {
    delay: Duration,
    position: GeoCoordinate,
    permission: PermissionScript,
    fix: FixScript,
    permission_requests: AtomicUsize,
    position_requests: AtomicUsize,
}

impl Default for SimulatedLocationProvider {
    fn default() -> Self {
        Self::new(GeoCoordinate::new(40.7128, -74.0060))
    }
}

impl SimulatedLocationProvider {
    /// Provider that resolves to `position` after a one second delay
    pub fn new(position: GeoCoordinate) -> Self {
        Self {
            delay: Duration::from_secs(1),
            position,
            permission: PermissionScript::Grant,
            fix: FixScript::Succeed,
            permission_requests: AtomicUsize::new(0),
            position_requests: AtomicUsize::new(0),
        }
    }

    /// Provider resolving to the configured default center after the
    /// configured simulation delay
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        let center = config.default_viewport()?.center();
        Ok(Self::new(center).with_delay(config.simulation_delay()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_position(mut self, position: GeoCoordinate) -> Self {
        self.position = position;
        self
    }

    /// Refuse the permission prompt
    pub fn deny_permission(mut self) -> Self {
        self.permission = PermissionScript::Deny;
        self
    }

    /// Make the permission request itself fail
    pub fn fail_permission(mut self, reason: impl Into<String>) -> Self {
        self.permission = PermissionScript::Fail(reason.into());
        self
    }

    /// Grant permission but fail the position fix
    pub fn fail_position(mut self, reason: impl Into<String>) -> Self {
        self.fix = FixScript::Fail(reason.into());
        self
    }

    /// Grant permission but never answer the position fix
    pub fn never_resolve(mut self) -> Self {
        self.fix = FixScript::NeverResolve;
        self
    }

    /// Number of permission prompts received
    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    /// Number of position fixes requested
    pub fn position_requests(&self) -> usize {
        self.position_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for SimulatedLocationProvider {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);

        match &self.permission {
            PermissionScript::Grant => Ok(PermissionStatus::Granted),
            PermissionScript::Deny => Ok(PermissionStatus::Denied),
            PermissionScript::Fail(reason) => {
                Err(PlantwatchError::PermissionRequestFailed { reason: reason.clone() })
            }
        }
    }

    async fn current_position(&self, accuracy: Accuracy) -> Result<GeoCoordinate> {
        self.position_requests.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(%accuracy, delay_ms = self.delay.as_millis() as u64, "Simulating position fix");

        match &self.fix {
            FixScript::Succeed => {
                tokio::time::sleep(self.delay).await;
                Ok(self.position)
            }
            FixScript::Fail(reason) => {
                tokio::time::sleep(self.delay).await;
                Err(PlantwatchError::PositionUnavailable { reason: reason.clone() })
            }
            FixScript::NeverResolve => std::future::pending().await,
        }
    }
}
