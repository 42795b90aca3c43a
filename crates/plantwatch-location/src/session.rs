//! One-shot location session state machine.
//!
//! ```text
//! Idle --start()--> Requesting
//! Requesting --denied--> PermissionDenied
//! Requesting --granted, fix ok--> Resolved
//! Requesting --granted, fix failed or timed out--> PositionUnavailable
//! ```
//!
//! The driver task spawned by `start()` is the only writer of the state. Every
//! session issues at most one permission request and one position request; a
//! new session must be constructed to retry.

use plantwatch_core::config::LayeredConfig;
use plantwatch_core::error::Result;
use plantwatch_core::models::{DisplayMode, GeoCoordinate, LocationSessionState, Viewport};
use plantwatch_core::ports::{Accuracy, LocationProvider, PermissionStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::timeout;

/// Transitions buffered per subscriber. A session makes at most four.
const TRANSITION_BUFFER: usize = 8;

/// Tunables for a single session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Accuracy hint for the position fix
    pub accuracy: Accuracy,
    /// Upper bound on the position fix; expiry counts as an unavailable position
    pub fix_timeout: Duration,
    /// Viewport exposed until a position is resolved, and after failures
    pub default_viewport: Viewport,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Balanced,
            fix_timeout: Duration::from_secs(15),
            default_viewport: Viewport::DEFAULT,
        }
    }
}

impl SessionOptions {
    /// Build options from layered configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        Ok(Self {
            accuracy: config.accuracy.value,
            fix_timeout: config.fix_timeout(),
            default_viewport: config.default_viewport()?,
        })
    }
}

struct Shared {
    state: watch::Sender<LocationSessionState>,
    transitions: broadcast::Sender<LocationSessionState>,
}

impl Shared {
    /// Apply a transition unless the session already settled
    fn transition(&self, next: LocationSessionState) -> bool {
        let mut previous = "";
        let applied = self.state.send_if_modified(|current| {
            if current.is_terminal() {
                return false;
            }
            previous = current.name();
            *current = next.clone();
            true
        });

        if applied {
            tracing::debug!(from = previous, to = next.name(), "Location session transition");
            // No receivers is fine; late subscribers start from the snapshot
            let _ = self.transitions.send(next);
        }

        applied
    }
}

/// Acquires the device position once and exposes the outcome.
///
/// Construct inside a tokio runtime: starting the session spawns the driver
/// task. Dropping the session aborts any request still in flight.
pub struct LocationSession {
    shared: Arc<Shared>,
    provider: Arc<dyn LocationProvider>,
    options: SessionOptions,
    driver: OnceLock<AbortHandle>,
}

impl LocationSession {
    /// Create a session and immediately start it.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn new(provider: Arc<dyn LocationProvider>, options: SessionOptions) -> Self {
        let session = Self::idle(provider, options);
        session.start();
        session
    }

    /// Create a session in the `Idle` state without issuing any request.
    ///
    /// Lets a caller attach observers before calling [`start`](Self::start).
    pub fn idle(provider: Arc<dyn LocationProvider>, options: SessionOptions) -> Self {
        let (state, _) = watch::channel(LocationSessionState::Idle);
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);

        Self {
            shared: Arc::new(Shared { state, transitions }),
            provider,
            options,
            driver: OnceLock::new(),
        }
    }

    /// Issue the permission and position requests.
    ///
    /// `Requesting` is entered before this returns. Only the first call has any
    /// effect; the return value tells whether this call started the session.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn start(&self) -> bool {
        let started = self.shared.state.send_if_modified(|current| {
            if matches!(current, LocationSessionState::Idle) {
                *current = LocationSessionState::Requesting;
                true
            } else {
                false
            }
        });

        if !started {
            tracing::trace!("Location session already started");
            return false;
        }

        tracing::debug!(from = "idle", to = "requesting", "Location session transition");
        let _ = self.shared.transitions.send(LocationSessionState::Requesting);

        let shared = Arc::clone(&self.shared);
        let provider = Arc::clone(&self.provider);
        let options = self.options.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let outcome = acquire(provider.as_ref(), &options).await;
            shared.transition(outcome);
        });
        let _ = self.driver.set(handle.abort_handle());

        true
    }

    /// Snapshot of the current state
    pub fn state(&self) -> LocationSessionState {
        self.shared.state.borrow().clone()
    }

    /// Viewport to display: the resolved one, or the default otherwise
    pub fn viewport(&self) -> Viewport {
        match &*self.shared.state.borrow() {
            LocationSessionState::Resolved { viewport, .. } => *viewport,
            _ => self.options.default_viewport,
        }
    }

    /// The resolved device position, if any
    pub fn position(&self) -> Option<GeoCoordinate> {
        match &*self.shared.state.borrow() {
            LocationSessionState::Resolved { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// How a screen should render the current state
    pub fn display_mode(&self) -> DisplayMode {
        self.shared.state.borrow().display_mode()
    }

    /// Wait until the session reaches a terminal state.
    ///
    /// Never completes for an idle session that is never started.
    pub async fn wait_until_settled(&self) -> LocationSessionState {
        let mut receiver = self.shared.state.subscribe();
        let settled = receiver
            .wait_for(LocationSessionState::is_terminal)
            .await
            .map(|state| state.clone());
        settled.unwrap_or_else(|_| self.state())
    }

    /// Subscribe to state changes.
    ///
    /// The subscription first yields the current state, then every later
    /// transition in order, and ends after the terminal state.
    pub fn subscribe(&self) -> StateSubscription {
        let receiver = self.shared.transitions.subscribe();
        let snapshot = self.state();
        StateSubscription { receiver, pending: Some(snapshot), last: None, finished: false }
    }

    /// Run `callback` for the current state and each later transition.
    ///
    /// Delivery stops when the returned guard is dropped; no callback starts
    /// after that.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn observe<F>(&self, mut callback: F) -> ObserverGuard
    where
        F: FnMut(&LocationSessionState) + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let mut subscription = self.subscribe();
        let delivering = Arc::clone(&active);

        let handle = tokio::spawn(async move {
            while let Some(state) = subscription.next().await {
                if !delivering.load(Ordering::Acquire) {
                    break;
                }
                callback(&state);
            }
        });

        ObserverGuard { active, handle }
    }
}

impl Drop for LocationSession {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.get() {
            driver.abort();
        }
    }
}

impl std::fmt::Debug for LocationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationSession")
            .field("state", &*self.shared.state.borrow())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Ask for permission, then for one position fix, and map the outcome to a
/// terminal state.
async fn acquire(provider: &dyn LocationProvider, options: &SessionOptions) -> LocationSessionState {
    match provider.request_foreground_permission().await {
        Ok(PermissionStatus::Granted) => {}
        Ok(PermissionStatus::Denied) => {
            tracing::warn!("Location permission denied");
            return LocationSessionState::permission_denied();
        }
        Err(error) => {
            tracing::warn!(%error, "Location permission request failed");
            return LocationSessionState::position_unavailable();
        }
    }

    match timeout(options.fix_timeout, provider.current_position(options.accuracy)).await {
        Ok(Ok(position)) if position.is_valid() => {
            tracing::info!(
                latitude = position.latitude,
                longitude = position.longitude,
                accuracy = %options.accuracy,
                "Location resolved"
            );
            LocationSessionState::resolved(position)
        }
        Ok(Ok(position)) => {
            tracing::warn!(
                latitude = position.latitude,
                longitude = position.longitude,
                "Location provider returned an out-of-range position"
            );
            LocationSessionState::position_unavailable()
        }
        Ok(Err(error)) => {
            tracing::warn!(%error, "Failed to get location");
            LocationSessionState::position_unavailable()
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = options.fix_timeout.as_millis() as u64,
                "Position fix timed out"
            );
            LocationSessionState::position_unavailable()
        }
    }
}

/// Ordered stream of session states; dropping it unsubscribes
#[derive(Debug)]
pub struct StateSubscription {
    receiver: broadcast::Receiver<LocationSessionState>,
    pending: Option<LocationSessionState>,
    last: Option<LocationSessionState>,
    finished: bool,
}

impl StateSubscription {
    /// Next state, or `None` once the terminal state has been yielded or the
    /// session is gone
    pub async fn next(&mut self) -> Option<LocationSessionState> {
        if self.finished {
            return None;
        }

        let state = match self.pending.take() {
            Some(snapshot) => snapshot,
            None => self.recv_fresh().await?,
        };

        self.finished = state.is_terminal();
        self.last = Some(state.clone());
        Some(state)
    }

    /// Receive the next broadcast transition not already yielded.
    ///
    /// States never repeat within a session, so a state equal to the last one
    /// yielded is the broadcast copy of the snapshot.
    async fn recv_fresh(&mut self) -> Option<LocationSessionState> {
        loop {
            match self.receiver.recv().await {
                Ok(state) if self.last.as_ref() == Some(&state) => continue,
                Ok(state) => return Some(state),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Location subscriber lagged behind");
                }
                Err(RecvError::Closed) => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

/// Keeps an observer callback registered; dropping it stops delivery
#[derive(Debug)]
pub struct ObserverGuard {
    active: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ObserverGuard {
    /// Whether delivery has finished (terminal state delivered or session gone)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        self.handle.abort();
    }
}
