//! Plantwatch Location - One-shot device location sessions
//!
//! A [`LocationSession`] asks the platform for foreground location access, then
//! for a single position fix, and exposes the outcome as a typed state plus a
//! map viewport. [`SimulatedLocationProvider`] stands in for the platform
//! service in the CLI and in tests.

pub mod session;
pub mod simulated;

pub use session::{LocationSession, ObserverGuard, SessionOptions, StateSubscription};
pub use simulated::SimulatedLocationProvider;
