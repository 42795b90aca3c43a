//! Port trait definitions
//!
//! These traits define the interfaces that platform adapters must implement.

pub mod location;

pub use location::{Accuracy, LocationProvider, PermissionStatus};
