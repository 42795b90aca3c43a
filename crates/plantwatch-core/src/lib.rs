//! Plantwatch Core - Domain models, configuration, and ports
//!
//! This crate contains the domain types shared by the location session and the
//! plant-location correlator, together with the port the platform location
//! service must implement.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{PlantwatchError, Result};
