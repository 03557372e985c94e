//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`OrderTracker`] - Spawns the sync actor, wires its fetcher and stops it again
//! - [`TrackerConfig`] - Settings loaded from `EXPOFLOW_*` variables
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod tracing;
pub mod tracker;

pub use config::*;
pub use self::tracing::setup_tracing;
pub use tracker::*;
