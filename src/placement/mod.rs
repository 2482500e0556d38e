//! Placement of world-anchored images
//!
//! Provides the controller that turns signals into placed entities, and the
//! counters it keeps along the way.

mod controller;
mod stats;

pub use controller::{PlacedImage, PlacementController, PlacementError, SignalOutcome};
pub use stats::PlacementStats;
