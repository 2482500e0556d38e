//! Reference frames and camera-relative anchoring
//!
//! Provides:
//! - The fixed world frame and the camera-following frame
//! - Composition of camera-local offsets into world-fixed transforms
//! - The pose source seam for external world tracking

mod frame;
mod pose;
mod space;

pub use frame::{FrameKind, ReferenceFrame};
pub use pose::{PoseSource, ScriptedPoseSource, TrackingError};
pub use space::{AnchorError, AnchorSpace};
