//! World-anchored image placement
//!
//! This crate provides:
//! - World and camera reference frames with camera-relative placement
//! - A placement controller that cycles through image content
//! - A scene graph of placed entities built on hecs
//! - Texture loading and shared template geometry
//!
//! World tracking, rendering and the input surface stay outside: they plug
//! in through [`anchor::PoseSource`], [`SceneEvent`](crate::core::SceneEvent) and
//! [`input::Signal`].

pub mod anchor;
pub mod assets;
pub mod content;
pub mod core;
pub mod ecs;
pub mod input;
pub mod placement;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::anchor::{AnchorSpace, PoseSource, ScriptedPoseSource, TrackingError};
    pub use crate::assets::{AssetError, DiskTextureLoader, InMemoryTextures, Texture, TextureLoader};
    pub use crate::content::{ContentCycle, ContentId, UnlitMaterial};
    pub use crate::core::{SceneEvent, Session, SessionConfig, SessionError};
    pub use crate::ecs::{Transform, World};
    pub use crate::input::{Signal, SignalMapper};
    pub use crate::placement::{PlacementController, PlacementError, SignalOutcome};
    pub use glam::{Mat4, Quat, Vec3, Vec4};
}
