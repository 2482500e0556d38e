//! Named reference frames

use std::fmt;

use crate::ecs::Transform;

/// The two frames every session tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Fixed origin established at session start
    World,
    /// Follows the live camera pose
    Camera,
}

impl FrameKind {
    /// Frame name for logging
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Camera => "camera",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A frame with a transform relative to its parent frame.
///
/// The world frame has no parent and its transform is always the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    kind: FrameKind,
    transform: Transform,
    parent: Option<FrameKind>,
}

impl ReferenceFrame {
    /// The world origin frame
    #[must_use]
    pub const fn world() -> Self {
        Self {
            kind: FrameKind::World,
            transform: Transform::IDENTITY,
            parent: None,
        }
    }

    /// A camera frame parented to the world, starting at the identity
    #[must_use]
    pub const fn camera() -> Self {
        Self {
            kind: FrameKind::Camera,
            transform: Transform::IDENTITY,
            parent: Some(FrameKind::World),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Transform relative to the parent frame
    #[must_use]
    pub const fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub const fn parent(&self) -> Option<FrameKind> {
        self.parent
    }

    /// Overwrite the transform. Only non-root frames may move.
    pub(crate) fn set_transform(&mut self, transform: Transform) {
        debug_assert!(self.parent.is_some(), "the {} frame never moves", self.kind);
        self.transform = transform;
    }
}
