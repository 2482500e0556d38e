//! World / camera frame bookkeeping
//!
//! Converts "a pose relative to the camera, right now" into "a fixed pose
//! relative to the world". The camera frame is volatile and overwritten on
//! every pose update; results of [`AnchorSpace::compute_world_transform`] are
//! plain values and never follow the camera afterwards.

use std::fmt;

use super::frame::ReferenceFrame;
use crate::ecs::Transform;

/// Owner of the world and camera reference frames
#[derive(Debug, Clone)]
pub struct AnchorSpace {
    world: ReferenceFrame,
    camera: ReferenceFrame,
    /// Set by the first pose update
    has_camera_pose: bool,
}

impl AnchorSpace {
    /// Create the world frame at the identity and a camera frame that has
    /// not yet received a pose.
    #[must_use]
    pub fn initialize() -> Self {
        log::debug!("Anchor space initialized at world origin");
        Self {
            world: ReferenceFrame::world(),
            camera: ReferenceFrame::camera(),
            has_camera_pose: false,
        }
    }

    /// Overwrite the camera frame's transform relative to the world
    pub fn update_camera_pose(&mut self, pose: Transform) {
        log::trace!(
            "Camera pose updated: position={:?} rotation={:?}",
            pose.position,
            pose.rotation
        );
        self.camera.set_transform(pose);
        self.has_camera_pose = true;
    }

    /// Express `offset`, given in the camera's local frame, in world space.
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::PreconditionViolated`] if no camera pose has
    /// been recorded yet.
    pub fn compute_world_transform(&self, offset: Transform) -> Result<Transform, AnchorError> {
        if !self.has_camera_pose {
            return Err(AnchorError::PreconditionViolated);
        }
        Ok(self.camera.transform() * offset)
    }

    /// Transform of the world frame, always the identity
    #[must_use]
    pub fn world_frame_transform(&self) -> Transform {
        self.world.transform()
    }

    #[must_use]
    pub fn world_frame(&self) -> &ReferenceFrame {
        &self.world
    }

    #[must_use]
    pub fn camera_frame(&self) -> &ReferenceFrame {
        &self.camera
    }

    /// Whether at least one pose update has been recorded
    #[must_use]
    pub fn has_camera_pose(&self) -> bool {
        self.has_camera_pose
    }
}

impl Default for AnchorSpace {
    fn default() -> Self {
        Self::initialize()
    }
}

/// Contract violations detected by [`AnchorSpace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorError {
    /// A world transform was requested before any camera pose arrived
    PreconditionViolated,
}

impl fmt::Display for AnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreconditionViolated => {
                write!(f, "world transform requested before any camera pose was recorded")
            }
        }
    }
}

impl std::error::Error for AnchorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::FrameKind;
    use glam::{Quat, Vec3};
    use std::f32::consts::PI;

    const EPS: f32 = 1e-5;

    fn ahead(distance: f32) -> Transform {
        Transform::from_translation(Vec3::new(0.0, 0.0, -distance))
    }

    #[test]
    fn test_initial_frames() {
        let space = AnchorSpace::initialize();

        assert_eq!(space.world_frame_transform(), Transform::IDENTITY);
        assert_eq!(space.world_frame().kind(), FrameKind::World);
        assert_eq!(space.world_frame().parent(), None);
        assert_eq!(space.camera_frame().parent(), Some(FrameKind::World));
        assert_eq!(space.camera_frame().transform(), Transform::IDENTITY);
        assert!(!space.has_camera_pose());
    }

    #[test]
    fn test_compute_before_pose_fails() {
        let space = AnchorSpace::initialize();
        assert_eq!(
            space.compute_world_transform(ahead(0.5)),
            Err(AnchorError::PreconditionViolated)
        );
    }

    #[test]
    fn test_translated_camera() {
        let mut space = AnchorSpace::initialize();
        space.update_camera_pose(Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)));

        let world = space.compute_world_transform(ahead(0.5)).unwrap();
        assert!(world.position.abs_diff_eq(Vec3::new(1.0, 2.0, 2.5), EPS));
    }

    #[test]
    fn test_rotated_camera() {
        let mut space = AnchorSpace::initialize();
        space.update_camera_pose(Transform::from_position_rotation(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(PI),
        ));

        let world = space.compute_world_transform(ahead(0.5)).unwrap();
        assert!(world.position.abs_diff_eq(Vec3::new(1.0, 2.0, 3.5), EPS));
    }

    #[test]
    fn test_latest_pose_wins() {
        let mut space = AnchorSpace::initialize();
        space.update_camera_pose(Transform::from_translation(Vec3::X));
        space.update_camera_pose(Transform::from_translation(Vec3::Y));

        let world = space.compute_world_transform(Transform::IDENTITY).unwrap();
        assert!(world.position.abs_diff_eq(Vec3::Y, EPS));
        // The world frame never moves
        assert_eq!(space.world_frame_transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_result_is_detached_from_camera() {
        let mut space = AnchorSpace::initialize();
        space.update_camera_pose(Transform::IDENTITY);
        let placed = space.compute_world_transform(ahead(0.5)).unwrap();

        space.update_camera_pose(Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        assert!(placed.position.abs_diff_eq(Vec3::new(0.0, 0.0, -0.5), EPS));
    }
}
