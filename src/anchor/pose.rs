//! Camera pose sources
//!
//! World tracking itself lives outside this crate. [`PoseSource`] is the seam
//! through which a tracking backend hands over the camera pose in world space.

use std::collections::VecDeque;
use std::fmt;

use crate::ecs::Transform;

/// A world-tracking backend that reports the camera pose in world space
pub trait PoseSource {
    /// Establish world tracking.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Unavailable`] when tracking cannot start.
    fn start_tracking(&mut self) -> Result<(), TrackingError>;

    /// Stop tracking. Calling this while stopped is a no-op.
    fn stop_tracking(&mut self);

    /// Latest camera pose, or `None` if no pose is known yet
    fn current_camera_pose(&self) -> Option<Transform>;
}

/// Failures of the tracking backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingError {
    /// World tracking could not be established
    Unavailable(String),
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "world tracking unavailable: {reason}"),
        }
    }
}

impl std::error::Error for TrackingError {}

/// In-process pose source that replays a fixed sequence of poses.
///
/// Each call to [`ScriptedPoseSource::advance`] moves to the next pose; the
/// last pose is held once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPoseSource {
    pending: VecDeque<Transform>,
    current: Option<Transform>,
    tracking: bool,
    unavailable: Option<String>,
}

impl ScriptedPoseSource {
    /// Create a source that will replay `poses` in order
    #[must_use]
    pub fn new(poses: impl IntoIterator<Item = Transform>) -> Self {
        Self {
            pending: poses.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Create a source whose tracking never starts
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Default::default()
        }
    }

    /// A source that orbits `center` at `radius`, `height` above it, always
    /// looking at it, producing `steps` poses per revolution.
    #[must_use]
    pub fn orbit(center: glam::Vec3, radius: f32, height: f32, steps: usize) -> Self {
        // Tilt down (or up) towards the center; the camera never rolls
        let pitch = -height.atan2(radius);
        let poses = (0..steps).map(move |i| {
            let angle = std::f32::consts::TAU * i as f32 / steps.max(1) as f32;
            let position = center + glam::Vec3::new(radius * angle.sin(), height, radius * angle.cos());
            let rotation = glam::Quat::from_rotation_y(angle) * glam::Quat::from_rotation_x(pitch);
            Transform::from_position_rotation(position, rotation)
        });
        Self::new(poses)
    }

    /// Queue another pose at the end of the script
    pub fn push(&mut self, pose: Transform) {
        self.pending.push_back(pose);
    }

    /// Step to the next scripted pose.
    ///
    /// Returns `false` when the script is exhausted or tracking is stopped.
    pub fn advance(&mut self) -> bool {
        if !self.tracking {
            return false;
        }
        match self.pending.pop_front() {
            Some(pose) => {
                self.current = Some(pose);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Number of poses not yet replayed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl PoseSource for ScriptedPoseSource {
    fn start_tracking(&mut self) -> Result<(), TrackingError> {
        if let Some(reason) = &self.unavailable {
            return Err(TrackingError::Unavailable(reason.clone()));
        }
        self.tracking = true;
        Ok(())
    }

    fn stop_tracking(&mut self) {
        self.tracking = false;
    }

    fn current_camera_pose(&self) -> Option<Transform> {
        if self.tracking { self.current } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_replays_in_order_and_holds_last() {
        let mut source = ScriptedPoseSource::new([
            Transform::from_translation(Vec3::X),
            Transform::from_translation(Vec3::Y),
        ]);
        source.start_tracking().unwrap();
        assert_eq!(source.current_camera_pose(), None);

        assert!(source.advance());
        assert_eq!(source.current_camera_pose().unwrap().position, Vec3::X);
        assert!(source.advance());
        assert!(!source.advance());
        assert_eq!(source.current_camera_pose().unwrap().position, Vec3::Y);
    }

    #[test]
    fn test_unavailable_never_starts() {
        let mut source = ScriptedPoseSource::unavailable("no camera");
        let err = source.start_tracking().unwrap_err();
        assert_eq!(err, TrackingError::Unavailable("no camera".to_string()));
        assert!(!source.is_tracking());
    }

    #[test]
    fn test_stopped_source_reports_nothing() {
        let mut source = ScriptedPoseSource::new([Transform::IDENTITY]);
        assert!(!source.advance());

        source.start_tracking().unwrap();
        assert!(source.advance());
        source.stop_tracking();
        assert_eq!(source.current_camera_pose(), None);
    }

    #[test]
    fn test_orbit_faces_center() {
        let source = ScriptedPoseSource::orbit(Vec3::ZERO, 2.0, 0.0, 8);
        assert_eq!(source.remaining(), 8);

        for pose in &source.pending {
            let to_center = (-pose.position).normalize();
            assert!(pose.forward().abs_diff_eq(to_center, 1e-4));
        }
    }

    #[test]
    fn test_raised_orbit_looks_down_at_center() {
        let center = Vec3::new(1.0, 0.5, -2.0);
        let source = ScriptedPoseSource::orbit(center, 1.5, 1.4, 6);

        for pose in &source.pending {
            assert!((pose.position.y - (center.y + 1.4)).abs() < 1e-5);
            let to_center = (center - pose.position).normalize();
            assert!(pose.forward().abs_diff_eq(to_center, 1e-4));
            // No roll: the camera's right axis stays horizontal
            assert!((pose.rotation * Vec3::X).y.abs() < 1e-5);
        }
    }
}
