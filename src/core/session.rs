//! Session lifecycle
//!
//! A [`Session`] is built once and owns everything a placement run needs:
//! the pose source, the anchor space and the placement controller. Nothing
//! lives in globals. Pose updates and signals must reach it one at a time on
//! a single timeline; no method blocks.

use std::fmt;

use super::config::{ConfigError, SessionConfig};
use crate::anchor::{AnchorSpace, PoseSource, TrackingError};
use crate::assets::TextureLoader;
use crate::content::ContentCycle;
use crate::ecs::Transform;
use crate::input::Signal;
use crate::placement::{PlacementController, PlacementError, SignalOutcome};

/// One placement session
pub struct Session<P, L> {
    config: SessionConfig,
    pose_source: P,
    anchors: AnchorSpace,
    controller: PlacementController<L>,
    running: bool,
}

impl<P: PoseSource, L: TextureLoader> Session<P, L> {
    /// Build a stopped session
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if `config` does not validate
    pub fn new(config: SessionConfig, pose_source: P, loader: L) -> Result<Self, SessionError> {
        config.validate()?;
        let cycle = ContentCycle::new(config.textures.iter().cloned()).ok_or_else(|| {
            ConfigError::Invalid(String::from("at least one texture is required"))
        })?;
        let controller = PlacementController::new(config.placement.clone(), cycle, loader);

        Ok(Self {
            config,
            pose_source,
            anchors: AnchorSpace::initialize(),
            controller,
            running: false,
        })
    }

    /// Establish world tracking and fix the world origin
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Tracking`] if tracking cannot start; the
    /// session stays stopped.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.running {
            log::warn!("Session already running");
            return Ok(());
        }

        self.pose_source.start_tracking().inspect_err(|e| {
            log::error!("Failed to start world tracking: {e}");
        })?;
        self.anchors = AnchorSpace::initialize();
        self.running = true;

        log::info!(
            "Session started with {} textures, standoff {} and scale {}",
            self.controller.cycle().len(),
            self.config.placement.standoff_distance,
            self.config.placement.scale
        );
        Ok(())
    }

    /// Clear placed content and stop tracking. Placed content does not
    /// survive a stop.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        match self.controller.reset_all() {
            Ok(removed) => log::debug!("Removed {removed} entities on stop"),
            Err(e) => log::error!("Failed to clear scene on stop: {e}"),
        }
        self.pose_source.stop_tracking();
        self.running = false;

        log::info!("Session stopped ({})", self.controller.stats().summary());
    }

    /// Pull the latest pose from the pose source into the camera frame.
    ///
    /// Returns `true` if a pose was applied.
    pub fn sync_pose(&mut self) -> bool {
        if !self.running {
            return false;
        }
        match self.pose_source.current_camera_pose() {
            Some(pose) => {
                self.anchors.update_camera_pose(pose);
                true
            }
            None => false,
        }
    }

    /// Push a pose into the camera frame directly
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotRunning`] before `start()` or after
    /// `stop()`; the pose is not recorded.
    pub fn update_camera_pose(&mut self, pose: Transform) -> Result<(), SessionError> {
        if !self.running {
            log::debug!("Ignoring camera pose while the session is stopped");
            return Err(SessionError::NotRunning);
        }
        self.anchors.update_camera_pose(pose);
        Ok(())
    }

    /// Handle one input signal
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotRunning`] before `start()` or after `stop()`
    /// - [`SessionError::Placement`] if the controller rejects the signal
    pub fn on_signal(&mut self, signal: Signal) -> Result<SignalOutcome, SessionError> {
        if !self.running {
            return Err(SessionError::NotRunning);
        }
        Ok(self.controller.on_signal(signal, &self.anchors)?)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn anchors(&self) -> &AnchorSpace {
        &self.anchors
    }

    #[must_use]
    pub fn controller(&self) -> &PlacementController<L> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlacementController<L> {
        &mut self.controller
    }

    #[must_use]
    pub fn pose_source(&self) -> &P {
        &self.pose_source
    }

    pub fn pose_source_mut(&mut self) -> &mut P {
        &mut self.pose_source
    }
}

/// Errors surfaced to whoever owns the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// World tracking could not start
    Tracking(TrackingError),
    /// A placement or reset failed
    Placement(PlacementError),
    /// The configuration is unusable
    Config(ConfigError),
    /// A signal arrived while the session was stopped
    NotRunning,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tracking(e) => write!(f, "tracking error: {e}"),
            Self::Placement(e) => write!(f, "placement error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::NotRunning => write!(f, "session is not running"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tracking(e) => Some(e),
            Self::Placement(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::NotRunning => None,
        }
    }
}

impl From<TrackingError> for SessionError {
    fn from(e: TrackingError) -> Self {
        Self::Tracking(e)
    }
}

impl From<PlacementError> for SessionError {
    fn from(e: PlacementError) -> Self {
        Self::Placement(e)
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{AnchorError, ScriptedPoseSource};
    use crate::core::EventQueue;
    use crate::assets::{AssetError, InMemoryTextures, Texture};
    use glam::{Quat, Vec3};
    use std::f32::consts::PI;

    fn textures(config: &SessionConfig) -> InMemoryTextures {
        config
            .textures
            .iter()
            .fold(InMemoryTextures::new(), |textures, name| {
                textures.with(Texture::solid(name.as_str(), [200; 4], 2))
            })
    }

    fn session(poses: Vec<Transform>) -> Session<ScriptedPoseSource, InMemoryTextures> {
        let config = SessionConfig::default();
        let loader = textures(&config);
        Session::new(config, ScriptedPoseSource::new(poses), loader).unwrap()
    }

    fn placed_position(
        session: &Session<ScriptedPoseSource, InMemoryTextures>,
        outcome: SignalOutcome,
    ) -> Vec3 {
        let SignalOutcome::Placed(entity) = outcome else {
            panic!("expected a placement, got {outcome:?}");
        };
        session.controller().transform_of(entity).unwrap().position
    }

    #[test]
    fn test_signal_before_start() {
        let mut session = session(vec![Transform::IDENTITY]);
        assert_eq!(
            session.on_signal(Signal::ScreenTapped),
            Err(SessionError::NotRunning)
        );
        assert!(!session.sync_pose());
    }

    #[test]
    fn test_tracking_unavailable() {
        let config = SessionConfig::default();
        let loader = textures(&config);
        let mut session =
            Session::new(config, ScriptedPoseSource::unavailable("no sensor"), loader).unwrap();

        assert!(matches!(
            session.start(),
            Err(SessionError::Tracking(TrackingError::Unavailable(_)))
        ));
        assert!(!session.is_running());
    }

    #[test]
    fn test_invalid_config() {
        let config = SessionConfig::default().with_textures(Vec::<String>::new());
        let result = Session::new(config, ScriptedPoseSource::default(), InMemoryTextures::new());
        assert!(matches!(result, Err(SessionError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_tap_before_first_pose() {
        let mut session = session(vec![]);
        session.start().unwrap();
        assert!(!session.sync_pose());

        assert_eq!(
            session.on_signal(Signal::ScreenTapped),
            Err(SessionError::Placement(PlacementError::Anchor(
                AnchorError::PreconditionViolated
            )))
        );
    }

    #[test]
    fn test_places_relative_to_tracked_pose() {
        let mut session = session(vec![
            Transform::from_translation(Vec3::new(0.0, 1.5, 0.0)),
            Transform::from_position_rotation(Vec3::new(0.0, 1.5, 0.0), Quat::from_rotation_y(PI)),
        ]);
        session.start().unwrap();

        session.pose_source_mut().advance();
        assert!(session.sync_pose());
        let first = session.on_signal(Signal::ScreenTapped).unwrap();

        session.pose_source_mut().advance();
        assert!(session.sync_pose());
        let second = session.on_signal(Signal::ScreenTapped).unwrap();

        assert!(placed_position(&session, first).abs_diff_eq(Vec3::new(0.0, 1.5, -0.5), 1e-5));
        assert!(placed_position(&session, second).abs_diff_eq(Vec3::new(0.0, 1.5, 0.5), 1e-5));
    }

    #[test]
    fn test_reset_keeps_cycle_position() {
        let mut session = session(vec![Transform::IDENTITY]);
        session.start().unwrap();
        session.pose_source_mut().advance();
        session.sync_pose();

        session.on_signal(Signal::ScreenTapped).unwrap();
        assert_eq!(session.on_signal(Signal::Reset).unwrap(), SignalOutcome::Cleared(1));

        let SignalOutcome::Placed(entity) = session.on_signal(Signal::ScreenTapped).unwrap() else {
            panic!("expected a placement");
        };
        assert_eq!(
            session.controller().content_of(entity).unwrap().as_str(),
            "snowflake.png"
        );
    }

    #[test]
    fn test_missing_asset_propagates() {
        let config = SessionConfig::default();
        let loader = InMemoryTextures::new().with(Texture::solid("smile.png", [0; 4], 1));
        let mut session = Session::new(config, ScriptedPoseSource::new([Transform::IDENTITY]), loader).unwrap();
        session.start().unwrap();
        session.pose_source_mut().advance();
        session.sync_pose();

        session.on_signal(Signal::ScreenTapped).unwrap();
        assert_eq!(
            session.on_signal(Signal::ScreenTapped),
            Err(SessionError::Placement(PlacementError::Asset(
                AssetError::ResourceNotFound("snowflake.png".to_string())
            )))
        );
        assert_eq!(session.controller().placed_count(), 1);
    }

    #[test]
    fn test_stop_clears_and_restart_works() {
        let mut session = session(vec![Transform::IDENTITY]);
        session.start().unwrap();
        session.start().unwrap();
        session.pose_source_mut().advance();
        session.sync_pose();
        session.on_signal(Signal::ScreenTapped).unwrap();
        session.on_signal(Signal::ScreenTapped).unwrap();

        session.stop();
        assert!(!session.is_running());
        assert_eq!(session.controller().placed_count(), 0);
        assert!(!session.pose_source().is_tracking());
        session.stop();

        // A fresh start needs a fresh pose before placing again
        session.start().unwrap();
        assert!(!session.anchors().has_camera_pose());
        session.update_camera_pose(Transform::IDENTITY).unwrap();
        session.on_signal(Signal::ScreenTapped).unwrap();
        assert_eq!(session.controller().placed_count(), 1);
    }

    #[test]
    fn test_pushed_pose_requires_running_session() {
        let mut session = session(vec![]);
        assert_eq!(
            session.update_camera_pose(Transform::IDENTITY),
            Err(SessionError::NotRunning)
        );
        assert!(!session.anchors().has_camera_pose());

        session.start().unwrap();
        assert!(!session.anchors().has_camera_pose());
        session.update_camera_pose(Transform::IDENTITY).unwrap();
        assert!(session.anchors().has_camera_pose());
        assert!(matches!(
            session.on_signal(Signal::ScreenTapped),
            Ok(SignalOutcome::Placed(_))
        ));

        session.stop();
        assert_eq!(
            session.update_camera_pose(Transform::IDENTITY),
            Err(SessionError::NotRunning)
        );
    }

    #[test]
    fn test_unconsumed_events_stay_bounded() {
        let mut session = session(vec![Transform::IDENTITY]);
        session.start().unwrap();
        session.pose_source_mut().advance();
        session.sync_pose();

        for _ in 0..1000 {
            session.on_signal(Signal::ScreenTapped).unwrap();
            session.on_signal(Signal::Reset).unwrap();
        }

        let events = session.controller_mut().events_mut();
        assert_eq!(events.pending_count(), EventQueue::MAX_PENDING);
        assert_eq!(events.dropped_count(), 2000 - EventQueue::MAX_PENDING);
        assert_eq!(session.controller().placed_count(), 0);
    }
}
