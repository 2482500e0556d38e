//! Placement state machine
//!
//! Owns every placed image and the content cycle, and reacts to the two
//! input signals. A placement reads the live camera frame exactly once, at
//! creation time; the resulting world transform is stored on the entity and
//! never recomputed.

use std::fmt;

use glam::Vec3;
use hecs::Entity;

use super::stats::PlacementStats;
use crate::anchor::{AnchorError, AnchorSpace};
use crate::assets::{AssetError, Template, TextureLoader, instantiate_from_template};
use crate::content::{ContentCycle, ContentId, UnlitMaterial};
use crate::core::{EventQueue, PlacementConfig, SceneEvent};
use crate::ecs::{Name, SceneError, Transform, World};
use crate::input::Signal;

/// Component carried by every placed image
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    /// Content shown on the plane
    pub content: ContentId,
    pub material: UnlitMaterial,
    /// Creation order, starting at zero for the controller's lifetime
    pub serial: u64,
}

/// What handling a signal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// A new entity was placed
    Placed(Entity),
    /// This many entities were removed
    Cleared(usize),
}

/// Owner of the placed entities and the content cycle
pub struct PlacementController<L> {
    config: PlacementConfig,
    cycle: ContentCycle,
    loader: L,
    template: Template,
    /// Scene graph; placed images are children of `world_origin`
    world: World,
    world_origin: Entity,
    events: EventQueue,
    stats: PlacementStats,
    next_serial: u64,
}

impl<L: TextureLoader> PlacementController<L> {
    /// Create a controller with an empty scene rooted at the world origin
    pub fn new(config: PlacementConfig, cycle: ContentCycle, loader: L) -> Self {
        let mut world = World::new();
        let world_origin = world.spawn_anchor("world_origin", Transform::IDENTITY);

        Self {
            config,
            cycle,
            loader,
            template: Template::image_plane(),
            world,
            world_origin,
            events: EventQueue::new(),
            stats: PlacementStats::new(),
            next_serial: 0,
        }
    }

    /// Use `template` for future placements
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Dispatch an input signal
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the signal maps to
    pub fn on_signal(
        &mut self,
        signal: Signal,
        anchors: &AnchorSpace,
    ) -> Result<SignalOutcome, PlacementError> {
        log::debug!("Handling signal {signal}");
        match signal {
            Signal::ScreenTapped => self.place(anchors).map(SignalOutcome::Placed),
            Signal::Reset => self.reset_all().map(SignalOutcome::Cleared),
        }
    }

    /// Place the current content `standoff_distance` ahead of the camera and
    /// advance the cycle.
    ///
    /// On error nothing changes: no entity is created and the cycle does not
    /// advance, so the next attempt retries the same content.
    ///
    /// # Errors
    ///
    /// - [`PlacementError::Asset`] if the current content cannot be loaded
    /// - [`PlacementError::Anchor`] if no camera pose has been recorded
    pub fn place(&mut self, anchors: &AnchorSpace) -> Result<Entity, PlacementError> {
        self.try_place(anchors).inspect_err(|e| {
            self.stats.record_failure();
            log::warn!("Placement of {} aborted: {e}", self.cycle.current());
        })
    }

    fn try_place(&mut self, anchors: &AnchorSpace) -> Result<Entity, PlacementError> {
        let content = self.cycle.current().clone();

        // Everything fallible happens before the first mutation
        let texture = self.loader.load_texture(content.as_str())?;
        let offset = Transform::from_translation(Vec3::new(
            0.0,
            0.0,
            -self.config.standoff_distance,
        ));
        let transform = anchors
            .compute_world_transform(offset)?
            .with_uniform_scale(self.config.scale);

        let serial = self.next_serial;
        let image = PlacedImage {
            content: content.clone(),
            material: UnlitMaterial::textured(texture, self.config.tint_alpha),
            serial,
        };
        let entity = self.world.add_child(
            self.world_origin,
            (
                Name::new(format!("image_{serial}")),
                transform,
                instantiate_from_template(&self.template),
                image,
            ),
        )?;

        self.cycle.advance();
        self.next_serial += 1;
        self.stats.record_placement(&content);
        self.events.push(SceneEvent::EntityPlaced {
            entity,
            parent: self.world_origin,
            content: content.clone(),
        });

        log::debug!(
            "Placed {content} as {entity:?} at {:?}; next content {}",
            transform.position,
            self.cycle.current()
        );
        Ok(entity)
    }

    /// Remove every placed entity. The content cycle keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Scene`] only if the world origin has been
    /// removed from the scene behind the controller's back.
    pub fn reset_all(&mut self) -> Result<usize, PlacementError> {
        let removed = self.world.remove_all_children(self.world_origin)?;

        self.stats.record_reset(removed);
        self.events.push(SceneEvent::SceneCleared {
            parent: self.world_origin,
            removed,
        });

        log::debug!(
            "Cleared {removed} placed entities; next content {}",
            self.cycle.current()
        );
        Ok(removed)
    }

    /// Placed entities in creation order
    #[must_use]
    pub fn placed_entities(&self) -> Vec<Entity> {
        self.world.children(self.world_origin).unwrap_or_default()
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed_entities().len()
    }

    /// World transform stored on a placed entity
    #[must_use]
    pub fn transform_of(&self, entity: Entity) -> Option<Transform> {
        self.world.get::<Transform>(entity).ok().map(|t| *t)
    }

    /// Content shown by a placed entity
    #[must_use]
    pub fn content_of(&self, entity: Entity) -> Option<ContentId> {
        self.world
            .get::<PlacedImage>(entity)
            .ok()
            .map(|image| image.content.clone())
    }

    #[must_use]
    pub fn cycle(&self) -> &ContentCycle {
        &self.cycle
    }

    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Scene graph holding the placed entities
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Anchor entity all placed content is parented to
    #[must_use]
    pub fn world_origin(&self) -> Entity {
        self.world_origin
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Scene change notifications for a renderer
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    #[must_use]
    pub fn stats(&self) -> &PlacementStats {
        &self.stats
    }
}

/// Errors that abort a placement or reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// The camera frame was not ready
    Anchor(AnchorError),
    /// The content's texture could not be resolved
    Asset(AssetError),
    /// The scene graph rejected the edit
    Scene(SceneError),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchor(e) => write!(f, "anchor error: {e}"),
            Self::Asset(e) => write!(f, "asset error: {e}"),
            Self::Scene(e) => write!(f, "scene error: {e}"),
        }
    }
}

impl std::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Anchor(e) => Some(e),
            Self::Asset(e) => Some(e),
            Self::Scene(e) => Some(e),
        }
    }
}

impl From<AnchorError> for PlacementError {
    fn from(e: AnchorError) -> Self {
        Self::Anchor(e)
    }
}

impl From<AssetError> for PlacementError {
    fn from(e: AssetError) -> Self {
        Self::Asset(e)
    }
}

impl From<SceneError> for PlacementError {
    fn from(e: SceneError) -> Self {
        Self::Scene(e)
    }
}
