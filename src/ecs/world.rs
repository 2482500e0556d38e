//! Scene graph wrapper around hecs

use hecs::Entity;

use super::components::{Name, Transform};
use super::hierarchy::{Children, Parent};

/// Scene graph containing anchors and the content parented to them
pub struct World {
    /// The underlying hecs world
    pub inner: hecs::World,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn an anchor entity that can own children
    pub fn spawn_anchor(&mut self, name: impl Into<String>, transform: Transform) -> Entity {
        self.inner.spawn((Name::new(name), transform, Children::new()))
    }

    /// Spawn `components` as a new child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails if `parent` does not exist or is not an anchor
    pub fn add_child(
        &mut self,
        parent: Entity,
        components: impl hecs::DynamicBundle,
    ) -> Result<Entity, SceneError> {
        // Validate before spawning so a bad parent never leaves an orphan behind
        drop(self.inner.get::<&Children>(parent)?);

        let child = self.inner.spawn(components);
        self.inner
            .insert_one(child, Parent::new(parent))
            .map_err(|_| SceneError::NoSuchEntity)?;
        self.inner.get::<&mut Children>(parent)?.add(child);
        Ok(child)
    }

    /// Despawn every child of `parent`, returning how many were removed
    ///
    /// # Errors
    ///
    /// Fails if `parent` does not exist or is not an anchor
    pub fn remove_all_children(&mut self, parent: Entity) -> Result<usize, SceneError> {
        let children = self.inner.get::<&mut Children>(parent)?.take_all();

        let mut removed = 0;
        for child in children {
            if self.inner.despawn(child).is_ok() {
                removed += 1;
            } else {
                log::warn!("Child {child:?} of {parent:?} was already despawned");
            }
        }
        Ok(removed)
    }

    /// Children of `parent` in insertion order
    ///
    /// # Errors
    ///
    /// Fails if `parent` does not exist or is not an anchor
    pub fn children(&self, parent: Entity) -> Result<Vec<Entity>, SceneError> {
        Ok(self.inner.get::<&Children>(parent)?.iter().copied().collect())
    }

    /// Get a reference to a component
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Check if an entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur while editing the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The entity does not exist
    NoSuchEntity,
    /// The entity exists but cannot own children
    NotAnAnchor,
}

impl From<hecs::ComponentError> for SceneError {
    fn from(e: hecs::ComponentError) -> Self {
        match e {
            hecs::ComponentError::NoSuchEntity => Self::NoSuchEntity,
            hecs::ComponentError::MissingComponent(_) => Self::NotAnAnchor,
        }
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSuchEntity => write!(f, "no such entity"),
            Self::NotAnAnchor => write!(f, "entity cannot own children"),
        }
    }
}

impl std::error::Error for SceneError {}
