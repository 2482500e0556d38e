//! Template models
//!
//! Geometry is loaded once into a [`Template`]; every placed entity gets a
//! [`ModelInstance`] that shares the template's mesh handle.

use super::handle::AssetHandle;
use super::mesh::Mesh;

/// Shared geometry that placed entities are instantiated from
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    mesh: AssetHandle<Mesh>,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh: AssetHandle::new(mesh),
        }
    }

    /// Unit image plane used for placed content
    #[must_use]
    pub fn image_plane() -> Self {
        Self::new("image_plane", Mesh::quad(1.0))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mesh(&self) -> &AssetHandle<Mesh> {
        &self.mesh
    }
}

/// Per-entity model component; cheap to create, geometry is shared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInstance {
    pub mesh: AssetHandle<Mesh>,
}

/// Create a model for a new entity from `template` without copying geometry
#[must_use]
pub fn instantiate_from_template(template: &Template) -> ModelInstance {
    ModelInstance {
        mesh: template.mesh.clone(),
    }
}
