//! Asset and resource management
//!
//! Provides handle-based resources with:
//! - Shared, reference-counted handles
//! - Name-keyed storage that loads each resource once
//! - Texture loaders for disk and in-memory content
//! - Template geometry that placed entities are instantiated from

mod handle;
mod mesh;
mod storage;
mod template;
mod texture;

pub use handle::AssetHandle;
pub use mesh::{Mesh, Vertex};
pub use storage::Assets;
pub use template::{ModelInstance, Template, instantiate_from_template};
pub use texture::{AssetError, DiskTextureLoader, InMemoryTextures, Texture, TextureLoader};
