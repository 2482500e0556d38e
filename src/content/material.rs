//! Unlit image material

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::assets::{AssetHandle, Texture};

/// Material uniform handed to the renderer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    /// Tint multiplied with the texture (RGBA)
    pub tint: [f32; 4],
    /// 1.0 when scene lighting applies, 0.0 for unlit
    pub lit: f32,
    /// Padding for alignment
    _padding: [f32; 3],
}

/// Material that shows a texture unaffected by scene lighting
#[derive(Debug, Clone, PartialEq)]
pub struct UnlitMaterial {
    /// Base color texture
    pub texture: AssetHandle<Texture>,
    /// Tint color; alpha slightly below one keeps the plane in the
    /// transparent pass
    pub tint: Vec4,
}

impl UnlitMaterial {
    /// White-tinted material with the given alpha
    #[must_use]
    pub fn textured(texture: AssetHandle<Texture>, alpha: f32) -> Self {
        Self {
            texture,
            tint: Vec4::new(1.0, 1.0, 1.0, alpha),
        }
    }

    /// Unlit materials never respond to lights
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        false
    }

    /// Convert to uniform data
    #[must_use]
    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            tint: self.tint.to_array(),
            lit: 0.0,
            _padding: [0.0; 3],
        }
    }
}
