//! Mesh and vertex definitions

use bytemuck::{Pod, Zeroable};

/// Vertex with position, normal, and UV coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// CPU-side triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from vertices and indices
    pub fn from_data(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Square image plane in the XY axes, facing +Z (towards a camera that
    /// placed it straight ahead).
    pub fn quad(size: f32) -> Self {
        let half = size / 2.0;
        let normal = [0.0, 0.0, 1.0];
        let vertices = vec![
            Vertex::new([-half, -half, 0.0], normal, [0.0, 1.0]),
            Vertex::new([half, -half, 0.0], normal, [1.0, 1.0]),
            Vertex::new([half, half, 0.0], normal, [1.0, 0.0]),
            Vertex::new([-half, half, 0.0], normal, [0.0, 0.0]),
        ];

        let indices = vec![0, 1, 2, 2, 3, 0];

        Self::from_data(vertices, indices)
    }

    /// Raw vertex bytes, ready for a vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes, ready for an index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Get the number of indices
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
