//! Mesh types handed to the renderer
//!
//! Vertices mirror the boundary one-to-one, so a triangle index is also a
//! boundary point index.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Flat-shaded vertex in the sheet's local space (z = 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Every vertex of a flat sheet faces +Z
    pub const NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            position: [x, y, 0.0],
            normal: Self::NORMAL,
        }
    }
}

impl From<Vec2> for MeshVertex {
    fn from(p: Vec2) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Triangulated sheet ready for upload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
}

impl Mesh {
    /// One vertex per boundary point, in ring order
    pub fn new(points: &[Vec2], indices: Vec<u32>) -> Self {
        Self {
            vertices: points.iter().copied().map(MeshVertex::from).collect(),
            indices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triples in emission order
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Raw vertex bytes for a GPU buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for a GPU buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Total triangle area, useful for checking coverage
    pub fn area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| {
                let p = |i: u32| {
                    let v = self.vertices[i as usize].position;
                    Vec2::new(v[0], v[1])
                };
                let (a, b, c) = (p(a), p(b), p(c));
                ((b - a).perp_dot(c - a) * 0.5).abs()
            })
            .sum()
    }
}
