//! Vertex format shared by the importer and the GPU vertex buffers

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Size of one vertex in bytes (vertex buffer stride)
pub const VERTEX_STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;

/// Interleaved vertex: position, uv, normal, tangent.
///
/// Tightly packed, 44 bytes. Attributes missing from the source stay zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub tex_coord: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
}

impl Vertex {
    /// Vertex with only a position, everything else zero
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[path = "vertex_tests.rs"]
mod tests;
