//! Per-frame draw record
//!
//! A RenderInstance is one submesh of one submitted mesh, with its material
//! already resolved to a bindless table index and its final world transform.
//! Instances only live until the next flush.

use glam::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInstance {
    /// Index into the batcher's frame mesh table
    pub mesh_index: u32,
    /// Index into that mesh's submeshes
    pub submesh_index: u32,
    /// Index into the registry's bindless material table
    pub material_index: u32,
    /// World transform composed with the submesh transform (`world * local`)
    pub transform: Mat4,
}
