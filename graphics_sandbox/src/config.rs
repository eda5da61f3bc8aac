//! Import and renderer configuration

use glam::Mat4;
use crate::graphics_device::ShaderStages;

/// Maximum number of textures the bindless descriptor array exposes
pub const DEFAULT_BINDLESS_TEXTURE_CAPACITY: u32 = 10_000;

/// How node transforms are combined while flattening a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformPolicy {
    /// Each node's transform is `parent * local`, accumulated from the root
    #[default]
    Hierarchical,
    /// Node transforms are ignored; every submesh gets the initial transform.
    /// For sources that place meshes with flat top-level nodes.
    Identity,
}

/// Configuration for the scene importer (Flattener, Material Resolver, MeshLoader)
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Node transform composition policy
    pub transform_policy: TransformPolicy,
    /// Transform applied above the scene root
    pub initial_transform: Mat4,
    /// Flip decoded images vertically before upload (top-left vs bottom-left origin)
    pub flip_textures_vertically: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            transform_policy: TransformPolicy::Hierarchical,
            initial_transform: Mat4::IDENTITY,
            flip_textures_vertically: true,
        }
    }
}

/// Configuration for the per-frame path (InstanceBatcher, FrameEmitter)
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Size of the bindless texture array in the descriptor layout.
    /// The registry does not check it; the GPU layer rejects overflowing tables.
    pub bindless_texture_capacity: u32,
    /// Shader stages that receive the per-draw push constants
    pub push_constant_stages: ShaderStages,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            bindless_texture_capacity: DEFAULT_BINDLESS_TEXTURE_CAPACITY,
            push_constant_stages: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
