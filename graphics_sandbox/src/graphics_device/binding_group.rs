//! BindingGroup trait and binding group descriptors
//!
//! A BindingGroup is an immutable set of GPU resource bindings (texture
//! arrays, buffers). It is the sandbox's abstraction over descriptor sets.
//! The bindless set is one BindingGroup whose first slot is a large,
//! partially-bound texture array.

use bitflags::bitflags;
use crate::graphics_device::{Buffer, Texture};

bitflags! {
    /// Shader stage visibility flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStages: u32 {
        const VERTEX = 0x01;
        const FRAGMENT = 0x02;
    }
}

/// Type of resource bound at a given slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingType {
    /// Uniform buffer (read-only structured data)
    UniformBuffer,
    /// Storage buffer
    StorageBuffer,
    /// Array of combined image samplers
    SampledTextureArray,
}

/// Description of a single binding slot within a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSlotDesc {
    /// Binding number (`[[vk::binding(N)]]` / `layout(binding = N)`)
    pub binding: u32,
    /// Type of resource at this binding
    pub binding_type: BindingType,
    /// Number of descriptors at this binding (array size for texture arrays)
    pub count: u32,
    /// Shader stages that access this binding
    pub stages: ShaderStages,
    /// Slots may be left unwritten (bindless arrays)
    pub partially_bound: bool,
}

/// Description of a BindingGroup layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingGroupLayoutDesc {
    /// Binding slot descriptions, in binding order
    pub entries: Vec<BindingSlotDesc>,
}

/// A concrete resource written into a BindingGroup slot.
///
/// Resources are matched to layout entries by position.
pub enum BindingResource<'a> {
    /// Uniform buffer binding
    UniformBuffer(&'a dyn Buffer),
    /// Storage buffer binding
    StorageBuffer(&'a dyn Buffer),
    /// Texture array; may hold fewer textures than the slot's `count`
    SampledTextureArray(Vec<&'a dyn Texture>),
}

impl BindingResource<'_> {
    /// The binding type this resource can be written into
    pub fn binding_type(&self) -> BindingType {
        match self {
            BindingResource::UniformBuffer(_) => BindingType::UniformBuffer,
            BindingResource::StorageBuffer(_) => BindingType::StorageBuffer,
            BindingResource::SampledTextureArray(_) => BindingType::SampledTextureArray,
        }
    }

    /// Number of descriptors this resource occupies
    pub fn descriptor_count(&self) -> u32 {
        match self {
            BindingResource::SampledTextureArray(textures) => textures.len() as u32,
            _ => 1,
        }
    }
}

/// An immutable set of GPU resource bindings
pub trait BindingGroup: Send + Sync {
    /// Returns the set index this BindingGroup was created for
    fn set_index(&self) -> u32;
}
