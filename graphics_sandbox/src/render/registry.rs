//! Bindless resource tables
//!
//! Two append-only tables, textures and materials, shared by every mesh
//! drawn with this registry. Each resource identity maps to one dense index
//! that never changes until `clear()`. Material records are built when the
//! material is first registered: its textures are registered at that point
//! and their table indices are baked into the record.
//!
//! The registry does not know the descriptor slot ceiling. A texture table
//! larger than the bindless array is rejected by the device when the frame's
//! binding group is created.

use std::sync::Arc;
use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashMap;
use crate::engine_trace;
use crate::graphics_device;
use crate::resource::{Material, MaterialId, Texture, TextureId};

/// Texture index meaning "this material has no texture in that slot"
pub const NO_TEXTURE: u32 = u32::MAX;

/// One entry of the bindless material table, as read by shaders.
///
/// 32 bytes, 16-byte aligned stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialRecord {
    pub albedo_color: [f32; 4],
    pub albedo_tex_index: u32,
    pub normal_tex_index: u32,
    pub _padding: [u32; 2],
}

#[derive(Default)]
pub struct ResourceRegistry {
    textures: Vec<Arc<dyn graphics_device::Texture>>,
    texture_indices: FxHashMap<TextureId, u32>,
    materials: Vec<MaterialRecord>,
    material_indices: FxHashMap<MaterialId, u32>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table index of a texture, appending it on first sight
    pub fn add_or_get_texture(&mut self, texture: &Texture) -> u32 {
        if let Some(&index) = self.texture_indices.get(&texture.id()) {
            return index;
        }
        let index = self.textures.len() as u32;
        self.textures.push(texture.gpu_texture().clone());
        self.texture_indices.insert(texture.id(), index);
        engine_trace!("sandbox::ResourceRegistry", "{} -> texture slot {}", texture.id(), index);
        index
    }

    /// Table index of a material, appending it (and its textures) on first sight
    pub fn add_or_get_material(&mut self, material: &Material) -> u32 {
        if let Some(&index) = self.material_indices.get(&material.id()) {
            return index;
        }

        let albedo_tex_index = self.optional_texture(material.albedo());
        let normal_tex_index = self.optional_texture(material.normal_map());

        let index = self.materials.len() as u32;
        self.materials.push(MaterialRecord {
            albedo_color: material.albedo_color().to_array(),
            albedo_tex_index,
            normal_tex_index,
            _padding: [0; 2],
        });
        self.material_indices.insert(material.id(), index);
        engine_trace!("sandbox::ResourceRegistry", "{} -> material slot {}", material.id(), index);
        index
    }

    fn optional_texture(&mut self, texture: Option<&Arc<Texture>>) -> u32 {
        match texture {
            Some(texture) => self.add_or_get_texture(texture),
            None => NO_TEXTURE,
        }
    }

    pub fn texture_count(&self) -> u32 {
        self.textures.len() as u32
    }

    pub fn material_count(&self) -> u32 {
        self.materials.len() as u32
    }

    /// The texture table, in slot order
    pub fn textures(&self) -> &[Arc<dyn graphics_device::Texture>] {
        &self.textures
    }

    /// The material table, in slot order
    pub fn material_records(&self) -> &[MaterialRecord] {
        &self.materials
    }

    /// Forget every entry; indices handed out before are invalid afterwards
    pub fn clear(&mut self) {
        self.textures.clear();
        self.texture_indices.clear();
        self.materials.clear();
        self.material_indices.clear();
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
