//! Resource-level material
//!
//! A material references at most two textures (albedo and normal map) plus
//! an albedo tint. Either texture may be missing. It owns no GPU objects of
//! its own: the bindless material table is built from materials by the
//! resource registry.

use std::sync::Arc;
use glam::Vec4;
use crate::resource::{MaterialId, Texture};

/// Surface description of a submesh
pub struct Material {
    id: MaterialId,
    name: String,
    albedo: Option<Arc<Texture>>,
    normal_map: Option<Arc<Texture>>,
    albedo_color: Vec4,
}

impl Material {
    /// Create a material with a fresh identity
    pub fn new(
        name: impl Into<String>,
        albedo: Option<Arc<Texture>>,
        normal_map: Option<Arc<Texture>>,
        albedo_color: Vec4,
    ) -> Self {
        Self {
            id: MaterialId::next(),
            name: name.into(),
            albedo,
            normal_map,
            albedo_color,
        }
    }

    /// White, untextured material
    pub fn untextured(name: impl Into<String>) -> Self {
        Self::new(name, None, None, Vec4::ONE)
    }

    pub fn id(&self) -> MaterialId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn albedo(&self) -> Option<&Arc<Texture>> {
        self.albedo.as_ref()
    }

    pub fn normal_map(&self) -> Option<&Arc<Texture>> {
        self.normal_map.as_ref()
    }

    /// RGBA tint multiplied with the albedo texture (or used alone without one)
    pub fn albedo_color(&self) -> Vec4 {
        self.albedo_color
    }
}

impl std::fmt::Debug for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Material")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("albedo", &self.albedo.as_ref().map(|t| t.id()))
            .field("normal_map", &self.normal_map.as_ref().map(|t| t.id()))
            .field("albedo_color", &self.albedo_color)
            .finish()
    }
}
