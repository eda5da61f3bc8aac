//! Material resolution
//!
//! Turns parser materials into `resource::Material`s by decoding and
//! uploading their textures. The albedo comes from the diffuse channel; the
//! normal map is the first of `NORMAL_MAP_CHANNELS` that yields a texture.
//! Textures that fail to decode leave their slot empty.

use std::path::Path;
use std::sync::{Arc, Mutex};
use glam::Vec4;
use crate::config::ImportConfig;
use crate::error::{Error, Result};
use crate::{engine_debug, engine_warn};
use crate::graphics_device::GraphicsDevice;
use crate::import::{ImageDecoder, SourceMaterial, TextureChannel};
use crate::resource::{Material, Texture};

/// Channels probed for a normal map, in priority order
pub const NORMAL_MAP_CHANNELS: [TextureChannel; 3] = [
    TextureChannel::Height,
    TextureChannel::Normals,
    TextureChannel::NormalCamera,
];

pub struct MaterialResolver {
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    decoder: Arc<dyn ImageDecoder>,
    flip_textures_vertically: bool,
}

impl MaterialResolver {
    pub fn new(
        graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
        decoder: Arc<dyn ImageDecoder>,
        config: &ImportConfig,
    ) -> Self {
        Self {
            graphics_device,
            decoder,
            flip_textures_vertically: config.flip_textures_vertically,
        }
    }

    /// Resolve one material, loading its textures relative to `root_dir`
    ///
    /// Every call loads its textures again; there is no cache across materials.
    ///
    /// # Errors
    ///
    /// `Error::GpuResourceCreationFailure` if a decoded texture cannot be
    /// uploaded. Decode failures are not errors.
    pub fn resolve(&self, material: &SourceMaterial, root_dir: &Path) -> Result<Material> {
        let albedo = self.load_channel(material, TextureChannel::Diffuse, root_dir)?;

        let mut normal_map = None;
        for channel in NORMAL_MAP_CHANNELS {
            normal_map = self.load_channel(material, channel, root_dir)?;
            if normal_map.is_some() {
                break;
            }
        }

        let albedo_color = material.base_color.map(Vec4::from_array).unwrap_or(Vec4::ONE);

        engine_debug!("sandbox::MaterialResolver",
            "Resolved material '{}' (albedo: {}, normal map: {})",
            material.name, albedo.is_some(), normal_map.is_some());

        Ok(Material::new(material.name.clone(), albedo, normal_map, albedo_color))
    }

    /// Resolve every material of a scene, preserving order
    pub fn resolve_all(&self, materials: &[SourceMaterial], root_dir: &Path) -> Result<Vec<Material>> {
        materials
            .iter()
            .map(|material| self.resolve(material, root_dir))
            .collect()
    }

    fn load_channel(
        &self,
        material: &SourceMaterial,
        channel: TextureChannel,
        root_dir: &Path,
    ) -> Result<Option<Arc<Texture>>> {
        let Some(relative) = material.texture(channel) else {
            return Ok(None);
        };
        let path = root_dir.join(relative);

        match Texture::load(
            &self.graphics_device,
            self.decoder.as_ref(),
            &path,
            self.flip_textures_vertically,
        ) {
            Ok(texture) => Ok(Some(Arc::new(texture))),
            Err(Error::TextureDecodeFailure(reason)) => {
                engine_warn!("sandbox::MaterialResolver",
                    "Material '{}': {:?} texture '{}' unusable, slot left empty ({})",
                    material.name, channel, path.display(), reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "material_resolver_tests.rs"]
mod tests;
