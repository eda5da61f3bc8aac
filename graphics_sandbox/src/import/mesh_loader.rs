//! Scene file to `Mesh`
//!
//! Parses a scene with a `SceneSource`, flattens it, resolves its materials
//! relative to the scene file's directory and uploads the result. A failed
//! load returns an error and leaves previously loaded meshes untouched.

use std::path::Path;
use std::sync::{Arc, Mutex};
use crate::config::ImportConfig;
use crate::error::Result;
use crate::{engine_error, engine_info};
use crate::graphics_device::GraphicsDevice;
use crate::import::{Flattener, ImageDecoder, MaterialResolver, SceneSource};
use crate::resource::Mesh;

pub struct MeshLoader {
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    source: Arc<dyn SceneSource>,
    decoder: Arc<dyn ImageDecoder>,
    config: ImportConfig,
}

impl MeshLoader {
    /// Create a loader
    ///
    /// # Arguments
    ///
    /// * `graphics_device` - Device meshes and textures are created on
    /// * `source` - Scene file parser
    /// * `decoder` - Image decoder for material textures
    /// * `config` - Transform policy, initial transform and texture flipping
    pub fn new(
        graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
        source: Arc<dyn SceneSource>,
        decoder: Arc<dyn ImageDecoder>,
        config: ImportConfig,
    ) -> Self {
        Self {
            graphics_device,
            source,
            decoder,
            config,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Load a scene file as one mesh
    ///
    /// # Errors
    ///
    /// `SceneParseFailure`, `UnsupportedTopology` and `IndexOverflow` abort
    /// the load, as does any `GpuResourceCreationFailure`.
    pub fn load(&self, path: &Path) -> Result<Mesh> {
        self.load_inner(path).inspect_err(|e| {
            engine_error!("sandbox::MeshLoader", "Failed to load '{}': {}", path.display(), e);
        })
    }

    fn load_inner(&self, path: &Path) -> Result<Mesh> {
        let scene = self.source.parse(path)?;
        let geometry = Flattener::new(self.config.clone()).flatten(&scene)?;

        let root_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let resolver = MaterialResolver::new(
            self.graphics_device.clone(),
            self.decoder.clone(),
            &self.config,
        );
        let materials = resolver.resolve_all(&scene.materials, root_dir)?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mesh = Mesh::from_geometry(&self.graphics_device, name, geometry, materials)?;

        engine_info!("sandbox::MeshLoader",
            "Loaded '{}' ({} submeshes, {} materials)",
            path.display(), mesh.submeshes().len(), mesh.materials().len());

        Ok(mesh)
    }
}

#[cfg(test)]
#[path = "mesh_loader_tests.rs"]
mod tests;
