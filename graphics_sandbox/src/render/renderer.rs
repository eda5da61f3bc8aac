//! Per-frame rendering façade
//!
//! Owns the bindless registry, the instance batcher and the frame emitter
//! for one device. A frame is any number of `submit` calls followed by one
//! `flush`.
//!
//! # Example
//!
//! ```ignore
//! let mut renderer = Renderer::new(device.clone(), RendererConfig::default());
//! renderer.set_camera(projection, view);
//! renderer.submit(&sponza, Mat4::IDENTITY)?;
//! renderer.submit(&helmet, Mat4::from_translation(Vec3::Y))?;
//! let stats = renderer.flush()?;
//! ```

use std::sync::{Arc, Mutex};
use glam::Mat4;
use crate::config::RendererConfig;
use crate::engine_info;
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use crate::render::{CameraData, FrameEmitter, FrameStats, InstanceBatcher, ResourceRegistry};
use crate::resource::Mesh;

pub struct Renderer {
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    registry: ResourceRegistry,
    batcher: InstanceBatcher,
    emitter: FrameEmitter,
    camera: CameraData,
    last_stats: FrameStats,
}

impl Renderer {
    pub fn new(graphics_device: Arc<Mutex<dyn GraphicsDevice>>, config: RendererConfig) -> Self {
        engine_info!("sandbox::Renderer",
            "Renderer created (bindless texture capacity: {})", config.bindless_texture_capacity);
        Self {
            graphics_device,
            registry: ResourceRegistry::new(),
            batcher: InstanceBatcher::new(),
            emitter: FrameEmitter::new(config),
            camera: CameraData::default(),
            last_stats: FrameStats::default(),
        }
    }

    /// Camera used by every following flush
    pub fn set_camera(&mut self, projection: Mat4, view: Mat4) {
        self.camera = CameraData::new(projection, view);
    }

    pub fn camera(&self) -> &CameraData {
        &self.camera
    }

    /// Queue a mesh for this frame at a world transform
    pub fn submit(&mut self, mesh: &Arc<Mesh>, world_transform: Mat4) -> Result<()> {
        self.batcher.submit(&mut self.registry, mesh, world_transform)
    }

    /// Number of instances queued for the next flush
    pub fn pending_instances(&self) -> usize {
        self.batcher.len()
    }

    /// Draw everything queued since the last flush
    ///
    /// The queue is empty afterwards, even on error.
    pub fn flush(&mut self) -> Result<FrameStats> {
        let stats = self.emitter.flush(
            &self.graphics_device,
            &self.registry,
            &mut self.batcher,
            &self.camera,
        )?;
        self.last_stats = stats;
        Ok(stats)
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Empty the bindless tables
    ///
    /// Instances still queued hold indices into the old tables, so the queue
    /// is dropped as well.
    pub fn reset_bindless_tables(&mut self) {
        self.registry.clear();
        self.batcher.clear();
    }

    /// Statistics of the last successful flush
    pub fn stats(&self) -> FrameStats {
        self.last_stats
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
