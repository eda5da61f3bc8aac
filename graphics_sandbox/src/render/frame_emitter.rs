//! Frame emission
//!
//! Turns one frame of batched instances into GPU work:
//!
//! 1. Upload the bindless material table and the camera uniform, sized to
//!    the registry's current occupancy (empty tables are valid).
//! 2. Create the bindless binding group: texture array at binding 0,
//!    material table at binding 1, camera at binding 2.
//! 3. Record one indexed draw per instance, in submission order, rebinding
//!    vertex/index buffers only when the mesh changes.
//! 4. Submit.
//!
//! The batcher is cleared whether or not any of this succeeds. The
//! registry is left untouched.

use std::sync::{Arc, Mutex};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::config::RendererConfig;
use crate::error::Result;
use crate::{engine_err, engine_error, engine_trace};
use crate::graphics_device::{
    self, BindingGroupLayoutDesc, BindingResource, BindingSlotDesc, BindingType,
    BufferDesc, BufferUsage, GraphicsDevice, ShaderStages,
};
use crate::render::{InstanceBatcher, ResourceRegistry};

/// Set index of the bindless binding group
pub const BINDLESS_SET_INDEX: u32 = 0;
/// Binding of the bindless texture array
pub const TEXTURE_TABLE_BINDING: u32 = 0;
/// Binding of the material table storage buffer
pub const MATERIAL_TABLE_BINDING: u32 = 1;
/// Binding of the camera uniform buffer
pub const CAMERA_BINDING: u32 = 2;

// ============================================================================
// GPU-facing data
// ============================================================================

/// Per-draw inline data: column-major world transform then material index.
///
/// 68 bytes, no padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawPushConstants {
    pub transform: [f32; 16],
    pub material_index: u32,
}

/// Camera uniform: column-major projection then view matrix
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraData {
    pub projection: [f32; 16],
    pub view: [f32; 16],
}

impl CameraData {
    pub fn new(projection: Mat4, view: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array(),
            view: view.to_cols_array(),
        }
    }
}

impl Default for CameraData {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// What a flush did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Indexed draws recorded
    pub draw_calls: u32,
    /// Instances drained from the batcher
    pub instances: u32,
    /// Vertex/index buffer rebinds
    pub mesh_binds: u32,
    /// Bindless texture table size at flush time
    pub bindless_textures: u32,
    /// Bindless material table size at flush time
    pub bindless_materials: u32,
}

// ============================================================================
// FrameEmitter
// ============================================================================

pub struct FrameEmitter {
    config: RendererConfig,
    layout: BindingGroupLayoutDesc,
}

impl FrameEmitter {
    pub fn new(config: RendererConfig) -> Self {
        let layout = bindless_layout(&config);
        Self { config, layout }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Layout of the bindless binding group created every flush
    pub fn layout(&self) -> &BindingGroupLayoutDesc {
        &self.layout
    }

    /// Record and submit the frame, then clear the batcher
    ///
    /// # Arguments
    ///
    /// * `graphics_device` - Device the tables are uploaded to and commands submitted on
    /// * `registry` - Bindless tables (read only)
    /// * `batcher` - Instances to draw; always empty afterwards
    /// * `camera` - Camera uniform contents
    ///
    /// # Errors
    ///
    /// Any device failure. The frame is abandoned where it failed; nothing is rolled back.
    pub fn flush(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        registry: &ResourceRegistry,
        batcher: &mut InstanceBatcher,
        camera: &CameraData,
    ) -> Result<FrameStats> {
        let result = self.emit(graphics_device, registry, batcher, camera);
        batcher.clear();

        match &result {
            Ok(stats) => engine_trace!("sandbox::FrameEmitter",
                "Flushed {} draws ({} mesh binds, {} textures, {} materials)",
                stats.draw_calls, stats.mesh_binds, stats.bindless_textures, stats.bindless_materials),
            Err(e) => engine_error!("sandbox::FrameEmitter", "Frame dropped: {}", e),
        }
        result
    }

    fn emit(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        registry: &ResourceRegistry,
        batcher: &InstanceBatcher,
        camera: &CameraData,
    ) -> Result<FrameStats> {
        let mut device = graphics_device::lock_device(graphics_device)?;

        let material_buffer = device.create_buffer(BufferDesc::with_data(
            "bindless.materials",
            BufferUsage::Storage,
            bytemuck::cast_slice(registry.material_records()).to_vec(),
        ))?;
        let camera_buffer = device.create_buffer(BufferDesc::with_data(
            "frame.camera",
            BufferUsage::Uniform,
            bytemuck::bytes_of(camera).to_vec(),
        ))?;

        let textures: Vec<&dyn graphics_device::Texture> =
            registry.textures().iter().map(|t| t.as_ref()).collect();
        let binding_group = device.create_binding_group(
            &self.layout,
            BINDLESS_SET_INDEX,
            &[
                BindingResource::SampledTextureArray(textures),
                BindingResource::StorageBuffer(material_buffer.as_ref()),
                BindingResource::UniformBuffer(camera_buffer.as_ref()),
            ],
        )?;

        let mut stats = FrameStats {
            instances: batcher.len() as u32,
            bindless_textures: registry.texture_count(),
            bindless_materials: registry.material_count(),
            ..Default::default()
        };

        let mut cmd = device.create_command_list()?;
        cmd.begin()?;
        cmd.bind_binding_group(BINDLESS_SET_INDEX, &binding_group)?;

        let mut bound_mesh = None;
        for instance in batcher.instances() {
            let mesh = batcher.meshes().get(instance.mesh_index as usize).ok_or_else(|| {
                engine_err!("sandbox::FrameEmitter", "Instance references frame mesh {}", instance.mesh_index)
            })?;
            let submesh = mesh.submesh(instance.submesh_index as usize).ok_or_else(|| {
                engine_err!("sandbox::FrameEmitter",
                    "Mesh '{}' has no submesh {}", mesh.name(), instance.submesh_index)
            })?;

            if bound_mesh != Some(instance.mesh_index) {
                cmd.bind_vertex_buffer(mesh.vertex_buffer(), 0)?;
                cmd.bind_index_buffer(mesh.index_buffer(), 0, mesh.index_type())?;
                bound_mesh = Some(instance.mesh_index);
                stats.mesh_binds += 1;
            }

            let constants = DrawPushConstants {
                transform: instance.transform.to_cols_array(),
                material_index: instance.material_index,
            };
            cmd.push_constants(self.config.push_constant_stages, 0, bytemuck::bytes_of(&constants))?;
            // Stored indices already include the vertex offset
            cmd.draw_indexed(submesh.index_count, submesh.index_offset, 0)?;
            stats.draw_calls += 1;
        }

        cmd.end()?;
        device.submit(&[cmd.as_ref()])?;
        Ok(stats)
    }
}

fn bindless_layout(config: &RendererConfig) -> BindingGroupLayoutDesc {
    BindingGroupLayoutDesc {
        entries: vec![
            BindingSlotDesc {
                binding: TEXTURE_TABLE_BINDING,
                binding_type: BindingType::SampledTextureArray,
                count: config.bindless_texture_capacity,
                stages: ShaderStages::FRAGMENT,
                partially_bound: true,
            },
            BindingSlotDesc {
                binding: MATERIAL_TABLE_BINDING,
                binding_type: BindingType::StorageBuffer,
                count: 1,
                stages: ShaderStages::FRAGMENT,
                partially_bound: false,
            },
            BindingSlotDesc {
                binding: CAMERA_BINDING,
                binding_type: BindingType::UniformBuffer,
                count: 1,
                stages: ShaderStages::VERTEX,
                partially_bound: false,
            },
        ],
    }
}

#[cfg(test)]
#[path = "frame_emitter_tests.rs"]
mod tests;
