//! Resource-level mesh
//!
//! A `Mesh` owns one vertex buffer and one index buffer shared by all of its
//! submeshes, plus the mesh-local material list submeshes index into.
//!
//! # Hierarchy
//!
//! ```text
//! Mesh "sponza"
//! ├── vertex_buffer (shared, Vertex x vertex_count)
//! ├── index_buffer  (shared, u16 x index_count)
//! ├── submeshes
//! │   ├── [0] indices [0, 36)   vertices [0, 24)   material 0
//! │   └── [1] indices [36, 72)  vertices [24, 48)  material 1
//! └── materials
//!     ├── [0] "stone"
//!     └── [1] "wood"
//! ```
//!
//! Immutable after construction.

use std::sync::{Arc, Mutex};
use glam::Mat4;
use crate::error::Result;
use crate::{engine_bail, engine_info};
use crate::graphics_device::{self, Buffer, BufferDesc, BufferUsage, GraphicsDevice, IndexType};
use crate::import::FlattenedGeometry;
use crate::resource::{Material, MeshId};

/// Index element type of every mesh index buffer
pub const MESH_INDEX_TYPE: IndexType = IndexType::U16;

// ============================================================================
// SUBMESH
// ============================================================================

/// A drawable range of the owning mesh's buffers.
///
/// Indices stored in the index buffer are already offset by `vertex_offset`,
/// so a submesh is drawn with a base vertex of 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubMesh {
    /// First index in the index buffer
    pub index_offset: u32,
    /// Number of indices (a multiple of 3)
    pub index_count: u32,
    /// First vertex in the vertex buffer
    pub vertex_offset: u32,
    /// Number of vertices
    pub vertex_count: u32,
    /// Index into the mesh-local material list
    pub material_index: u32,
    /// Node-local to mesh-root transform accumulated while flattening
    pub transform: Mat4,
}

impl SubMesh {
    /// One past the last index of this submesh
    pub fn index_end(&self) -> u64 {
        self.index_offset as u64 + self.index_count as u64
    }

    /// One past the last vertex of this submesh
    pub fn vertex_end(&self) -> u64 {
        self.vertex_offset as u64 + self.vertex_count as u64
    }
}

// ============================================================================
// MESH
// ============================================================================

pub struct Mesh {
    id: MeshId,
    name: String,
    vertex_buffer: Arc<dyn Buffer>,
    index_buffer: Arc<dyn Buffer>,
    vertex_count: u32,
    index_count: u32,
    submeshes: Vec<SubMesh>,
    materials: Vec<Material>,
}

impl Mesh {
    /// Upload flattened geometry and take ownership of its materials
    ///
    /// # Arguments
    ///
    /// * `graphics_device` - Device the buffers are created on
    /// * `name` - Debug name (buffer labels derive from it)
    /// * `geometry` - Flat vertex/index arrays and submesh ranges
    /// * `materials` - Mesh-local materials indexed by `SubMesh::material_index`
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if a submesh range falls outside the buffers or
    /// references a missing material, `Error::GpuResourceCreationFailure`
    /// from the device.
    pub fn from_geometry(
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        name: impl Into<String>,
        geometry: FlattenedGeometry,
        materials: Vec<Material>,
    ) -> Result<Self> {
        let name = name.into();
        let vertex_count = geometry.vertices.len() as u64;
        let index_count = geometry.indices.len() as u64;

        for (i, submesh) in geometry.submeshes.iter().enumerate() {
            if submesh.index_end() > index_count {
                engine_bail!("sandbox::Mesh",
                    "Mesh '{}': submesh {} index range [{}, {}) exceeds index count {}",
                    name, i, submesh.index_offset, submesh.index_end(), index_count);
            }
            if submesh.vertex_end() > vertex_count {
                engine_bail!("sandbox::Mesh",
                    "Mesh '{}': submesh {} vertex range [{}, {}) exceeds vertex count {}",
                    name, i, submesh.vertex_offset, submesh.vertex_end(), vertex_count);
            }
            if submesh.material_index as usize >= materials.len() {
                engine_bail!("sandbox::Mesh",
                    "Mesh '{}': submesh {} references material {} but only {} exist",
                    name, i, submesh.material_index, materials.len());
            }
        }

        let (vertex_buffer, index_buffer) = {
            let mut device = graphics_device::lock_device(graphics_device)?;
            let vertex_buffer = device.create_buffer(BufferDesc::with_data(
                format!("{}.vertices", name),
                BufferUsage::Vertex,
                bytemuck::cast_slice(&geometry.vertices).to_vec(),
            ))?;
            let index_buffer = device.create_buffer(BufferDesc::with_data(
                format!("{}.indices", name),
                BufferUsage::Index,
                bytemuck::cast_slice(&geometry.indices).to_vec(),
            ))?;
            (vertex_buffer, index_buffer)
        };

        let id = MeshId::next();
        engine_info!("sandbox::Mesh",
            "Created {} '{}': {} vertices, {} indices, {} submeshes, {} materials",
            id, name, vertex_count, index_count, geometry.submeshes.len(), materials.len());

        Ok(Self {
            id,
            name,
            vertex_buffer,
            index_buffer,
            vertex_count: vertex_count as u32,
            index_count: index_count as u32,
            submeshes: geometry.submeshes,
            materials,
        })
    }

    pub fn id(&self) -> MeshId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_buffer(&self) -> &Arc<dyn Buffer> {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &Arc<dyn Buffer> {
        &self.index_buffer
    }

    pub fn index_type(&self) -> IndexType {
        MESH_INDEX_TYPE
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn submeshes(&self) -> &[SubMesh] {
        &self.submeshes
    }

    pub fn submesh(&self, index: usize) -> Option<&SubMesh> {
        self.submeshes.get(index)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Material used by a submesh
    pub fn submesh_material(&self, submesh: &SubMesh) -> Option<&Material> {
        self.materials.get(submesh.material_index as usize)
    }

    /// Drop materials without revalidating submeshes, to build meshes that
    /// `from_geometry` would reject
    #[cfg(test)]
    pub(crate) fn truncate_materials(&mut self, len: usize) {
        self.materials.truncate(len);
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
