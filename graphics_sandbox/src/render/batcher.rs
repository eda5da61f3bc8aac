//! Instance batching
//!
//! Collects "draw this mesh at this world transform" requests for one frame.
//! Each request expands into one RenderInstance per submesh, in submesh
//! order, with materials registered in the bindless tables on the way.
//! Submitted meshes are kept alive in a frame mesh table, deduplicated by
//! identity, until the batcher is cleared.

use std::sync::Arc;
use glam::Mat4;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::{engine_err, engine_trace};
use crate::render::{RenderInstance, ResourceRegistry};
use crate::resource::{Mesh, MeshId};

#[derive(Default)]
pub struct InstanceBatcher {
    instances: Vec<RenderInstance>,
    meshes: Vec<Arc<Mesh>>,
    mesh_indices: FxHashMap<MeshId, u32>,
}

impl InstanceBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every submesh of `mesh` for drawing
    ///
    /// May be called any number of times per frame, with the same mesh or
    /// interleaved meshes. Draw order is submission order.
    ///
    /// # Arguments
    ///
    /// * `registry` - Bindless tables the submesh materials are registered in
    /// * `mesh` - Mesh to draw
    /// * `world_transform` - Applied on top of each submesh transform
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if a submesh references a material the mesh
    /// does not have. Nothing is queued or registered in that case.
    pub fn submit(
        &mut self,
        registry: &mut ResourceRegistry,
        mesh: &Arc<Mesh>,
        world_transform: Mat4,
    ) -> Result<()> {
        // Look every material up before registering any, so a bad submesh
        // leaves both the batch and the registry untouched
        let materials = mesh
            .submeshes()
            .iter()
            .enumerate()
            .map(|(i, submesh)| {
                mesh.submesh_material(submesh).ok_or_else(|| {
                    engine_err!("sandbox::InstanceBatcher",
                        "Mesh '{}': submesh {} references missing material {}",
                        mesh.name(), i, submesh.material_index)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let material_indices: Vec<u32> = materials
            .into_iter()
            .map(|material| registry.add_or_get_material(material))
            .collect();

        let mesh_index = self.frame_mesh_index(mesh);
        self.instances.extend(
            mesh.submeshes()
                .iter()
                .zip(material_indices)
                .enumerate()
                .map(|(i, (submesh, material_index))| RenderInstance {
                    mesh_index,
                    submesh_index: i as u32,
                    material_index,
                    transform: world_transform * submesh.transform,
                }),
        );

        engine_trace!("sandbox::InstanceBatcher",
            "Submitted '{}' ({} instances queued)", mesh.name(), self.instances.len());
        Ok(())
    }

    fn frame_mesh_index(&mut self, mesh: &Arc<Mesh>) -> u32 {
        if let Some(&index) = self.mesh_indices.get(&mesh.id()) {
            return index;
        }
        let index = self.meshes.len() as u32;
        self.meshes.push(mesh.clone());
        self.mesh_indices.insert(mesh.id(), index);
        index
    }

    /// Queued instances, in draw order
    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    /// Meshes referenced by `RenderInstance::mesh_index`
    pub fn meshes(&self) -> &[Arc<Mesh>] {
        &self.meshes
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop every instance and the frame mesh table
    pub fn clear(&mut self) {
        self.instances.clear();
        self.meshes.clear();
        self.mesh_indices.clear();
    }
}

#[cfg(test)]
#[path = "batcher_tests.rs"]
mod tests;
