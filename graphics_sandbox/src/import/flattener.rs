//! Scene-graph flattening
//!
//! Walks a parsed node tree and packs every referenced mesh into one vertex
//! array and one 16-bit index array. Each (node, mesh reference) pair becomes
//! exactly one submesh. Traversal is pre-order (a node's own meshes before
//! its children, children left to right) and iterative, so arbitrarily deep
//! trees cannot exhaust the call stack.

use glam::Mat4;
use crate::config::{ImportConfig, TransformPolicy};
use crate::error::{Error, Result};
use crate::{engine_debug, engine_error};
use crate::import::{SourceMesh, SourceNode, SourceScene};
use crate::resource::{SubMesh, Vertex};

/// Flat, upload-ready geometry plus the submesh ranges that tile it
#[derive(Debug, Clone, Default)]
pub struct FlattenedGeometry {
    pub vertices: Vec<Vertex>,
    /// Indices already offset by their submesh's `vertex_offset`
    pub indices: Vec<u16>,
    /// In traversal order; index ranges are contiguous and non-overlapping
    pub submeshes: Vec<SubMesh>,
}

pub struct Flattener {
    config: ImportConfig,
}

impl Flattener {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Flatten a scene into contiguous vertex/index arrays
    ///
    /// # Errors
    ///
    /// - `Error::UnsupportedTopology` for a face that is not a triangle
    /// - `Error::IndexOverflow` when a vertex offset plus a local index exceeds `u16::MAX`
    /// - `Error::SceneParseFailure` for dangling mesh, material or vertex references
    pub fn flatten(&self, scene: &SourceScene) -> Result<FlattenedGeometry> {
        let mut geometry = FlattenedGeometry::default();
        let mut stack: Vec<(&SourceNode, Mat4)> = vec![(&scene.root, self.config.initial_transform)];

        while let Some((node, parent_transform)) = stack.pop() {
            let transform = match self.config.transform_policy {
                TransformPolicy::Hierarchical => parent_transform * node.transform,
                TransformPolicy::Identity => parent_transform,
            };

            for &mesh_index in &node.meshes {
                let mesh = scene.meshes.get(mesh_index).ok_or_else(|| {
                    Error::SceneParseFailure(format!(
                        "node '{}' references mesh {} but the scene has {}",
                        node.name,
                        mesh_index,
                        scene.meshes.len()
                    ))
                })?;
                if mesh.material_index >= scene.materials.len() {
                    return Err(Error::SceneParseFailure(format!(
                        "mesh '{}' references material {} but the scene has {}",
                        mesh.name,
                        mesh.material_index,
                        scene.materials.len()
                    )));
                }
                append_mesh(&mut geometry, mesh, transform)?;
            }

            // Reversed so the leftmost child is popped first
            for child in node.children.iter().rev() {
                stack.push((child, transform));
            }
        }

        engine_debug!("sandbox::Flattener",
            "Flattened {} submeshes ({} vertices, {} indices)",
            geometry.submeshes.len(), geometry.vertices.len(), geometry.indices.len());

        Ok(geometry)
    }
}

fn append_mesh(geometry: &mut FlattenedGeometry, mesh: &SourceMesh, transform: Mat4) -> Result<()> {
    let vertex_offset = geometry.vertices.len() as u64;
    let index_offset = geometry.indices.len() as u64;
    let vertex_count = mesh.vertex_count() as u64;

    // Validate every face before touching the output
    let mut indices = Vec::with_capacity(mesh.faces.len() * 3);
    for (face_index, face) in mesh.faces.iter().enumerate() {
        if face.indices.len() != 3 {
            engine_error!("sandbox::Flattener",
                "Mesh '{}': face {} has {} vertices", mesh.name, face_index, face.indices.len());
            return Err(Error::UnsupportedTopology {
                mesh: mesh.name.clone(),
                face: face_index,
                vertex_count: face.indices.len(),
            });
        }
        for &local in &face.indices {
            if local as u64 >= vertex_count {
                return Err(Error::SceneParseFailure(format!(
                    "mesh '{}': face {} references vertex {} but the mesh has {}",
                    mesh.name, face_index, local, vertex_count
                )));
            }
            let index = vertex_offset + local as u64;
            let index = u16::try_from(index).map_err(|_| {
                engine_error!("sandbox::Flattener",
                    "Mesh '{}': index {} exceeds the 16-bit range", mesh.name, index);
                Error::IndexOverflow { mesh: mesh.name.clone(), index }
            })?;
            indices.push(index);
        }
    }

    geometry.vertices.extend((0..mesh.positions.len()).map(|i| Vertex {
        position: mesh.positions[i],
        tex_coord: attribute(&mesh.tex_coords, i),
        normal: attribute(&mesh.normals, i),
        tangent: attribute(&mesh.tangents, i),
    }));
    geometry.indices.extend_from_slice(&indices);

    geometry.submeshes.push(SubMesh {
        index_offset: index_offset as u32,
        index_count: indices.len() as u32,
        vertex_offset: vertex_offset as u32,
        vertex_count: vertex_count as u32,
        material_index: mesh.material_index as u32,
        transform,
    });

    Ok(())
}

/// Attribute value for vertex `i`, zero when the attribute (or the entry) is absent
fn attribute<T: Copy + Default>(values: &Option<Vec<T>>, i: usize) -> T {
    values
        .as_ref()
        .and_then(|values| values.get(i))
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "flattener_tests.rs"]
mod tests;
