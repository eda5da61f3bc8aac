//! glTF 2.0 scene source
//!
//! Reads the document and its buffers (images are left to the sandbox's
//! image decoder) and converts them into the importer's source model:
//!
//! - A synthetic identity root holds the scene's root nodes, so multi-root
//!   scenes flatten like any other tree.
//! - Every primitive becomes one `SourceMesh`; a node referencing a glTF
//!   mesh references all of its primitives.
//! - Triangle strips and fans are expanded to triangle lists. Points and
//!   lines are passed through as 1- and 2-vertex faces, which the flattener
//!   rejects.
//! - Primitives without a material use a default material appended after
//!   the document's own.
//! - Base colour texture and factor map to the diffuse channel, the normal
//!   texture to the normals channel. Only URI images are supported.

use std::path::Path;
use glam::{Mat4, Vec2, Vec3};
use gltf::mesh::Mode;
use graphics_sandbox::sandbox::{Error, Result};
use graphics_sandbox::sandbox::import::{
    Face, SceneSource, SourceMaterial, SourceMesh, SourceNode, SourceScene, TextureChannel,
};
use graphics_sandbox::{engine_debug, engine_warn};

/// Scene source for `.gltf` / `.glb` files
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfSceneSource;

impl GltfSceneSource {
    pub fn new() -> Self {
        Self
    }
}

impl SceneSource for GltfSceneSource {
    fn parse(&self, path: &Path) -> Result<SourceScene> {
        let parse_error = |e: gltf::Error| Error::SceneParseFailure(format!("{}: {}", path.display(), e));

        let gltf::Gltf { document, blob } = gltf::Gltf::open(path).map_err(parse_error)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let buffers = gltf::import_buffers(&document, Some(base), blob).map_err(parse_error)?;

        let mut builder = SceneBuilder {
            buffers: &buffers,
            meshes: Vec::new(),
            mesh_primitives: Vec::new(),
            default_material: document.materials().len(),
            needs_default_material: false,
        };
        for mesh in document.meshes() {
            builder.add_mesh(&mesh)?;
        }

        let mut materials: Vec<SourceMaterial> = document.materials().map(convert_material).collect();
        if builder.needs_default_material {
            materials.push(SourceMaterial::new("default"));
        }

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| Error::SceneParseFailure(format!("{}: document has no scene", path.display())))?;

        let mut root = SourceNode::new(scene.name().unwrap_or("scene"));
        root.children = builder.convert_nodes(&scene, document.nodes().len())?;

        engine_debug!("sandbox::GltfSceneSource",
            "Parsed '{}': {} meshes, {} materials", path.display(), builder.meshes.len(), materials.len());

        Ok(SourceScene {
            root,
            meshes: builder.meshes,
            materials,
        })
    }
}

struct SceneBuilder<'a> {
    buffers: &'a [gltf::buffer::Data],
    meshes: Vec<SourceMesh>,
    /// Source mesh indices per glTF mesh index
    mesh_primitives: Vec<Vec<usize>>,
    default_material: usize,
    needs_default_material: bool,
}

impl SceneBuilder<'_> {
    fn add_mesh(&mut self, mesh: &gltf::Mesh<'_>) -> Result<()> {
        let mesh_name = mesh
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh{}", mesh.index()));
        let primitive_count = mesh.primitives().len();

        let mut indices = Vec::with_capacity(primitive_count);
        for primitive in mesh.primitives() {
            let name = if primitive_count > 1 {
                format!("{}#{}", mesh_name, primitive.index())
            } else {
                mesh_name.clone()
            };
            indices.push(self.meshes.len());
            let source_mesh = self.convert_primitive(name, &primitive)?;
            self.meshes.push(source_mesh);
        }
        self.mesh_primitives.push(indices);
        Ok(())
    }

    fn convert_primitive(&mut self, name: String, primitive: &gltf::Primitive<'_>) -> Result<SourceMesh> {
        let buffers = self.buffers;
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .ok_or_else(|| Error::SceneParseFailure(format!("primitive '{}' has no positions", name)))?
            .map(Vec3::from_array)
            .collect();
        let tex_coords = reader
            .read_tex_coords(0)
            .map(|coords| coords.into_f32().map(Vec2::from_array).collect());
        let normals = reader
            .read_normals()
            .map(|normals| normals.map(Vec3::from_array).collect());
        // xyz only, w carries handedness
        let tangents = reader
            .read_tangents()
            .map(|tangents| tangents.map(|[x, y, z, _]| Vec3::new(x, y, z)).collect());

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        let faces = faces_for_mode(primitive.mode(), &indices);

        let material_index = match primitive.material().index() {
            Some(index) => index,
            None => {
                self.needs_default_material = true;
                self.default_material
            }
        };

        Ok(SourceMesh {
            name,
            positions,
            tex_coords,
            normals,
            tangents,
            faces,
            material_index,
        })
    }

    /// Convert the node trees under the scene's roots
    ///
    /// glTF requires node hierarchies to be disjoint trees. A node reached
    /// twice (shared child, repeated child index, cycle) fails the parse.
    fn convert_nodes(&self, scene: &gltf::Scene<'_>, node_count: usize) -> Result<Vec<SourceNode>> {
        // Pre-order walk, each node visited once
        let mut visited = vec![false; node_count];
        let mut order = Vec::new();
        let mut stack: Vec<gltf::Node<'_>> = scene.nodes().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            let index = node.index();
            match visited.get_mut(index) {
                Some(seen) if !*seen => *seen = true,
                Some(_) => {
                    return Err(Error::SceneParseFailure(format!(
                        "node {} has more than one parent",
                        index
                    )));
                }
                None => {
                    return Err(Error::SceneParseFailure(format!("node {} does not exist", index)));
                }
            }
            let first_child = stack.len();
            stack.extend(node.children());
            stack[first_child..].reverse();
            order.push(node);
        }

        // Build bottom-up: every descendant follows its ancestor in pre-order
        let mut converted: Vec<Option<SourceNode>> = (0..node_count).map(|_| None).collect();
        for node in order.iter().rev() {
            let mut source = self.convert_node(node);
            source.children = node
                .children()
                .filter_map(|child| converted[child.index()].take())
                .collect();
            converted[node.index()] = Some(source);
        }
        Ok(scene
            .nodes()
            .filter_map(|node| converted[node.index()].take())
            .collect())
    }

    /// A node with its transform and meshes, without children
    fn convert_node(&self, node: &gltf::Node<'_>) -> SourceNode {
        let name = node
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node{}", node.index()));
        let mut converted = SourceNode::new(name)
            .with_transform(Mat4::from_cols_array_2d(&node.transform().matrix()));

        if let Some(mesh) = node.mesh() {
            if let Some(primitives) = self.mesh_primitives.get(mesh.index()) {
                converted.meshes.extend_from_slice(primitives);
            }
        }
        converted
    }
}

/// Faces for a primitive's index list
fn faces_for_mode(mode: Mode, indices: &[u32]) -> Vec<Face> {
    let face = |slice: &[u32]| Face { indices: slice.to_vec() };
    match mode {
        Mode::Triangles => indices.chunks(3).map(face).collect(),
        Mode::TriangleStrip => (0..indices.len().saturating_sub(2))
            .map(|i| {
                // Odd triangles swap their first two vertices to keep the winding
                if i % 2 == 0 {
                    Face::triangle(indices[i], indices[i + 1], indices[i + 2])
                } else {
                    Face::triangle(indices[i + 1], indices[i], indices[i + 2])
                }
            })
            .collect(),
        Mode::TriangleFan => (1..indices.len().saturating_sub(1))
            .map(|i| Face::triangle(indices[0], indices[i], indices[i + 1]))
            .collect(),
        Mode::Points => indices.chunks(1).map(face).collect(),
        Mode::Lines => indices.chunks(2).map(face).collect(),
        Mode::LineStrip => indices.windows(2).map(face).collect(),
        Mode::LineLoop => {
            let mut faces: Vec<Face> = indices.windows(2).map(face).collect();
            if let (Some(&first), Some(&last)) = (indices.first(), indices.last()) {
                if indices.len() > 2 {
                    faces.push(Face { indices: vec![last, first] });
                }
            }
            faces
        }
    }
}

fn convert_material(material: gltf::Material<'_>) -> SourceMaterial {
    let name = material
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("material{}", material.index().unwrap_or(0)));
    let pbr = material.pbr_metallic_roughness();

    let mut converted = SourceMaterial::new(name);
    converted.base_color = Some(pbr.base_color_factor());

    if let Some(info) = pbr.base_color_texture() {
        if let Some(uri) = image_uri(&converted.name, &info.texture()) {
            converted.textures.insert(TextureChannel::Diffuse, uri);
        }
    }
    if let Some(normal) = material.normal_texture() {
        if let Some(uri) = image_uri(&converted.name, &normal.texture()) {
            converted.textures.insert(TextureChannel::Normals, uri);
        }
    }
    converted
}

/// Relative path of a texture's image, if it is stored as an external file
fn image_uri(material: &str, texture: &gltf::Texture<'_>) -> Option<String> {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => Some(uri.to_string()),
        _ => {
            engine_warn!("sandbox::GltfSceneSource",
                "Material '{}': embedded image {} not supported, slot left empty",
                material, texture.source().index());
            None
        }
    }
}

#[cfg(test)]
#[path = "gltf_source_tests.rs"]
mod tests;
