//! Scene parser and image decoder contracts
//!
//! The importer never reads files itself: a `SceneSource` turns a scene file
//! into the in-memory node tree below, and an `ImageDecoder` turns an image
//! file into RGBA8 pixels. Production implementations live in the
//! `graphics_sandbox_assets` crate.

use std::path::Path;
use glam::{Mat4, Vec2, Vec3};
use rustc_hash::FxHashMap;
use crate::error::Result;

// ============================================================================
// SCENE MODEL
// ============================================================================

/// A parsed scene: node tree plus the mesh and material arrays nodes index into
#[derive(Debug, Clone, Default)]
pub struct SourceScene {
    pub root: SourceNode,
    pub meshes: Vec<SourceMesh>,
    pub materials: Vec<SourceMaterial>,
}

/// A node of the scene tree
#[derive(Debug, Clone)]
pub struct SourceNode {
    pub name: String,
    /// Local transform relative to the parent node
    pub transform: Mat4,
    /// Indices into `SourceScene::meshes`
    pub meshes: Vec<usize>,
    /// Children, in declaration order
    pub children: Vec<SourceNode>,
}

impl Default for SourceNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Mat4::IDENTITY,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl SourceNode {
    /// Node with an identity transform and nothing attached
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh_index: usize) -> Self {
        self.meshes.push(mesh_index);
        self
    }

    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }
}

// Deep trees would otherwise recurse once per level when dropped
impl Drop for SourceNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A face of a source mesh; indices are local to the mesh's vertex arrays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<u32>,
}

impl Face {
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self { indices: vec![a, b, c] }
    }
}

/// Mesh data as the parser exposes it. Every attribute except positions may be absent.
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub tex_coords: Option<Vec<Vec2>>,
    pub normals: Option<Vec<Vec3>>,
    pub tangents: Option<Vec<Vec3>>,
    pub faces: Vec<Face>,
    /// Index into `SourceScene::materials`
    pub material_index: usize,
}

impl SourceMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Texture channel kinds a material can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    /// Base colour / albedo
    Diffuse,
    /// Height or bump map (used as the primary normal-map channel)
    Height,
    /// Tangent-space normal map
    Normals,
    /// Camera-space normal map
    NormalCamera,
}

/// Material as the parser exposes it: texture paths per channel, relative to the scene file
#[derive(Debug, Clone, Default)]
pub struct SourceMaterial {
    pub name: String,
    /// RGBA albedo factor, when the format carries one
    pub base_color: Option<[f32; 4]>,
    pub textures: FxHashMap<TextureChannel, String>,
}

impl SourceMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, channel: TextureChannel, path: impl Into<String>) -> Self {
        self.textures.insert(channel, path.into());
        self
    }

    /// Texture path for a channel, if the material has one
    pub fn texture(&self, channel: TextureChannel) -> Option<&str> {
        self.textures.get(&channel).map(String::as_str)
    }
}

// ============================================================================
// DECODED IMAGE
// ============================================================================

/// RGBA8 pixels, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

// ============================================================================
// TRAITS
// ============================================================================

/// Scene file parser
pub trait SceneSource: Send + Sync {
    /// Parse a scene file into a node tree
    ///
    /// # Errors
    ///
    /// `Error::SceneParseFailure` if the file cannot be read or is malformed.
    fn parse(&self, path: &Path) -> Result<SourceScene>;
}

/// Image file decoder
pub trait ImageDecoder: Send + Sync {
    /// Decode an image file into RGBA8 pixels
    ///
    /// # Errors
    ///
    /// `Error::TextureDecodeFailure` if the file cannot be read or decoded.
    fn decode(&self, path: &Path) -> Result<DecodedImage>;
}
