//! Resource module
//!
//! Long-lived GPU-backed assets produced by the importer: textures,
//! materials and meshes, each with an opaque identity.

pub mod id;
pub mod vertex;
pub mod texture;
pub mod material;
pub mod mesh;

pub use id::{TextureId, MaterialId, MeshId};
pub use vertex::{Vertex, VERTEX_STRIDE};
pub use texture::Texture;
pub use material::Material;
pub use mesh::{Mesh, SubMesh, MESH_INDEX_TYPE};
