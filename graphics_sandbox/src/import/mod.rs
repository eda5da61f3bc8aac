//! Scene import
//!
//! `SceneSource` + `Flattener` + `MaterialResolver` → `resource::Mesh`,
//! driven by `MeshLoader`. Runs once per asset at load time.

pub mod scene_source;
pub mod flattener;
pub mod material_resolver;
pub mod mesh_loader;

pub use scene_source::{
    SourceScene, SourceNode, SourceMesh, SourceMaterial, Face, TextureChannel,
    DecodedImage, SceneSource, ImageDecoder,
};
pub use flattener::{Flattener, FlattenedGeometry};
pub use material_resolver::{MaterialResolver, NORMAL_MAP_CHANNELS};
pub use mesh_loader::MeshLoader;

// In-memory scene source and image decoder (no files required)
#[cfg(any(test, feature = "mock"))]
pub mod mock_sources;
