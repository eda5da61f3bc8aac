//! Tests for the MeshLoader
//!
//! End-to-end import on mock sources and a MockGraphicsDevice.

use super::*;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{MockDeviceLog, MockGraphicsDevice};
use crate::import::mock_sources::{MockImageDecoder, MockSceneSource};
use crate::import::{Face, SourceMaterial, SourceMesh, SourceNode, SourceScene, TextureChannel};
use glam::{Mat4, Vec3};
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn triangle(material_index: usize) -> SourceMesh {
    SourceMesh {
        name: "tri".to_string(),
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        faces: vec![Face::triangle(0, 1, 2)],
        material_index,
        ..Default::default()
    }
}

/// root -> [left(tri, material 0), right(tri, material 1)]
fn two_material_scene() -> SourceScene {
    SourceScene {
        root: SourceNode::new("root")
            .with_child(SourceNode::new("left").with_mesh(0))
            .with_child(
                SourceNode::new("right")
                    .with_transform(Mat4::from_translation(Vec3::X))
                    .with_mesh(1),
            ),
        meshes: vec![triangle(0), triangle(1)],
        materials: vec![
            SourceMaterial::new("stone")
                .with_texture(TextureChannel::Diffuse, "textures/stone.png")
                .with_texture(TextureChannel::Normals, "textures/stone_n.png"),
            SourceMaterial::new("plain"),
        ],
    }
}

fn loader(source: MockSceneSource, decoder: MockImageDecoder, device: MockGraphicsDevice) -> (MeshLoader, MockDeviceLog) {
    let (device, log) = device.into_shared();
    let loader = MeshLoader::new(device, Arc::new(source), Arc::new(decoder), ImportConfig::default());
    (loader, log)
}

fn decoder() -> MockImageDecoder {
    MockImageDecoder::new()
        .with_solid("assets/scene/textures/stone.png", [128, 128, 128, 255])
        .with_solid("assets/scene/textures/stone_n.png", [128, 128, 255, 255])
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_load_scene() {
    let source = MockSceneSource::new().with_scene("assets/scene/scene.gltf", two_material_scene());
    let (loader, log) = loader(source, decoder(), MockGraphicsDevice::new());

    let mesh = loader.load(Path::new("assets/scene/scene.gltf")).unwrap();

    assert_eq!(mesh.name(), "scene");
    assert_eq!(mesh.submeshes().len(), 2);
    assert_eq!(mesh.materials().len(), 2);
    assert_eq!(mesh.index_count(), 6);
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.submeshes()[1].transform, Mat4::from_translation(Vec3::X));
    assert_eq!(mesh.submeshes()[1].material_index, 1);

    let stone = &mesh.materials()[0];
    assert!(stone.albedo().is_some());
    assert!(stone.normal_map().is_some());
    assert!(mesh.materials()[1].albedo().is_none());

    assert_eq!(log.textures().len(), 2);
    assert!(log.buffer("scene.vertices").is_some());
    assert!(log.buffer("scene.indices").is_some());
}

#[test]
fn test_textures_resolved_relative_to_scene_directory() {
    let source = MockSceneSource::new().with_scene("assets/scene/scene.gltf", two_material_scene());
    let decoder = Arc::new(decoder());
    let (device, _log) = MockGraphicsDevice::new().into_shared();
    let loader = MeshLoader::new(device, Arc::new(source), decoder.clone(), ImportConfig::default());

    loader.load(Path::new("assets/scene/scene.gltf")).unwrap();

    assert_eq!(
        decoder.decoded_paths(),
        vec![
            PathBuf::from("assets/scene/textures/stone.png"),
            PathBuf::from("assets/scene/textures/stone_n.png"),
        ]
    );
}

#[test]
fn test_parse_failure() {
    let (loader, log) = loader(MockSceneSource::new(), decoder(), MockGraphicsDevice::new());

    let result = loader.load(Path::new("assets/missing.gltf"));

    assert!(matches!(result, Err(Error::SceneParseFailure(_))));
    assert!(log.buffers().is_empty());
}

#[test]
fn test_unsupported_topology_aborts_before_upload() {
    let mut scene = two_material_scene();
    scene.meshes[1].faces.push(Face { indices: vec![0, 1] });
    let source = MockSceneSource::new().with_scene("scene.gltf", scene);
    let (loader, log) = loader(source, decoder(), MockGraphicsDevice::new());

    let result = loader.load(Path::new("scene.gltf"));

    assert!(matches!(result, Err(Error::UnsupportedTopology { face: 1, vertex_count: 2, .. })));
    assert!(log.buffers().is_empty());
    assert!(log.textures().is_empty());
}

#[test]
fn test_gpu_failure_is_fatal() {
    let source = MockSceneSource::new().with_scene("assets/scene/scene.gltf", two_material_scene());
    let (loader, _log) = loader(source, decoder(), MockGraphicsDevice::new().with_failing_buffers());

    let result = loader.load(Path::new("assets/scene/scene.gltf"));
    assert!(matches!(result, Err(Error::GpuResourceCreationFailure(_))));
}

#[test]
fn test_failed_load_does_not_affect_loaded_mesh() {
    let source = MockSceneSource::new().with_scene("assets/scene/scene.gltf", two_material_scene());
    let (loader, _log) = loader(source, decoder(), MockGraphicsDevice::new());

    let first = loader.load(Path::new("assets/scene/scene.gltf")).unwrap();
    assert!(loader.load(Path::new("assets/other.gltf")).is_err());

    assert_eq!(first.submeshes().len(), 2);
    assert_eq!(first.materials().len(), 2);
}
