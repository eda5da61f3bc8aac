//! Tests for the InstanceBatcher

use super::*;
use crate::error::Error;
use crate::graphics_device::GraphicsDevice;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::import::FlattenedGeometry;
use crate::resource::{Material, SubMesh, Vertex};
use glam::Vec3;
use std::sync::Mutex;

// ============================================================================
// Helper Functions
// ============================================================================

fn create_device() -> Arc<Mutex<dyn GraphicsDevice>> {
    MockGraphicsDevice::new().into_shared().0
}

/// Mesh with one triangle submesh per entry of `local_transforms`, each with its own material
fn create_mesh(device: &Arc<Mutex<dyn GraphicsDevice>>, name: &str, local_transforms: &[Mat4]) -> Arc<Mesh> {
    let mut geometry = FlattenedGeometry::default();
    let mut materials = Vec::new();
    for (i, transform) in local_transforms.iter().enumerate() {
        let base = geometry.vertices.len() as u16;
        geometry.vertices.extend([Vec3::ZERO, Vec3::X, Vec3::Y].map(Vertex::from_position));
        geometry.indices.extend([base, base + 1, base + 2]);
        geometry.submeshes.push(SubMesh {
            index_offset: 3 * i as u32,
            index_count: 3,
            vertex_offset: base as u32,
            vertex_count: 3,
            material_index: i as u32,
            transform: *transform,
        });
        materials.push(Material::untextured(format!("{}.{}", name, i)));
    }
    Arc::new(Mesh::from_geometry(device, name, geometry, materials).unwrap())
}

fn translation(x: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, 0.0, 0.0))
}

// ============================================================================
// Submit
// ============================================================================

#[test]
fn test_submit_expands_submeshes_in_order() {
    let device = create_device();
    let mesh = create_mesh(&device, "pair", &[Mat4::IDENTITY, translation(1.0)]);
    let mut registry = ResourceRegistry::new();
    let mut batcher = InstanceBatcher::new();

    batcher.submit(&mut registry, &mesh, Mat4::IDENTITY).unwrap();

    assert_eq!(batcher.len(), 2);
    let instances = batcher.instances();
    assert_eq!(instances[0].submesh_index, 0);
    assert_eq!(instances[1].submesh_index, 1);
    assert_eq!(instances[0].mesh_index, 0);
    assert_eq!(instances[0].material_index, 0);
    assert_eq!(instances[1].material_index, 1);
    assert_eq!(registry.material_count(), 2);
}

#[test]
fn test_instance_transform_is_world_times_local() {
    let device = create_device();
    let local = translation(3.0);
    let mesh = create_mesh(&device, "one", &[local]);
    let world = Mat4::from_scale(Vec3::splat(2.0));
    let mut registry = ResourceRegistry::new();
    let mut batcher = InstanceBatcher::new();

    batcher.submit(&mut registry, &mesh, world).unwrap();

    let transform = batcher.instances()[0].transform;
    assert_eq!(transform, world * local);
    assert_ne!(transform, local * world);
    assert_eq!(transform.w_axis.x, 6.0);
}

#[test]
fn test_same_mesh_submitted_twice() {
    let device = create_device();
    let mesh = create_mesh(&device, "pair", &[Mat4::IDENTITY, translation(1.0)]);
    let mut registry = ResourceRegistry::new();
    let mut batcher = InstanceBatcher::new();

    batcher.submit(&mut registry, &mesh, translation(10.0)).unwrap();
    batcher.submit(&mut registry, &mesh, translation(20.0)).unwrap();

    assert_eq!(batcher.len(), 4);
    let offsets: Vec<f32> = batcher.instances().iter().map(|i| i.transform.w_axis.x).collect();
    assert_eq!(offsets, vec![10.0, 11.0, 20.0, 21.0]);
    // One mesh table entry, materials registered once
    assert_eq!(batcher.meshes().len(), 1);
    assert!(batcher.instances().iter().all(|i| i.mesh_index == 0));
    assert_eq!(registry.material_count(), 2);

    batcher.clear();
    assert!(batcher.is_empty());
    assert!(batcher.meshes().is_empty());
}

#[test]
fn test_interleaved_meshes_keep_submission_order() {
    let device = create_device();
    let a = create_mesh(&device, "a", &[Mat4::IDENTITY]);
    let b = create_mesh(&device, "b", &[Mat4::IDENTITY]);
    let mut registry = ResourceRegistry::new();
    let mut batcher = InstanceBatcher::new();

    batcher.submit(&mut registry, &a, Mat4::IDENTITY).unwrap();
    batcher.submit(&mut registry, &b, Mat4::IDENTITY).unwrap();
    batcher.submit(&mut registry, &a, Mat4::IDENTITY).unwrap();

    let mesh_indices: Vec<u32> = batcher.instances().iter().map(|i| i.mesh_index).collect();
    assert_eq!(mesh_indices, vec![0, 1, 0]);
    assert_eq!(batcher.meshes().len(), 2);
    assert!(Arc::ptr_eq(&batcher.meshes()[1], &b));
}

#[test]
fn test_registry_persists_across_batches() {
    let device = create_device();
    let mesh = create_mesh(&device, "one", &[Mat4::IDENTITY]);
    let mut registry = ResourceRegistry::new();
    let mut batcher = InstanceBatcher::new();

    batcher.submit(&mut registry, &mesh, Mat4::IDENTITY).unwrap();
    batcher.clear();
    batcher.submit(&mut registry, &mesh, Mat4::IDENTITY).unwrap();

    assert_eq!(registry.material_count(), 1);
    assert_eq!(batcher.instances()[0].material_index, 0);
}

#[test]
fn test_missing_material_leaves_batch_and_registry_untouched() {
    let device = create_device();
    let mut geometry = FlattenedGeometry::default();
    let mut materials = Vec::new();
    for i in 0..2u16 {
        geometry.vertices.extend([Vec3::ZERO, Vec3::X, Vec3::Y].map(Vertex::from_position));
        geometry.indices.extend([3 * i, 3 * i + 1, 3 * i + 2]);
        geometry.submeshes.push(SubMesh {
            index_offset: 3 * i as u32,
            index_count: 3,
            vertex_offset: 3 * i as u32,
            vertex_count: 3,
            material_index: i as u32,
            transform: Mat4::IDENTITY,
        });
        materials.push(Material::untextured(format!("broken.{}", i)));
    }
    let mut mesh = Mesh::from_geometry(&device, "broken", geometry, materials).unwrap();
    mesh.truncate_materials(1);
    let mesh = Arc::new(mesh);
    let mut registry = ResourceRegistry::new();
    let mut batcher = InstanceBatcher::new();

    let result = batcher.submit(&mut registry, &mesh, Mat4::IDENTITY);

    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(batcher.is_empty());
    assert!(batcher.meshes().is_empty());
    assert_eq!(registry.material_count(), 0);
}

#[test]
fn test_empty_mesh_submits_nothing() {
    let device = create_device();
    let mesh = create_mesh(&device, "empty", &[]);
    let mut registry = ResourceRegistry::new();
    let mut batcher = InstanceBatcher::new();

    batcher.submit(&mut registry, &mesh, Mat4::IDENTITY).unwrap();

    assert!(batcher.is_empty());
    assert_eq!(registry.material_count(), 0);
}
