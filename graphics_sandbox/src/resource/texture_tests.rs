use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::import::mock_sources::MockImageDecoder;

// ============================================================================
// Helpers
// ============================================================================

/// 1x3 image, one distinct colour per row
fn three_row_image() -> DecodedImage {
    DecodedImage {
        width: 1,
        height: 3,
        pixels: vec![
            1, 1, 1, 255,
            2, 2, 2, 255,
            3, 3, 3, 255,
        ],
    }
}

// ============================================================================
// from_image
// ============================================================================

#[test]
fn test_from_image_uploads_pixels() {
    let (device, log) = MockGraphicsDevice::new().into_shared();

    let texture = Texture::from_image(&device, "albedo.png", three_row_image(), false).unwrap();

    assert_eq!(texture.width(), 1);
    assert_eq!(texture.height(), 3);
    assert_eq!(texture.path(), Path::new("albedo.png"));
    assert_eq!(texture.gpu_texture().info().format, TextureFormat::R8G8B8A8_SRGB);
    let records = log.textures();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label, "albedo.png");
    assert_eq!(records[0].data[0], 1);
}

#[test]
fn test_from_image_flips_rows() {
    let (device, log) = MockGraphicsDevice::new().into_shared();

    Texture::from_image(&device, "albedo.png", three_row_image(), true).unwrap();

    let data = &log.textures()[0].data;
    assert_eq!(&data[0..4], &[3, 3, 3, 255]);
    assert_eq!(&data[4..8], &[2, 2, 2, 255]);
    assert_eq!(&data[8..12], &[1, 1, 1, 255]);
}

#[test]
fn test_from_image_size_mismatch() {
    let (device, _log) = MockGraphicsDevice::new().into_shared();
    let image = DecodedImage { width: 2, height: 2, pixels: vec![0; 4] };

    let result = Texture::from_image(&device, "bad.png", image, false);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_from_image_gpu_failure() {
    let (device, _log) = MockGraphicsDevice::new().with_failing_textures().into_shared();

    let result = Texture::from_image(&device, "albedo.png", three_row_image(), false);
    assert!(matches!(result, Err(Error::GpuResourceCreationFailure(_))));
}

#[test]
fn test_textures_from_same_path_have_distinct_ids() {
    let (device, _log) = MockGraphicsDevice::new().into_shared();
    let a = Texture::from_image(&device, "same.png", three_row_image(), false).unwrap();
    let b = Texture::from_image(&device, "same.png", three_row_image(), false).unwrap();
    assert_ne!(a.id(), b.id());
}

// ============================================================================
// load
// ============================================================================

#[test]
fn test_load_through_decoder() {
    let (device, _log) = MockGraphicsDevice::new().into_shared();
    let decoder = MockImageDecoder::new().with_image("textures/wall.png", three_row_image());

    let texture = Texture::load(&device, &decoder, Path::new("textures/wall.png"), true).unwrap();

    assert_eq!(texture.height(), 3);
    assert_eq!(decoder.decode_count(), 1);
}

#[test]
fn test_load_decode_failure() {
    let (device, log) = MockGraphicsDevice::new().into_shared();
    let decoder = MockImageDecoder::new();

    let result = Texture::load(&device, &decoder, Path::new("missing.png"), true);

    assert!(matches!(result, Err(Error::TextureDecodeFailure(_))));
    assert!(log.textures().is_empty());
}
