//! Texture trait, texture descriptor, and texture info

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
}

impl TextureFormat {
    /// Bytes per pixel
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::R8G8B8A8_SRGB | TextureFormat::R8G8B8A8_UNORM => 4,
        }
    }
}

/// Descriptor for creating a sampled 2D texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Debug name (usually the source file path)
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Pixel bytes to upload at creation time (`width * height * bpp` bytes)
    pub data: Option<Vec<u8>>,
}

/// Read-only properties of a created texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
}

/// Texture resource trait
///
/// Implemented by backend-specific texture types (image + sampled view).
/// The texture is destroyed when the last reference is dropped.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;
}
