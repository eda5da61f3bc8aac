//! Resource-level texture
//!
//! Wraps a GPU texture created from decoded pixels together with the path it
//! was loaded from and its identity. Identity is what the bindless texture
//! table deduplicates on; two textures loaded from the same path are two
//! entries.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use crate::error::{Error, Result};
use crate::engine_debug;
use crate::graphics_device::{self, GraphicsDevice, TextureDesc, TextureFormat};
use crate::import::{DecodedImage, ImageDecoder};
use crate::resource::TextureId;

/// A sampled 2D texture resident on the GPU
pub struct Texture {
    id: TextureId,
    path: PathBuf,
    gpu_texture: Arc<dyn graphics_device::Texture>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Upload decoded pixels as a new texture
    ///
    /// # Arguments
    ///
    /// * `graphics_device` - Device the texture is created on
    /// * `path` - Path the pixels came from (debug label and identity hint)
    /// * `image` - RGBA8 pixels
    /// * `flip_vertically` - Reverse row order before upload
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the pixel buffer does not match the
    /// dimensions, `Error::GpuResourceCreationFailure` from the device.
    pub fn from_image(
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        path: impl Into<PathBuf>,
        image: DecodedImage,
        flip_vertically: bool,
    ) -> Result<Self> {
        let path = path.into();
        let DecodedImage { width, height, mut pixels } = image;

        let row_bytes = width as usize * TextureFormat::R8G8B8A8_SRGB.bytes_per_pixel() as usize;
        let expected = row_bytes * height as usize;
        if pixels.len() != expected {
            return Err(Error::InvalidResource(format!(
                "Texture '{}': {} bytes of pixels for {}x{} RGBA8 (expected {})",
                path.display(),
                pixels.len(),
                width,
                height,
                expected
            )));
        }

        if flip_vertically {
            flip_rows(&mut pixels, row_bytes);
        }

        let gpu_texture = graphics_device::lock_device(graphics_device)?.create_texture(TextureDesc {
            label: path.display().to_string(),
            width,
            height,
            format: TextureFormat::R8G8B8A8_SRGB,
            data: Some(pixels),
        })?;

        let id = TextureId::next();
        engine_debug!("sandbox::Texture", "Created {} '{}' ({}x{})", id, path.display(), width, height);

        Ok(Self {
            id,
            path,
            gpu_texture,
            width,
            height,
        })
    }

    /// Decode an image file and upload it
    ///
    /// # Errors
    ///
    /// `Error::TextureDecodeFailure` from the decoder, otherwise as `from_image`.
    pub fn load(
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        decoder: &dyn ImageDecoder,
        path: &Path,
        flip_vertically: bool,
    ) -> Result<Self> {
        let image = decoder.decode(path)?;
        Self::from_image(graphics_device, path, image, flip_vertically)
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying GPU texture
    pub fn gpu_texture(&self) -> &Arc<dyn graphics_device::Texture> {
        &self.gpu_texture
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn flip_rows(pixels: &mut [u8], row_bytes: usize) {
    if row_bytes == 0 {
        return;
    }
    let rows = pixels.len() / row_bytes;
    for top in 0..rows / 2 {
        let bottom = rows - 1 - top;
        let (head, tail) = pixels.split_at_mut(bottom * row_bytes);
        head[top * row_bytes..(top + 1) * row_bytes].swap_with_slice(&mut tail[..row_bytes]);
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
