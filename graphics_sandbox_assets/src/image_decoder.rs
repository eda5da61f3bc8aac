//! Image file decoding through the `image` crate

use std::path::Path;
use graphics_sandbox::sandbox::{Error, Result};
use graphics_sandbox::sandbox::import::{DecodedImage, ImageDecoder};

/// Decodes any format the `image` crate is built with, converted to RGBA8
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileDecoder;

impl ImageFileDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for ImageFileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage> {
        let image = image::open(path)
            .map_err(|e| Error::TextureDecodeFailure(format!("{}: {}", path.display(), e)))?
            .to_rgba8();

        Ok(DecodedImage {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        })
    }
}

#[cfg(test)]
#[path = "image_decoder_tests.rs"]
mod tests;
