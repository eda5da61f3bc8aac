//! In-memory scene source and image decoder (no files required)

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::import::{DecodedImage, ImageDecoder, SceneSource, SourceScene};

// ============================================================================
// Mock SceneSource
// ============================================================================

/// Scene source serving pre-built scenes by path
#[derive(Default)]
pub struct MockSceneSource {
    scenes: FxHashMap<PathBuf, SourceScene>,
    requested: Mutex<Vec<PathBuf>>,
}

impl MockSceneSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene returned for `path`
    pub fn with_scene(mut self, path: impl Into<PathBuf>, scene: SourceScene) -> Self {
        self.scenes.insert(path.into(), scene);
        self
    }

    /// Paths passed to `parse`, in call order
    pub fn requested(&self) -> Vec<PathBuf> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl SceneSource for MockSceneSource {
    fn parse(&self, path: &Path) -> Result<SourceScene> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(path.to_path_buf());
        }
        self.scenes
            .get(path)
            .cloned()
            .ok_or_else(|| Error::SceneParseFailure(format!("{}: no such scene", path.display())))
    }
}

// ============================================================================
// Mock ImageDecoder
// ============================================================================

/// Image decoder serving pre-built images by path; unknown paths fail to decode
#[derive(Default)]
pub struct MockImageDecoder {
    images: FxHashMap<PathBuf, DecodedImage>,
    decoded: Mutex<Vec<PathBuf>>,
}

impl MockImageDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image returned for `path`
    pub fn with_image(mut self, path: impl Into<PathBuf>, image: DecodedImage) -> Self {
        self.images.insert(path.into(), image);
        self
    }

    /// Register a 1x1 opaque image of the given colour
    pub fn with_solid(self, path: impl Into<PathBuf>, rgba: [u8; 4]) -> Self {
        self.with_image(path, DecodedImage { width: 1, height: 1, pixels: rgba.to_vec() })
    }

    /// Paths passed to `decode`, in call order (failures included)
    pub fn decoded_paths(&self) -> Vec<PathBuf> {
        self.decoded.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Number of `decode` calls
    pub fn decode_count(&self) -> usize {
        self.decoded_paths().len()
    }
}

impl ImageDecoder for MockImageDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage> {
        if let Ok(mut decoded) = self.decoded.lock() {
            decoded.push(path.to_path_buf());
        }
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| Error::TextureDecodeFailure(format!("{}: cannot decode", path.display())))
    }
}
