//! Graphics device module - the GPU abstraction layer the sandbox records into
//!
//! Backends (Vulkan, wgpu, ...) implement these traits; the importer and the
//! frame path only ever talk to `dyn GraphicsDevice`.

pub mod graphics_device;
pub mod buffer;
pub mod texture;
pub mod binding_group;
pub mod command_list;

pub use graphics_device::*;
pub use buffer::*;
pub use texture::*;
pub use binding_group::*;
pub use command_list::*;

use std::sync::{Arc, Mutex, MutexGuard};
use crate::error::{Error, Result};

/// Lock a shared device handle, mapping poisoning to `Error::BackendError`
pub(crate) fn lock_device(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| Error::BackendError("GraphicsDevice lock poisoned".to_string()))
}

// Mock graphics device (no GPU required)
#[cfg(any(test, feature = "mock"))]
pub mod mock_graphics_device;
