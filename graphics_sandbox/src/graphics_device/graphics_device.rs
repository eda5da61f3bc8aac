//! GraphicsDevice trait - main GPU resource factory interface

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, Texture, TextureDesc,
    BindingGroup, BindingGroupLayoutDesc, BindingResource,
    CommandList,
};

/// Main graphics device trait
///
/// Central factory for GPU resources, implemented by backend-specific
/// devices. Every call is synchronous and either succeeds or fails; there is
/// no retry or backpressure at this level.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer, uploading `desc.data` if present
    ///
    /// # Errors
    ///
    /// `Error::GpuResourceCreationFailure` if the backend refuses the allocation.
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a sampled texture, uploading `desc.data` if present
    ///
    /// # Errors
    ///
    /// `Error::GpuResourceCreationFailure` if the backend refuses the allocation.
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a binding group (descriptor set) from a layout and resources
    ///
    /// # Arguments
    ///
    /// * `layout` - Slot layout; texture arrays larger than the slot count are rejected
    /// * `set_index` - Set index the group will be bound at
    /// * `resources` - One resource per layout entry, in order
    fn create_binding_group(
        &mut self,
        layout: &BindingGroupLayoutDesc,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn BindingGroup>>;

    /// Create a new command list
    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>>;

    /// Submit recorded command lists for execution
    fn submit(&mut self, commands: &[&dyn CommandList]) -> Result<()>;
}
