//! CommandList trait - for recording rendering commands

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Buffer, BindingGroup, IndexType, ShaderStages};

/// Command list for recording rendering commands
///
/// Commands are recorded and later submitted via `GraphicsDevice::submit()`.
/// Render pass begin/end and presentation belong to the surface layer.
pub trait CommandList: Send + Sync {
    /// Begin recording commands
    fn begin(&mut self) -> Result<()>;

    /// End recording commands
    fn end(&mut self) -> Result<()>;

    /// Bind a binding group at the given set index
    fn bind_binding_group(&mut self, set_index: u32, binding_group: &Arc<dyn BindingGroup>) -> Result<()>;

    /// Push inline constant data
    ///
    /// # Arguments
    ///
    /// * `stages` - Shader stages that read the constants
    /// * `offset` - Offset in bytes into the push constant range
    /// * `data` - Bytes to push
    fn push_constants(&mut self, stages: ShaderStages, offset: u32, data: &[u8]) -> Result<()>;

    /// Bind a vertex buffer at binding 0
    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()>;

    /// Bind an index buffer
    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Result<()>;

    /// Draw indexed vertices
    ///
    /// # Arguments
    ///
    /// * `index_count` - Number of indices to draw
    /// * `first_index` - Index of the first index in the bound index buffer
    /// * `vertex_offset` - Value added to each index before fetching the vertex
    fn draw_indexed(&mut self, index_count: u32, first_index: u32, vertex_offset: i32) -> Result<()>;
}
