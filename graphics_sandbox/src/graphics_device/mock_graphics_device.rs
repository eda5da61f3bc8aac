//! Mock graphics device (no GPU required)
//!
//! Records every created resource and every recorded command so the importer
//! and the frame path can be tested without a real backend. Binding group
//! creation enforces layout slot counts the way a descriptor layer would.

use std::sync::{Arc, Mutex, MutexGuard};
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Buffer, BufferDesc, BufferUsage, Texture, TextureDesc, TextureInfo,
    BindingGroup, BindingGroupLayoutDesc, BindingResource,
    CommandList, IndexType, ShaderStages,
};

// ============================================================================
// Recorded data
// ============================================================================

/// A command recorded by a MockCommandList
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    Begin,
    End,
    BindBindingGroup { set_index: u32 },
    PushConstants { stages: ShaderStages, offset: u32, data: Vec<u8> },
    BindVertexBuffer { buffer: String, offset: u64 },
    BindIndexBuffer { buffer: String, offset: u64, index_type: IndexType },
    DrawIndexed { index_count: u32, first_index: u32, vertex_offset: i32 },
}

/// A buffer created through the mock device
#[derive(Debug, Clone)]
pub struct MockBufferRecord {
    pub label: String,
    pub size: u64,
    pub usage: BufferUsage,
    pub data: Vec<u8>,
}

/// A texture created through the mock device
#[derive(Debug, Clone)]
pub struct MockTextureRecord {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// A binding group created through the mock device
#[derive(Debug, Clone)]
pub struct MockBindingGroupRecord {
    pub set_index: u32,
    /// Descriptors written per layout entry
    pub descriptor_counts: Vec<u32>,
}

#[derive(Debug, Default)]
struct MockDeviceState {
    buffers: Vec<MockBufferRecord>,
    textures: Vec<MockTextureRecord>,
    binding_groups: Vec<MockBindingGroupRecord>,
    commands: Vec<MockCommand>,
    submit_count: u32,
}

/// Shared view of everything the mock device has seen.
///
/// Cloned out of the device before it is moved behind `Arc<Mutex<dyn GraphicsDevice>>`.
#[derive(Debug, Clone, Default)]
pub struct MockDeviceLog {
    state: Arc<Mutex<MockDeviceState>>,
}

impl MockDeviceLog {
    fn lock(&self) -> MutexGuard<'_, MockDeviceState> {
        // A panicking test thread must not hide the log from the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All created buffers, in creation order
    pub fn buffers(&self) -> Vec<MockBufferRecord> {
        self.lock().buffers.clone()
    }

    /// Last created buffer with the given label
    pub fn buffer(&self, label: &str) -> Option<MockBufferRecord> {
        self.lock().buffers.iter().rev().find(|b| b.label == label).cloned()
    }

    /// All created textures, in creation order
    pub fn textures(&self) -> Vec<MockTextureRecord> {
        self.lock().textures.clone()
    }

    /// All created binding groups, in creation order
    pub fn binding_groups(&self) -> Vec<MockBindingGroupRecord> {
        self.lock().binding_groups.clone()
    }

    /// All recorded commands, across every command list
    pub fn commands(&self) -> Vec<MockCommand> {
        self.lock().commands.clone()
    }

    /// Recorded draw calls only
    pub fn draws(&self) -> Vec<MockCommand> {
        self.lock()
            .commands
            .iter()
            .filter(|c| matches!(c, MockCommand::DrawIndexed { .. }))
            .cloned()
            .collect()
    }

    /// Number of `submit` calls
    pub fn submit_count(&self) -> u32 {
        self.lock().submit_count
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        *self.lock() = MockDeviceState::default();
    }

    fn push_command(&self, command: MockCommand) {
        self.lock().commands.push(command);
    }
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    label: String,
    size: u64,
}

impl Buffer for MockBuffer {
    fn label(&self) -> &str {
        &self.label
    }

    fn size(&self) -> u64 {
        self.size
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub label: String,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock BindingGroup
// ============================================================================

#[derive(Debug)]
pub struct MockBindingGroup {
    pub set_index: u32,
}

impl BindingGroup for MockBindingGroup {
    fn set_index(&self) -> u32 {
        self.set_index
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Command list that appends every command to the device log
#[derive(Debug)]
pub struct MockCommandList {
    log: MockDeviceLog,
    fail_draws: bool,
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.log.push_command(MockCommand::Begin);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.log.push_command(MockCommand::End);
        Ok(())
    }

    fn bind_binding_group(&mut self, set_index: u32, _binding_group: &Arc<dyn BindingGroup>) -> Result<()> {
        self.log.push_command(MockCommand::BindBindingGroup { set_index });
        Ok(())
    }

    fn push_constants(&mut self, stages: ShaderStages, offset: u32, data: &[u8]) -> Result<()> {
        self.log.push_command(MockCommand::PushConstants {
            stages,
            offset,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()> {
        self.log.push_command(MockCommand::BindVertexBuffer {
            buffer: buffer.label().to_string(),
            offset,
        });
        Ok(())
    }

    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Result<()> {
        self.log.push_command(MockCommand::BindIndexBuffer {
            buffer: buffer.label().to_string(),
            offset,
            index_type,
        });
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, vertex_offset: i32) -> Result<()> {
        if self.fail_draws {
            return Err(Error::BackendError("draw_indexed rejected by mock device".to_string()));
        }
        self.log.push_command(MockCommand::DrawIndexed {
            index_count,
            first_index,
            vertex_offset,
        });
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock device that tracks created resources and recorded commands without a GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    log: MockDeviceLog,
    fail_buffers: bool,
    fail_textures: bool,
    fail_draws: bool,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// Every buffer creation fails with `GpuResourceCreationFailure`
    pub fn with_failing_buffers(mut self) -> Self {
        self.fail_buffers = true;
        self
    }

    /// Every texture creation fails with `GpuResourceCreationFailure`
    pub fn with_failing_textures(mut self) -> Self {
        self.fail_textures = true;
        self
    }

    /// Every `draw_indexed` fails with `BackendError`
    pub fn with_failing_draws(mut self) -> Self {
        self.fail_draws = true;
        self
    }

    /// Shared handle on the recorded data
    pub fn log(&self) -> MockDeviceLog {
        self.log.clone()
    }

    /// Wrap into the shared handle the rest of the sandbox expects
    pub fn into_shared(self) -> (Arc<Mutex<dyn GraphicsDevice>>, MockDeviceLog) {
        let log = self.log();
        let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(self));
        (device, log)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if self.fail_buffers {
            return Err(Error::GpuResourceCreationFailure(format!(
                "buffer '{}' ({} bytes) refused by mock device",
                desc.label, desc.size
            )));
        }
        let data = match desc.data {
            Some(data) => {
                if data.len() as u64 != desc.size {
                    return Err(Error::InvalidResource(format!(
                        "buffer '{}': {} bytes of data for a {} byte buffer",
                        desc.label,
                        data.len(),
                        desc.size
                    )));
                }
                data
            }
            None => vec![0u8; desc.size as usize],
        };
        self.log.lock().buffers.push(MockBufferRecord {
            label: desc.label.clone(),
            size: desc.size,
            usage: desc.usage,
            data,
        });
        Ok(Arc::new(MockBuffer { label: desc.label, size: desc.size }))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.fail_textures {
            return Err(Error::GpuResourceCreationFailure(format!(
                "texture '{}' ({}x{}) refused by mock device",
                desc.label, desc.width, desc.height
            )));
        }
        let data = desc.data.unwrap_or_default();
        self.log.lock().textures.push(MockTextureRecord {
            label: desc.label.clone(),
            width: desc.width,
            height: desc.height,
            data,
        });
        Ok(Arc::new(MockTexture {
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
            },
            label: desc.label,
        }))
    }

    fn create_binding_group(
        &mut self,
        layout: &BindingGroupLayoutDesc,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn BindingGroup>> {
        if layout.entries.len() != resources.len() {
            return Err(Error::InvalidResource(format!(
                "binding group set {}: layout has {} entries, got {} resources",
                set_index,
                layout.entries.len(),
                resources.len()
            )));
        }

        let mut descriptor_counts = Vec::with_capacity(resources.len());
        for (entry, resource) in layout.entries.iter().zip(resources) {
            if entry.binding_type != resource.binding_type() {
                return Err(Error::InvalidResource(format!(
                    "binding {}: expected {:?}, got {:?}",
                    entry.binding,
                    entry.binding_type,
                    resource.binding_type()
                )));
            }
            let count = resource.descriptor_count();
            if count > entry.count {
                return Err(Error::GpuResourceCreationFailure(format!(
                    "binding {}: {} descriptors exceed the slot capacity of {}",
                    entry.binding, count, entry.count
                )));
            }
            descriptor_counts.push(count);
        }

        self.log.lock().binding_groups.push(MockBindingGroupRecord {
            set_index,
            descriptor_counts,
        });
        Ok(Arc::new(MockBindingGroup { set_index }))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList {
            log: self.log.clone(),
            fail_draws: self.fail_draws,
        }))
    }

    fn submit(&mut self, _commands: &[&dyn CommandList]) -> Result<()> {
        self.log.lock().submit_count += 1;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
