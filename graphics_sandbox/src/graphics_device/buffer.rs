//! Buffer trait and buffer descriptor

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Vertex buffer
    Vertex,
    /// Index buffer
    Index,
    /// Uniform/constant buffer
    Uniform,
    /// Storage buffer
    Storage,
}

/// Index element type for indexed draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit unsigned indices
    U16,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Debug name
    pub label: String,
    /// Size in bytes (0 is valid and creates an empty buffer)
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
    /// Optional initial contents, uploaded at creation time.
    /// Must be exactly `size` bytes long when present.
    pub data: Option<Vec<u8>>,
}

impl BufferDesc {
    /// Descriptor for a buffer initialized from `data`, sized exactly to it
    pub fn with_data(label: impl Into<String>, usage: BufferUsage, data: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            size: data.len() as u64,
            usage,
            data: Some(data),
        }
    }
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types.
/// The buffer is destroyed when the last reference is dropped.
pub trait Buffer: Send + Sync {
    /// Debug name given at creation
    fn label(&self) -> &str;

    /// Size in bytes
    fn size(&self) -> u64;
}
