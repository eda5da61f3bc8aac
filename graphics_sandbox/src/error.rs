//! Error types for the graphics sandbox
//!
//! One variant per failure kind the importer and the frame path can report.
//! Asset-level failures (`SceneParseFailure`, `UnsupportedTopology`,
//! `IndexOverflow`) abort a single mesh load; `TextureDecodeFailure` is
//! normally swallowed by the material resolver and only surfaces from the
//! decoder itself; `GpuResourceCreationFailure` is never retried.

use std::fmt;

/// Result type for sandbox operations
pub type Result<T> = std::result::Result<T, Error>;

/// Sandbox errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The scene file could not be read or parsed
    SceneParseFailure(String),

    /// A face with a vertex count other than 3 was found
    UnsupportedTopology {
        /// Source mesh name
        mesh: String,
        /// Face index inside that mesh
        face: usize,
        /// Number of vertices the face references
        vertex_count: usize,
    },

    /// A flattened index does not fit in 16 bits
    IndexOverflow {
        /// Source mesh name
        mesh: String,
        /// Vertex offset of the submesh plus the local index
        index: u64,
    },

    /// An image could not be decoded
    TextureDecodeFailure(String),

    /// The GPU layer refused to create a buffer, image or binding group
    GpuResourceCreationFailure(String),

    /// Invalid resource or argument (out-of-range index, bad descriptor...)
    InvalidResource(String),

    /// GPU layer failure outside of resource creation (command recording, submit)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SceneParseFailure(msg) => write!(f, "Scene parse failure: {}", msg),
            Error::UnsupportedTopology { mesh, face, vertex_count } => write!(
                f,
                "Unsupported topology: face {} of mesh '{}' has {} vertices (only triangles are supported)",
                face, mesh, vertex_count
            ),
            Error::IndexOverflow { mesh, index } => write!(
                f,
                "Index overflow: index {} in mesh '{}' exceeds the 16-bit index range",
                index, mesh
            ),
            Error::TextureDecodeFailure(msg) => write!(f, "Texture decode failure: {}", msg),
            Error::GpuResourceCreationFailure(msg) => {
                write!(f, "GPU resource creation failure: {}", msg)
            }
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::InvalidResource`
///
/// # Example
///
/// ```ignore
/// let submesh = submeshes.get(i)
///     .ok_or_else(|| engine_err!("sandbox::Mesh", "SubMesh index {} out of range", i))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::error::Error::InvalidResource(message)
    }};
}

/// Log an ERROR (with file:line) and return an `Error::InvalidResource`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
