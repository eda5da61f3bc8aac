/*!
# Graphics Sandbox

Scene import and bindless instance batching on top of a trait-based GPU
abstraction.

The crate turns hierarchical scene files into flat, GPU-resident meshes and
draws them every frame through a pair of deduplicated bindless tables. The
GPU layer, the scene parser and the image decoder are traits; backends and
file-format implementations plug in from outside (see the
`graphics_sandbox_assets` crate for glTF and image files).

## Architecture

- **import**: `SceneSource` → `Flattener` + `MaterialResolver` → `Mesh` (via `MeshLoader`)
- **resource**: `Texture`, `Material`, `Mesh` with opaque identities
- **render**: `ResourceRegistry` (bindless tables), `InstanceBatcher`,
  `FrameEmitter`, and the `Renderer` façade over the three
- **graphics_device**: `GraphicsDevice` factory trait and resource traits
*/

// Internal modules
pub mod error;
pub mod log;
pub mod config;
pub mod graphics_device;
pub mod resource;
pub mod import;
pub mod render;

// Main sandbox namespace module
pub mod sandbox {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{
        ImportConfig, RendererConfig, TransformPolicy, DEFAULT_BINDLESS_TEXTURE_CAPACITY,
    };

    // Frame façade
    pub use crate::render::Renderer;

    // Scene loading entry point
    pub use crate::import::MeshLoader;

    // Logging sub-module (types and logger control, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
    }

    // GPU abstraction layer
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Importer types
    pub mod import {
        pub use crate::import::*;
    }

    // Resource types
    pub mod resource {
        pub use crate::resource::*;
    }

    // Per-frame types
    pub mod render {
        pub use crate::render::*;
    }
}

// Re-export math library at crate root
pub use glam;
