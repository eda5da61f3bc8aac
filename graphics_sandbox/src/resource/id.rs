//! Opaque resource identities
//!
//! Every texture, material and mesh gets a process-unique id at creation
//! time. The bindless tables and the per-frame mesh table are keyed by these
//! ids, so two resources with identical contents are still distinct entries.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $counter:ident, $prefix:literal) => {
        static $counter: AtomicU64 = AtomicU64::new(1);

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Allocate a fresh id, never returned before in this process
            pub fn next() -> Self {
                Self($counter.fetch_add(1, Ordering::Relaxed))
            }

            /// Raw value (for logs and debugging)
            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

resource_id!(
    /// Identity of a `resource::Texture`
    TextureId, NEXT_TEXTURE_ID, "Texture"
);

resource_id!(
    /// Identity of a `resource::Material`
    MaterialId, NEXT_MATERIAL_ID, "Material"
);

resource_id!(
    /// Identity of a `resource::Mesh`
    MeshId, NEXT_MESH_ID, "Mesh"
);

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
