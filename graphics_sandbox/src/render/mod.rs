//! Per-frame rendering
//!
//! `Renderer::submit` feeds the `InstanceBatcher`, which registers materials
//! in the `ResourceRegistry` (bindless tables); `Renderer::flush` hands both
//! to the `FrameEmitter`, which records one draw per instance.

pub mod registry;
pub mod render_instance;
pub mod batcher;
pub mod frame_emitter;
pub mod renderer;

pub use registry::{ResourceRegistry, MaterialRecord, NO_TEXTURE};
pub use render_instance::RenderInstance;
pub use batcher::InstanceBatcher;
pub use frame_emitter::{
    FrameEmitter, FrameStats, CameraData, DrawPushConstants,
    BINDLESS_SET_INDEX, TEXTURE_TABLE_BINDING, MATERIAL_TABLE_BINDING, CAMERA_BINDING,
};
pub use renderer::Renderer;
