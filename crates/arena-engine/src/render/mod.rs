//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers, textures).
//!
//! Convention:
//! - CPU geometry is in physical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod common;
mod ctx;
mod sprites;
mod surface;

pub use ctx::{RenderCtx, RenderTarget};
pub use sprites::SpriteRenderer;
pub use surface::RenderSurface;
