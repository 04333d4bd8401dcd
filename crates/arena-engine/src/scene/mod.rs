//! Sprite scene: layers of placed graphics plus the recorded draw stream.
//!
//! Responsibilities:
//! - own sprite placements per layer, keyed by caller-assigned ids
//! - paint layers bottom to top onto any `RenderSurface`
//! - record renderer-agnostic draw commands with deterministic ordering
//!   (layer z-index + insertion order)

mod cmd;
mod error;
mod key;
mod layer;
mod list;
mod placement;
mod stack;

pub use cmd::{DrawCmd, SpriteCmd};
pub use error::SceneError;
pub use key::{SortKey, ZIndex};
pub use layer::SpriteLayer;
pub use list::{DrawItem, DrawList};
pub use placement::{SpriteId, SpritePlacement};
pub use stack::Scene;
