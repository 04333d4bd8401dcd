//! Graphic resources.
//!
//! A graphic is a decoded bitmap wrapped as a brush with an intrinsic scale.
//! Graphics live in a [`GraphicRegistry`] and are referenced by index from
//! sprites, never by pointer, so swapping a registry slot is immediately
//! visible to every sprite using it.

mod bitmap;
mod brush;
mod error;
mod registry;
mod resource;

pub use bitmap::Bitmap;
pub use brush::{Brush, BrushId};
pub use error::{ResourceLoadError, ResourceLoadErrorKind};
pub use registry::GraphicRegistry;
pub use resource::GraphicResource;
