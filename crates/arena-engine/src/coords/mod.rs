//! Coordinate and geometry types shared by the scene model and the renderers.
//!
//! Two spaces are in play:
//! - layer space: normalized `[0, 1]` sprite positions (`Coordinate<f64>`),
//!   resolution independent
//! - surface space: physical pixels, origin top-left, +X right, +Y down
//!
//! Layers convert from the first to the second at draw time using the current
//! surface size. Renderers convert surface pixels to NDC in shaders.

mod affine;
mod coordinate;
mod rect;
mod size;
mod vec2;

pub use affine::Affine2;
pub use coordinate::Coordinate;
pub use rect::Rect;
pub use size::PixelSize;
pub use vec2::Vec2;
