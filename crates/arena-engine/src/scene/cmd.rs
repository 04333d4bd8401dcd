use crate::coords::{Affine2, Rect, Vec2};
use crate::graphic::Brush;

/// Renderer-agnostic draw command stream.
///
/// Extending the stream:
/// - add a new variant here
/// - record it from a `RenderSurface` method on `DrawList`
/// - teach the matching renderer under `render::*` to consume it
#[derive(Debug, Clone)]
pub enum DrawCmd {
    Sprite(SpriteCmd),
}

/// One filled rectangle painted with a bitmap brush.
#[derive(Debug, Clone)]
pub struct SpriteCmd {
    /// Unrotated footprint in surface pixels, centered on the sprite position.
    pub footprint: Rect,
    /// Brush whose transform maps bitmap pixels to surface pixels.
    pub brush: Brush,
}

impl SpriteCmd {
    #[inline]
    pub fn transform(&self) -> Affine2 {
        self.brush.transform()
    }

    /// Surface position of the bitmap's center.
    pub fn center(&self) -> Vec2 {
        let native = self.brush.pixel_size().as_vec2();
        self.transform().transform_point(native * 0.5)
    }

    /// Axis-aligned bounds of the painted (possibly rotated) bitmap.
    pub fn world_bounds(&self) -> Rect {
        let native = self.brush.pixel_size().as_vec2();
        Rect::from_origin_size(Vec2::zero(), native).transformed_bounds(&self.transform())
    }
}
