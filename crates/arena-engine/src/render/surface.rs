use crate::coords::{PixelSize, Rect};
use crate::graphic::Brush;

/// Something sprites can be painted onto.
///
/// The scene only needs the current pixel size (to place normalized
/// positions) and a fill primitive. `scene::DrawList` implements this by
/// recording commands for a GPU renderer; tests use it to inspect output.
pub trait RenderSurface {
    /// Current drawable size in physical pixels.
    fn pixel_size(&self) -> PixelSize;

    /// Fills `rect` with `brush`.
    ///
    /// `rect` is the unrotated footprint in surface pixels. The brush
    /// transform maps bitmap pixels to surface pixels and already includes
    /// scale, rotation and placement.
    fn fill_rect(&mut self, rect: Rect, brush: &Brush);

    /// Called before the sprites of layer `index` are painted.
    fn begin_layer(&mut self, index: usize) {
        let _ = index;
    }
}
