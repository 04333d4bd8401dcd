use std::path::Path;

use crate::coords::{Affine2, PixelSize, Rect, Vec2};
use crate::render::RenderSurface;

use super::error::{ResourceLoadError, ResourceLoadErrorKind};
use super::{Bitmap, Brush};

/// A decoded image wrapped as a brush, plus its intrinsic scale.
///
/// The scale transform maps the bitmap's native pixels onto a `w x h` box
/// centered on the local origin. `bounds` holds that box before centering,
/// i.e. `[0, 0] - [w, h]`.
///
/// The footprint's fraction of the surface is remembered, so a resource
/// created against a zero-sized surface takes its size on the first resize.
#[derive(Debug, Clone)]
pub struct GraphicResource {
    brush: Brush,
    scale: Affine2,
    bounds: Rect,
    fraction: (f64, f64),
}

impl GraphicResource {
    /// Decodes `path` and sizes it to `width_fraction x height_fraction` of `surface`.
    pub fn create(
        path: impl AsRef<Path>,
        surface: PixelSize,
        width_fraction: f64,
        height_fraction: f64,
    ) -> Result<Self, ResourceLoadError> {
        let path = path.as_ref();
        check_fractions(&path.display().to_string(), width_fraction, height_fraction)?;
        let bitmap = Bitmap::open(path)?;
        Self::from_bitmap(bitmap, surface, width_fraction, height_fraction)
    }

    /// Same as [`create`](Self::create) for pixels that are already decoded.
    pub fn from_bitmap(
        bitmap: Bitmap,
        surface: PixelSize,
        width_fraction: f64,
        height_fraction: f64,
    ) -> Result<Self, ResourceLoadError> {
        check_fractions("bitmap", width_fraction, height_fraction)?;

        let mut resource = Self {
            brush: Brush::new(bitmap),
            scale: Affine2::identity(),
            bounds: Rect::default(),
            fraction: (width_fraction, height_fraction),
        };
        resource.scale_to_size(
            (width_fraction * surface.width as f64) as f32,
            (height_fraction * surface.height as f64) as f32,
        );
        Ok(resource)
    }

    /// Recomputes the scale so the bitmap exactly fills a `width x height` box
    /// centered on the local origin. Each axis scales independently.
    pub fn scale_to_size(&mut self, width: f32, height: f32) {
        self.brush.set_transform(Affine2::identity());
        let native = self.brush.pixel_size().as_vec2();

        self.scale = Affine2::scale(width / native.x, height / native.y)
            * Affine2::translation(-width / 2.0, -height / 2.0);
        self.bounds = Rect::new(0.0, 0.0, width, height);
    }

    /// Paints the resource centered on `(x, y)` surface pixels, rotated by
    /// `rotation` radians about its own center.
    pub fn draw(&self, x: f32, y: f32, rotation: f32, surface: &mut dyn RenderSurface) {
        let transform =
            self.scale * Affine2::rotation(rotation) * Affine2::translation(x, y);
        let footprint = Rect::from_center_size(Vec2::new(x, y), self.bounds.size);

        surface.fill_rect(footprint, &self.brush.with_transform(transform));
    }

    /// Keeps the resource's fractional footprint when the surface changes from
    /// `old` to `new`. Nothing is decoded again.
    ///
    /// When `old` is zero-sized the fraction the resource was created with
    /// is used instead.
    pub fn rescale(&mut self, old: PixelSize, new: PixelSize) {
        if !new.is_valid() {
            log::debug!("skipping rescale {old:?} -> {new:?}: zero-sized surface");
            return;
        }

        if old.is_valid() {
            self.fraction = (
                self.bounds.width() as f64 / old.width as f64,
                self.bounds.height() as f64 / old.height as f64,
            );
        }

        let (fx, fy) = self.fraction;
        self.scale_to_size(
            (fx * new.width as f64) as f32,
            (fy * new.height as f64) as f32,
        );
    }

    /// Unscaled box `[0, 0] - [w, h]`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.bounds.size
    }

    #[inline]
    pub fn scale_transform(&self) -> Affine2 {
        self.scale
    }

    #[inline]
    pub fn brush(&self) -> &Brush {
        &self.brush
    }
}

fn check_fractions(name: &str, width: f64, height: f64) -> Result<(), ResourceLoadError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(ResourceLoadError::new(
            name,
            ResourceLoadErrorKind::InvalidFraction { width, height },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawList;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-3;

    fn square_64(surface: PixelSize, fx: f64, fy: f64) -> GraphicResource {
        let bitmap = Bitmap::solid(64, 64, [200, 40, 40, 255]).unwrap();
        GraphicResource::from_bitmap(bitmap, surface, fx, fy).unwrap()
    }

    // ── scale_to_size ─────────────────────────────────────────────────────

    #[test]
    fn initial_size_is_fraction_of_surface() {
        let g = square_64(PixelSize::new(800, 600), 0.1, 0.1);
        assert!(g.size().approx_eq(Vec2::new(80.0, 60.0), EPS));
        assert_eq!(g.bounds().origin, Vec2::zero());
    }

    #[test]
    fn scale_to_size_is_idempotent() {
        let mut g = square_64(PixelSize::new(800, 600), 0.1, 0.1);
        g.scale_to_size(120.0, 45.0);
        let (t1, b1) = (g.scale_transform(), g.bounds());
        g.scale_to_size(120.0, 45.0);
        assert_eq!(g.scale_transform(), t1);
        assert_eq!(g.bounds(), b1);
    }

    #[test]
    fn scale_maps_bitmap_onto_centered_box() {
        let mut g = square_64(PixelSize::new(800, 600), 0.1, 0.1);
        g.scale_to_size(128.0, 32.0);
        let t = g.scale_transform();
        assert!(t.transform_point(Vec2::new(0.0, 0.0)).approx_eq(Vec2::new(-64.0, -16.0), EPS));
        assert!(t.transform_point(Vec2::new(64.0, 64.0)).approx_eq(Vec2::new(64.0, 16.0), EPS));
        assert!(t.transform_point(Vec2::new(32.0, 32.0)).approx_eq(Vec2::zero(), EPS));
    }

    #[test]
    fn invalid_fractions_are_rejected() {
        let bitmap = Bitmap::solid(2, 2, [0; 4]).unwrap();
        let err = GraphicResource::from_bitmap(bitmap, PixelSize::new(10, 10), 0.0, f64::NAN)
            .unwrap_err();
        assert!(matches!(err.kind, ResourceLoadErrorKind::InvalidFraction { .. }));
    }

    #[test]
    fn create_fails_for_missing_file() {
        let err = GraphicResource::create("/no/such/sprite.png", PixelSize::new(10, 10), 0.5, 0.5)
            .unwrap_err();
        assert!(matches!(err.kind, ResourceLoadErrorKind::Io(_)));
    }

    // ── rescale ───────────────────────────────────────────────────────────

    #[test]
    fn rescale_preserves_fractional_footprint() {
        let mut g = square_64(PixelSize::new(800, 600), 0.1, 0.1);
        g.rescale(PixelSize::new(800, 600), PixelSize::new(1600, 1200));
        assert!(g.size().approx_eq(Vec2::new(160.0, 120.0), EPS));

        g.rescale(PixelSize::new(1600, 1200), PixelSize::new(1000, 300));
        assert!(g.size().approx_eq(Vec2::new(100.0, 30.0), EPS));
    }

    #[test]
    fn graphic_created_on_zero_surface_sizes_on_first_resize() {
        let mut g = square_64(PixelSize::new(0, 0), 0.1, 0.1);
        assert!(g.size().approx_eq(Vec2::zero(), EPS));

        g.rescale(PixelSize::new(0, 0), PixelSize::new(800, 600));
        assert!(g.size().approx_eq(Vec2::new(80.0, 60.0), EPS));
    }

    #[test]
    fn rescale_against_zero_surface_is_ignored() {
        let mut g = square_64(PixelSize::new(800, 600), 0.1, 0.1);
        g.rescale(PixelSize::new(800, 600), PixelSize::new(0, 0));
        assert!(g.size().approx_eq(Vec2::new(80.0, 60.0), EPS));
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_fills_footprint_centered_on_position() {
        let g = square_64(PixelSize::new(800, 600), 0.1, 0.1);
        let mut list = DrawList::new(PixelSize::new(800, 600));
        g.draw(400.0, 300.0, 0.0, &mut list);

        let cmd = list.sprites().next().unwrap();
        assert!(cmd.footprint.approx_eq(Rect::new(360.0, 270.0, 80.0, 60.0), EPS));
        assert!(cmd.world_bounds().approx_eq(cmd.footprint, EPS));
    }

    #[test]
    fn rotation_is_about_sprite_center() {
        let mut g = square_64(PixelSize::new(800, 600), 0.1, 0.1);
        g.scale_to_size(80.0, 40.0);

        let mut list = DrawList::new(PixelSize::new(800, 600));
        g.draw(400.0, 300.0, FRAC_PI_2, &mut list);

        let bounds = list.sprites().next().unwrap().world_bounds();
        assert!(bounds.center().approx_eq(Vec2::new(400.0, 300.0), EPS));
        assert!(bounds.size.approx_eq(Vec2::new(40.0, 80.0), EPS));
    }

    #[test]
    fn draw_leaves_resource_transform_untouched() {
        let g = square_64(PixelSize::new(800, 600), 0.1, 0.1);
        let before = g.scale_transform();
        let mut list = DrawList::new(PixelSize::new(800, 600));
        g.draw(10.0, 10.0, 1.0, &mut list);
        assert_eq!(g.scale_transform(), before);
        assert!(g.brush().transform().is_identity());
    }
}
