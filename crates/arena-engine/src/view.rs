//! Camera zoom and pan applied after every sprite transform.

use crate::coords::{Affine2, Coordinate, PixelSize, Rect};
use crate::graphic::Brush;
use crate::render::RenderSurface;

pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 32.0;

/// Zoom and pan in normalized surface units.
///
/// A normalized point `p` is shown at `p * scale + offset`. The view is
/// independent of the surface size, so it survives resizes unchanged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    scale: Coordinate<f64>,
    offset: Coordinate<f64>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            scale: Coordinate::new(1.0, 1.0),
            offset: Coordinate::new(0.0, 0.0),
        }
    }
}

impl View {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplies the zoom by `(width_factor, height_factor)`, keeping the
    /// normalized screen point `center` fixed. Total zoom is clamped to
    /// `[MIN_ZOOM, MAX_ZOOM]` per axis.
    pub fn zoom(&mut self, width_factor: f64, height_factor: f64, center: Coordinate<f64>) {
        let valid = |f: f64| f.is_finite() && f > 0.0;
        if !valid(width_factor) || !valid(height_factor) || !center.is_finite() {
            log::warn!("ignoring zoom ({width_factor}, {height_factor}) about {center:?}");
            return;
        }

        let fx = clamp_zoom(self.scale.x * width_factor) / self.scale.x;
        let fy = clamp_zoom(self.scale.y * height_factor) / self.scale.y;

        self.scale = Coordinate::new(self.scale.x * fx, self.scale.y * fy);
        self.offset = Coordinate::new(
            (self.offset.x - center.x) * fx + center.x,
            (self.offset.y - center.y) * fy + center.y,
        );
    }

    /// Pans by a normalized shift (`1.0` = one full surface width/height).
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            log::warn!("ignoring translate ({dx}, {dy})");
            return;
        }
        self.offset = Coordinate::new(self.offset.x + dx, self.offset.y + dy);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn scale(&self) -> Coordinate<f64> {
        self.scale
    }

    #[inline]
    pub fn offset(&self) -> Coordinate<f64> {
        self.offset
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// The view as a surface-pixel transform for a surface of `size`.
    pub fn pixel_transform(&self, size: PixelSize) -> Affine2 {
        Affine2 {
            m11: self.scale.x as f32,
            m12: 0.0,
            m21: 0.0,
            m22: self.scale.y as f32,
            dx: (self.offset.x * size.width as f64) as f32,
            dy: (self.offset.y * size.height as f64) as f32,
        }
    }
}

fn clamp_zoom(z: f64) -> f64 {
    z.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Render surface adapter that applies a view transform to everything
/// painted through it.
pub struct ViewSurface<'a> {
    inner: &'a mut dyn RenderSurface,
    transform: Affine2,
}

impl<'a> ViewSurface<'a> {
    pub fn new(inner: &'a mut dyn RenderSurface, view: &View) -> Self {
        let transform = view.pixel_transform(inner.pixel_size());
        Self { inner, transform }
    }
}

impl RenderSurface for ViewSurface<'_> {
    #[inline]
    fn pixel_size(&self) -> PixelSize {
        self.inner.pixel_size()
    }

    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        let viewed = brush.with_transform(brush.transform() * self.transform);
        self.inner.fill_rect(rect.transformed_bounds(&self.transform), &viewed);
    }

    #[inline]
    fn begin_layer(&mut self, index: usize) {
        self.inner.begin_layer(index);
    }
}
