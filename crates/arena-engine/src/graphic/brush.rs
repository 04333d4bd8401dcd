use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::{Affine2, PixelSize};

use super::Bitmap;

/// Identity of the pixels behind a brush.
///
/// Clones of a brush share the id; renderers key their texture caches on it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BrushId(u64);

impl BrushId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A bitmap that can paint geometry, plus the transform mapping bitmap pixels
/// into surface pixels.
#[derive(Debug, Clone)]
pub struct Brush {
    id: BrushId,
    bitmap: Arc<Bitmap>,
    transform: Affine2,
}

impl Brush {
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            id: BrushId::next(),
            bitmap: Arc::new(bitmap),
            transform: Affine2::identity(),
        }
    }

    #[inline]
    pub fn id(&self) -> BrushId {
        self.id
    }

    #[inline]
    pub fn bitmap(&self) -> &Arc<Bitmap> {
        &self.bitmap
    }

    #[inline]
    pub fn pixel_size(&self) -> PixelSize {
        self.bitmap.pixel_size()
    }

    #[inline]
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    #[inline]
    pub fn set_transform(&mut self, transform: Affine2) {
        self.transform = transform;
    }

    /// Same pixels, different transform.
    #[inline]
    pub fn with_transform(&self, transform: Affine2) -> Self {
        Self { transform, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_brush_gets_a_fresh_id() {
        let a = Brush::new(Bitmap::solid(1, 1, [0; 4]).unwrap());
        let b = Brush::new(Bitmap::solid(1, 1, [0; 4]).unwrap());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn with_transform_keeps_identity_and_pixels() {
        let a = Brush::new(Bitmap::solid(4, 2, [255; 4]).unwrap());
        let b = a.with_transform(Affine2::translation(1.0, 2.0));
        assert_eq!(a.id(), b.id());
        assert!(Arc::ptr_eq(a.bitmap(), b.bitmap()));
        assert!(a.transform().is_identity());
        assert_eq!(b.transform(), Affine2::translation(1.0, 2.0));
    }
}
