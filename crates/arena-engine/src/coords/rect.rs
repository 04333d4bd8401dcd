use super::{Affine2, Vec2};

/// Axis-aligned rectangle in surface pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` whose center sits on `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size * 0.5, size)
    }

    /// Smallest rectangle containing every point, or `None` for an empty input.
    pub fn bounding(points: impl IntoIterator<Item = Vec2>) -> Option<Rect> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (lo, hi) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Rect::from_origin_size(lo, hi - lo))
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        let (lo, hi) = (self.min(), self.max());
        [lo, Vec2::new(hi.x, lo.y), hi, Vec2::new(lo.x, hi.y)]
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Axis-aligned bounds of this rectangle after applying `transform`.
    pub fn transformed_bounds(self, transform: &Affine2) -> Rect {
        let corners = self.corners().map(|c| transform.transform_point(c));
        // Four corners, never empty.
        Rect::bounding(corners).unwrap_or(self)
    }

    #[inline]
    pub fn approx_eq(self, other: Rect, eps: f32) -> bool {
        self.origin.approx_eq(other.origin, eps) && self.size.approx_eq(other.size, eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_center_size_is_centered() {
        let rect = Rect::from_center_size(Vec2::new(400.0, 300.0), Vec2::new(80.0, 60.0));
        assert_eq!(rect, r(360.0, 270.0, 80.0, 60.0));
        assert_eq!(rect.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn bounding_of_points() {
        let b = Rect::bounding([
            Vec2::new(3.0, -1.0),
            Vec2::new(-2.0, 4.0),
            Vec2::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(b, r(-2.0, -1.0, 5.0, 5.0));
    }

    #[test]
    fn bounding_of_nothing_is_none() {
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn transformed_bounds_under_translation() {
        let t = Affine2::translation(10.0, 20.0);
        assert_eq!(r(0.0, 0.0, 4.0, 2.0).transformed_bounds(&t), r(10.0, 20.0, 4.0, 2.0));
    }

    #[test]
    fn transformed_bounds_under_quarter_turn_swaps_extent() {
        let t = Affine2::rotation(std::f32::consts::FRAC_PI_2);
        let b = r(0.0, 0.0, 4.0, 2.0).transformed_bounds(&t);
        assert!(b.size.approx_eq(Vec2::new(2.0, 4.0), 1e-5));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
    }

    #[test]
    fn is_empty_positive_size() {
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
