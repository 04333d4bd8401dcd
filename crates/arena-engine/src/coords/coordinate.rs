use core::cmp::Ordering;

/// 2D point over a numeric type.
///
/// The derived ordering is lexicographic: `x` first, then `y`. For integer
/// coordinates that is a total order usable for sorting and deduplication;
/// for floating-point coordinates use [`Coordinate::total_cmp`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate<T> {
    pub x: T,
    pub y: T,
}

impl<T> Coordinate<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Coordinate<U> {
        Coordinate::new(f(self.x), f(self.y))
    }
}

impl Coordinate<f64> {
    /// Lexicographic total order over `f64` components (`f64::total_cmp`).
    #[inline]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match self.x.total_cmp(&other.x) {
            Ordering::Equal => self.y.total_cmp(&other.y),
            o => o,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Multiplies each component by the matching extent.
    ///
    /// Used to turn a normalized layer position into surface pixels.
    #[inline]
    pub fn scaled(self, width: f64, height: f64) -> Self {
        Self::new(self.x * width, self.y * height)
    }
}

impl<T> From<(T, T)> for Coordinate<T> {
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}
