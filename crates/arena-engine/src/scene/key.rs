/// Z-ordering key for draw items.
///
/// Higher values appear on top of lower values. Scene layer `n` records its
/// sprites at `ZIndex(n)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    #[inline]
    pub fn from_layer(index: usize) -> Self {
        Self(i32::try_from(index).unwrap_or(i32::MAX))
    }
}

/// Stable sort key for draw items.
///
/// Field order defines the derived ordering: `z` ascending (back-to-front),
/// then `order` ascending (insertion order within a z-layer).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_insertion_order() {
        let back_late = SortKey::new(ZIndex(0), 10);
        let front_early = SortKey::new(ZIndex(1), 0);
        assert!(back_late < front_early);
    }

    #[test]
    fn insertion_order_breaks_ties() {
        assert!(SortKey::new(ZIndex(2), 3) < SortKey::new(ZIndex(2), 4));
    }
}
