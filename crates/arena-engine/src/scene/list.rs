use crate::coords::{PixelSize, Rect};
use crate::graphic::Brush;
use crate::render::RenderSurface;

use super::{DrawCmd, SortKey, SpriteCmd, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Acts as the render surface the scene paints onto: each `fill_rect` becomes
/// a [`SpriteCmd`] tagged with the current layer's z-index. A GPU renderer
/// then replays the items in paint order.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    size: PixelSize,
    items: Vec<DrawItem>,
    next_order: u32,
    current_z: ZIndex,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new(size: PixelSize) -> Self {
        Self { size, ..Self::default() }
    }

    /// Updates the surface size reported to painters. Recorded items are kept.
    #[inline]
    pub fn set_pixel_size(&mut self, size: PixelSize) {
        self.size = size;
    }

    /// Clears recorded items and resets the z-index. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.current_z = ZIndex::default();
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Z-index applied to subsequently pushed commands.
    #[inline]
    pub fn set_z(&mut self, z: ZIndex) {
        self.current_z = z;
    }

    /// Pushes a draw command at the current z-index.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(self.current_z, order),
            cmd,
        });
        self.sorted_dirty = true;
    }

    /// Iterates items in paint order (back-to-front) without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    /// Sprite commands in insertion order.
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteCmd> {
        self.items.iter().map(|item| match &item.cmd {
            DrawCmd::Sprite(s) => s,
        })
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // SortKey includes insertion order, so ties never occur.
        self.sorted_indices
            .sort_unstable_by_key(|&i| self.items[i].key);

        self.sorted_dirty = false;
    }
}

impl RenderSurface for DrawList {
    #[inline]
    fn pixel_size(&self) -> PixelSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        self.push(DrawCmd::Sprite(SpriteCmd {
            footprint: rect,
            brush: brush.clone(),
        }));
    }

    fn begin_layer(&mut self, index: usize) {
        self.set_z(ZIndex::from_layer(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphic::Bitmap;

    fn brush() -> Brush {
        Brush::new(Bitmap::solid(1, 1, [255; 4]).unwrap())
    }

    fn zs(list: &mut DrawList) -> Vec<(i32, u32)> {
        list.iter_in_paint_order()
            .map(|item| (item.key.z.0, item.key.order))
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_layer_then_insertion() {
        let mut list = DrawList::new(PixelSize::new(10, 10));
        let b = brush();

        list.begin_layer(1);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &b);
        list.begin_layer(0);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &b);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &b);

        assert_eq!(zs(&mut list), vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn clear_resets_order_and_z_but_keeps_size() {
        let mut list = DrawList::new(PixelSize::new(640, 480));
        list.begin_layer(3);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &brush());
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.pixel_size(), PixelSize::new(640, 480));

        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &brush());
        assert_eq!(zs(&mut list), vec![(0, 0)]);
    }
}
