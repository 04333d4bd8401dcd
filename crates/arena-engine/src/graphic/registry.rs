use crate::coords::PixelSize;

use super::GraphicResource;

/// Index-addressed arena of graphic resources.
///
/// Indices are caller-assigned and stable. Inserting past the end pads the
/// gap with empty slots. The registry owns every resource it holds; replaced
/// or removed resources are handed back to the caller.
#[derive(Debug, Default)]
pub struct GraphicRegistry {
    slots: Vec<Option<GraphicResource>>,
}

impl GraphicRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `resource` at `index`, returning whatever occupied the slot.
    pub fn add(&mut self, resource: GraphicResource, index: usize) -> Option<GraphicResource> {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index].replace(resource)
    }

    /// Resource at `index`; `None` for padding or out-of-range indices.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&GraphicResource> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut GraphicResource> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Empties the slot at `index` without shifting later indices.
    pub fn remove(&mut self, index: usize) -> Option<GraphicResource> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Number of slots, populated or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Populated slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &GraphicResource)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (i, r)))
    }

    /// Rescales every populated slot after the surface went from `old` to `new`.
    ///
    /// Must run once per resize, after the surface is resized and before the
    /// next draw.
    pub fn rescale_all(&mut self, old: PixelSize, new: PixelSize) {
        let mut count = 0usize;
        for resource in self.slots.iter_mut().flatten() {
            resource.rescale(old, new);
            count += 1;
        }
        log::debug!(
            "rescaled {count} graphics {}x{} -> {}x{}",
            old.width, old.height, new.width, new.height
        );
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::graphic::Bitmap;

    fn graphic(fraction: f64) -> GraphicResource {
        let bitmap = Bitmap::solid(8, 8, [0, 255, 0, 255]).unwrap();
        GraphicResource::from_bitmap(bitmap, PixelSize::new(100, 100), fraction, fraction).unwrap()
    }

    #[test]
    fn sparse_insert_pads_with_empty_slots() {
        let mut reg = GraphicRegistry::new();
        assert!(reg.add(graphic(0.1), 3).is_none());

        assert_eq!(reg.len(), 4);
        for i in 0..3 {
            assert!(reg.get(i).is_none(), "slot {i} should be padding");
        }
        assert!(reg.get(3).is_some());
        assert!(reg.get(4).is_none());
    }

    #[test]
    fn add_in_bounds_replaces_and_returns_old() {
        let mut reg = GraphicRegistry::new();
        reg.add(graphic(0.1), 0);
        let old = reg.add(graphic(0.2), 0).unwrap();

        assert_eq!(reg.len(), 1);
        assert!(old.size().approx_eq(Vec2::new(10.0, 10.0), 1e-4));
        assert!(reg.get(0).unwrap().size().approx_eq(Vec2::new(20.0, 20.0), 1e-4));
    }

    #[test]
    fn filling_a_padding_slot_keeps_length() {
        let mut reg = GraphicRegistry::new();
        reg.add(graphic(0.1), 2);
        reg.add(graphic(0.1), 1);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.iter().map(|(i, _)| i).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn remove_leaves_a_hole() {
        let mut reg = GraphicRegistry::new();
        reg.add(graphic(0.1), 0);
        reg.add(graphic(0.1), 1);
        assert!(reg.remove(0).is_some());
        assert!(reg.remove(0).is_none());
        assert_eq!(reg.len(), 2);
        assert!(reg.contains(1));
    }

    #[test]
    fn rescale_all_skips_empty_slots() {
        let mut reg = GraphicRegistry::new();
        reg.add(graphic(0.1), 0);
        reg.add(graphic(0.5), 2);

        reg.rescale_all(PixelSize::new(100, 100), PixelSize::new(200, 400));

        assert!(reg.get(0).unwrap().size().approx_eq(Vec2::new(20.0, 40.0), 1e-3));
        assert!(reg.get(1).is_none());
        assert!(reg.get(2).unwrap().size().approx_eq(Vec2::new(100.0, 200.0), 1e-3));
    }
}
