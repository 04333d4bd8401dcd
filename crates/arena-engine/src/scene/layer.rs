use std::collections::HashMap;

use crate::coords::Coordinate;
use crate::graphic::GraphicRegistry;
use crate::render::RenderSurface;

use super::{SceneError, SpriteId, SpritePlacement};

/// Sprites sharing one draw pass.
///
/// Paint order among the sprites of a layer is unspecified. The registry is
/// not stored here; it is passed to [`draw`](Self::draw) by the owner.
#[derive(Debug, Default, Clone)]
pub struct SpriteLayer {
    sprites: HashMap<SpriteId, SpritePlacement>,
}

impl SpriteLayer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places sprite `id` at rotation 0, overwriting any existing placement.
    ///
    /// Returns the placement that was replaced.
    pub fn add_sprite(
        &mut self,
        id: SpriteId,
        graphic: usize,
        position: Coordinate<f64>,
    ) -> Option<SpritePlacement> {
        self.sprites.insert(id, SpritePlacement::new(graphic, position))
    }

    pub fn move_sprite(&mut self, id: SpriteId, position: Coordinate<f64>) -> Result<(), SceneError> {
        self.placement_mut(id)?.position = position;
        Ok(())
    }

    pub fn rotate_sprite(&mut self, id: SpriteId, rotation: f64) -> Result<(), SceneError> {
        self.placement_mut(id)?.rotation = rotation;
        Ok(())
    }

    pub fn change_graphic(&mut self, id: SpriteId, graphic: usize) -> Result<(), SceneError> {
        self.placement_mut(id)?.graphic = graphic;
        Ok(())
    }

    /// Removes sprite `id`. Removing an absent id is a no-op.
    pub fn remove_sprite(&mut self, id: SpriteId) -> Option<SpritePlacement> {
        self.sprites.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: SpriteId) -> Option<&SpritePlacement> {
        self.sprites.get(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &SpritePlacement)> {
        self.sprites.iter().map(|(id, p)| (*id, p))
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Paints every sprite, mapping normalized positions onto the surface's
    /// current pixel size.
    pub fn draw(&self, registry: &GraphicRegistry, surface: &mut dyn RenderSurface) {
        let size = surface.pixel_size();
        let (w, h) = (size.width as f64, size.height as f64);

        for (id, placement) in &self.sprites {
            let Some(graphic) = registry.get(placement.graphic) else {
                log::debug!("sprite {id}: graphic {} missing, not drawn", placement.graphic);
                continue;
            };

            let at = placement.position.scaled(w, h);
            graphic.draw(at.x as f32, at.y as f32, placement.rotation as f32, surface);
        }
    }

    fn placement_mut(&mut self, id: SpriteId) -> Result<&mut SpritePlacement, SceneError> {
        self.sprites.get_mut(&id).ok_or(SceneError::UnknownSprite { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{PixelSize, Vec2};
    use crate::graphic::{Bitmap, GraphicResource};
    use crate::scene::DrawList;

    fn registry() -> GraphicRegistry {
        let mut reg = GraphicRegistry::new();
        let bitmap = Bitmap::solid(64, 64, [0, 0, 0, 255]).unwrap();
        let g = GraphicResource::from_bitmap(bitmap, PixelSize::new(800, 600), 0.1, 0.1).unwrap();
        reg.add(g, 0);
        reg
    }

    // ── mutation ──────────────────────────────────────────────────────────

    #[test]
    fn add_sprite_upserts() {
        let mut layer = SpriteLayer::new();
        assert!(layer.add_sprite(7, 0, Coordinate::new(0.1, 0.1)).is_none());
        let old = layer.add_sprite(7, 2, Coordinate::new(0.9, 0.8)).unwrap();

        assert_eq!(old.graphic, 0);
        assert_eq!(layer.len(), 1);
        let p = layer.get(7).unwrap();
        assert_eq!(p.graphic, 2);
        assert_eq!(p.position, Coordinate::new(0.9, 0.8));
        assert_eq!(p.rotation, 0.0);
    }

    #[test]
    fn upsert_resets_rotation() {
        let mut layer = SpriteLayer::new();
        layer.add_sprite(1, 0, Coordinate::new(0.5, 0.5));
        layer.rotate_sprite(1, 1.25).unwrap();
        layer.add_sprite(1, 0, Coordinate::new(0.5, 0.5));
        assert_eq!(layer.get(1).unwrap().rotation, 0.0);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut layer = SpriteLayer::new();
        layer.add_sprite(3, 0, Coordinate::new(0.0, 0.0));
        assert!(layer.remove_sprite(3).is_some());
        assert!(layer.remove_sprite(3).is_none());
        assert!(layer.get(3).is_none());
        assert!(layer.is_empty());
    }

    #[test]
    fn mutating_unknown_sprite_is_an_error() {
        let mut layer = SpriteLayer::new();
        let unknown = Err(SceneError::UnknownSprite { id: 9 });
        assert_eq!(layer.move_sprite(9, Coordinate::new(0.0, 0.0)), unknown);
        assert_eq!(layer.rotate_sprite(9, 1.0), unknown);
        assert_eq!(layer.change_graphic(9, 1), unknown);
        assert!(layer.is_empty());
    }

    #[test]
    fn mutations_update_fields_in_place() {
        let mut layer = SpriteLayer::new();
        layer.add_sprite(1, 0, Coordinate::new(0.1, 0.2));
        layer.move_sprite(1, Coordinate::new(0.3, 0.4)).unwrap();
        layer.rotate_sprite(1, 0.5).unwrap();
        layer.change_graphic(1, 4).unwrap();

        assert_eq!(
            *layer.get(1).unwrap(),
            SpritePlacement { graphic: 4, position: Coordinate::new(0.3, 0.4), rotation: 0.5 }
        );
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_maps_normalized_position_to_pixels() {
        let reg = registry();
        let mut layer = SpriteLayer::new();
        layer.add_sprite(1, 0, Coordinate::new(0.25, 0.75));

        let mut list = DrawList::new(PixelSize::new(800, 600));
        layer.draw(&reg, &mut list);

        let cmd = list.sprites().next().unwrap();
        assert!(cmd.footprint.center().approx_eq(Vec2::new(200.0, 450.0), 1e-3));
    }

    #[test]
    fn sprites_with_missing_graphics_are_skipped() {
        let reg = registry();
        let mut layer = SpriteLayer::new();
        layer.add_sprite(1, 0, Coordinate::new(0.5, 0.5));
        layer.add_sprite(2, 5, Coordinate::new(0.5, 0.5));

        let mut list = DrawList::new(PixelSize::new(800, 600));
        layer.draw(&reg, &mut list);
        assert_eq!(list.len(), 1);
    }
}
