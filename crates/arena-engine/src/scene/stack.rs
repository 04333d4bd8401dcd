use crate::graphic::GraphicRegistry;
use crate::render::RenderSurface;

use super::{SceneError, SpriteLayer};

/// Ordered stack of sprite layers.
///
/// Layer `i` is painted before layer `i + 1`, so higher indices appear on top.
/// Layers are only ever appended; indices stay stable for the scene's lifetime.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    layers: Vec<SpriteLayer>,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty layer on top and returns its index.
    pub fn add_layer(&mut self) -> usize {
        self.layers.push(SpriteLayer::new());
        self.layers.len() - 1
    }

    /// Appends empty layers until `index` exists.
    pub fn ensure_layers(&mut self, index: usize) {
        while self.layers.len() <= index {
            self.add_layer();
        }
    }

    pub fn layer(&self, index: usize) -> Result<&SpriteLayer, SceneError> {
        let layer_count = self.layers.len();
        self.layers
            .get(index)
            .ok_or(SceneError::UnknownLayer { index, layer_count })
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut SpriteLayer, SceneError> {
        let layer_count = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(SceneError::UnknownLayer { index, layer_count })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpriteLayer> {
        self.layers.iter()
    }

    /// Total sprite count across all layers.
    pub fn sprite_count(&self) -> usize {
        self.layers.iter().map(SpriteLayer::len).sum()
    }

    /// Drops every layer.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Paints all layers bottom to top.
    pub fn draw(&self, registry: &GraphicRegistry, surface: &mut dyn RenderSurface) {
        for (i, layer) in self.layers.iter().enumerate() {
            surface.begin_layer(i);
            layer.draw(registry, surface);
        }
    }
}
