//! Host-facing sprite display: graphic registry, layered scene and view.

use std::path::Path;

use crate::catalog::GraphicCatalog;
use crate::coords::{Coordinate, PixelSize};
use crate::graphic::{Bitmap, GraphicRegistry, GraphicResource, ResourceLoadError};
use crate::render::RenderSurface;
use crate::scene::{DrawList, Scene, SceneError, SpriteId};
use crate::view::{View, ViewSurface};

/// Logical arena extent used to turn world positions into normalized ones.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArenaBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaBounds {
    /// Unit bounds: world coordinates are already normalized.
    fn default() -> Self {
        Self { width: 1.0, height: 1.0 }
    }
}

impl ArenaBounds {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        ok(self.width) && ok(self.height)
    }
}

/// Sprite display bound to one render surface.
///
/// Owns the graphic registry, the layer stack and the camera view. Every
/// mutation only updates in-memory state; nothing is painted until
/// [`redraw`](Self::redraw).
#[derive(Debug)]
pub struct ArenaDisplay {
    pub(crate) registry: GraphicRegistry,
    pub(crate) scene: Scene,
    view: View,
    surface_size: PixelSize,
    arena: ArenaBounds,
    pub(crate) catalog: GraphicCatalog,
}

impl ArenaDisplay {
    /// `surface_size` is the size graphic fractions are resolved against
    /// until the first [`on_resize`](Self::on_resize).
    pub fn new(surface_size: PixelSize) -> Self {
        if !surface_size.is_valid() {
            log::warn!("display created with zero-sized surface {surface_size:?}");
        }

        Self {
            registry: GraphicRegistry::new(),
            scene: Scene::new(),
            view: View::new(),
            surface_size,
            arena: ArenaBounds::default(),
            catalog: GraphicCatalog::default(),
        }
    }

    // ── graphics ──────────────────────────────────────────────────────────

    /// Loads an image file into registry slot `index`, sized to
    /// `width_fraction x height_fraction` of the current surface.
    ///
    /// Replaces any graphic already at `index`; sprites that reference the
    /// index pick up the new image on the next redraw.
    pub fn add_graphic(
        &mut self,
        path: impl AsRef<Path>,
        width_fraction: f64,
        height_fraction: f64,
        index: usize,
    ) -> Result<(), ResourceLoadError> {
        let resource =
            GraphicResource::create(path, self.surface_size, width_fraction, height_fraction)?;
        self.install_graphic(resource, index);
        Ok(())
    }

    /// Same as [`add_graphic`](Self::add_graphic) for already decoded pixels.
    pub fn add_graphic_bitmap(
        &mut self,
        bitmap: Bitmap,
        width_fraction: f64,
        height_fraction: f64,
        index: usize,
    ) -> Result<(), ResourceLoadError> {
        let resource =
            GraphicResource::from_bitmap(bitmap, self.surface_size, width_fraction, height_fraction)?;
        self.install_graphic(resource, index);
        Ok(())
    }

    fn install_graphic(&mut self, resource: GraphicResource, index: usize) {
        let size = resource.size();
        if self.registry.add(resource, index).is_some() {
            log::debug!("graphic {index} replaced");
        }
        log::debug!("graphic {index} sized {}x{} px", size.x, size.y);
    }

    // ── layers and sprites ────────────────────────────────────────────────

    /// Appends a layer on top of all existing ones.
    pub fn add_layer(&mut self) -> usize {
        self.scene.add_layer()
    }

    /// Places (or re-places) sprite `id` on `layer` at normalized `position`.
    pub fn add_sprite(
        &mut self,
        layer: usize,
        graphic: usize,
        id: SpriteId,
        position: Coordinate<f64>,
    ) -> Result<(), SceneError> {
        self.check_graphic(graphic)?;
        self.scene.layer_mut(layer)?.add_sprite(id, graphic, position);
        Ok(())
    }

    pub fn move_sprite(
        &mut self,
        layer: usize,
        id: SpriteId,
        position: Coordinate<f64>,
    ) -> Result<(), SceneError> {
        self.scene.layer_mut(layer)?.move_sprite(id, position)
    }

    /// Sets the absolute rotation of a sprite, in radians.
    pub fn rotate_sprite(&mut self, layer: usize, id: SpriteId, rotation: f64) -> Result<(), SceneError> {
        self.scene.layer_mut(layer)?.rotate_sprite(id, rotation)
    }

    /// Removes a sprite. An absent sprite is not an error; an absent layer is.
    pub fn remove_sprite(&mut self, layer: usize, id: SpriteId) -> Result<(), SceneError> {
        if self.scene.layer_mut(layer)?.remove_sprite(id).is_none() {
            log::debug!("remove_sprite: sprite {id} not on layer {layer}");
        }
        Ok(())
    }

    pub fn change_graphic(
        &mut self,
        layer: usize,
        id: SpriteId,
        graphic: usize,
    ) -> Result<(), SceneError> {
        self.check_graphic(graphic)?;
        self.scene.layer_mut(layer)?.change_graphic(id, graphic)
    }

    fn check_graphic(&self, index: usize) -> Result<(), SceneError> {
        if self.registry.contains(index) {
            Ok(())
        } else {
            Err(SceneError::UnknownGraphic { index })
        }
    }

    // ── surface ───────────────────────────────────────────────────────────

    /// Rescales every graphic so it keeps its fraction of the surface.
    ///
    /// Zero-sized (minimized) and unchanged sizes are ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let new = PixelSize::new(width, height);
        if !new.is_valid() || new == self.surface_size {
            return;
        }

        log::debug!("display resize {:?} -> {new:?}", self.surface_size);
        self.registry.rescale_all(self.surface_size, new);
        self.surface_size = new;
    }

    /// Paints every layer bottom to top through the current view.
    pub fn redraw(&self, surface: &mut dyn RenderSurface) {
        if surface.pixel_size() != self.surface_size {
            log::debug!(
                "redraw onto {:?} while graphics are sized for {:?}",
                surface.pixel_size(),
                self.surface_size
            );
        }

        if self.view.is_identity() {
            self.scene.draw(&self.registry, surface);
        } else {
            let mut viewed = ViewSurface::new(surface, &self.view);
            self.scene.draw(&self.registry, &mut viewed);
        }
    }

    /// Clears `list`, sizes it to the display and records one frame into it.
    pub fn record(&self, list: &mut DrawList) {
        list.clear();
        list.set_pixel_size(self.surface_size);
        self.redraw(list);
    }

    // ── view ──────────────────────────────────────────────────────────────

    /// Zooms by `(width_factor, height_factor)` about the normalized
    /// surface point `(center_x, center_y)`.
    pub fn zoom(&mut self, width_factor: f64, height_factor: f64, center_x: f64, center_y: f64) {
        self.view
            .zoom(width_factor, height_factor, Coordinate::new(center_x, center_y));
    }

    /// Pans by a normalized shift.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.view.translate(dx, dy);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    // ── arena ─────────────────────────────────────────────────────────────

    /// Sets the logical arena extent used by [`to_normalized`](Self::to_normalized).
    ///
    /// Non-positive or non-finite bounds are rejected and the old bounds kept.
    pub fn set_arena_bounds(&mut self, width: f64, height: f64) -> bool {
        let bounds = ArenaBounds::new(width, height);
        if !bounds.is_valid() {
            log::warn!("ignoring invalid arena bounds {width}x{height}");
            return false;
        }
        self.arena = bounds;
        true
    }

    #[inline]
    pub fn arena_bounds(&self) -> ArenaBounds {
        self.arena
    }

    /// Converts an arena-space point into normalized `[0, 1]` coordinates.
    #[inline]
    pub fn to_normalized(&self, point: Coordinate<f64>) -> Coordinate<f64> {
        Coordinate::new(point.x / self.arena.width, point.y / self.arena.height)
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Drops every layer, sprite and graphic and resets the view.
    /// The surface size, arena bounds and catalog are kept.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.registry.clear();
        self.view.reset();
    }

    /// Graphics that scene commands may load on first use.
    pub fn set_catalog(&mut self, catalog: GraphicCatalog) {
        self.catalog = catalog;
    }

    #[inline]
    pub fn catalog(&self) -> &GraphicCatalog {
        &self.catalog
    }

    #[inline]
    pub fn registry(&self) -> &GraphicRegistry {
        &self.registry
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn view(&self) -> &View {
        &self.view
    }

    #[inline]
    pub fn surface_size(&self) -> PixelSize {
        self.surface_size
    }
}
