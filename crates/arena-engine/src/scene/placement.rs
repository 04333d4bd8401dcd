use crate::coords::Coordinate;

/// Caller-assigned sprite identifier, unique within one layer.
pub type SpriteId = i32;

/// One positioned instance of a registry graphic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpritePlacement {
    /// Registry index of the graphic to paint.
    pub graphic: usize,
    /// Normalized `[0, 1]` layer-space position of the sprite center.
    pub position: Coordinate<f64>,
    /// Radians, clockwise on screen.
    pub rotation: f64,
}

impl SpritePlacement {
    #[inline]
    pub const fn new(graphic: usize, position: Coordinate<f64>) -> Self {
        Self { graphic, position, rotation: 0.0 }
    }
}
