use super::Vec2;

/// Render-surface size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area surface (minimized window) cannot be drawn to or scaled against.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for PixelSize {
    #[inline]
    fn from(s: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(s.width, s.height)
    }
}
