/// Linear premultiplied RGBA color.
///
/// Invariant: `r`, `g` and `b` are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::from_premul(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_premul(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from straight linear components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Creates a color from straight-alpha sRGB bytes, e.g. a hex literal.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            a as f32 / 255.0,
        )
    }

    /// Clear value for a render pass.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

pub(crate) fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub(crate) fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_endpoints_are_exact() {
        assert_eq!(Color::from_srgb_u8(0, 0, 0, 255), Color::BLACK);
        let white = Color::from_srgb_u8(255, 255, 255, 255);
        assert!((white.r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mid_gray_is_darker_in_linear() {
        let c = Color::from_srgb_u8(128, 128, 128, 255);
        assert!((c.r - 0.2158).abs() < 1e-3);
    }

    #[test]
    fn srgb_conversion_round_trips() {
        for v in [0.0, 0.02, 0.25, 0.5, 0.9, 1.0] {
            assert!((linear_to_srgb(srgb_to_linear(v)) - v).abs() < 1e-5);
        }
    }

    #[test]
    fn straight_alpha_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 2.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.5, 0.5));
    }
}
