use std::ops::Mul;

use super::Vec2;

/// 2D affine transform stored as a 3x2 matrix.
///
/// Points are row vectors: `p' = [x y 1] * M`, so
///
/// ```text
/// x' = x * m11 + y * m21 + dx
/// y' = x * m12 + y * m22 + dy
/// ```
///
/// Composition reads left to right: `a * b` applies `a` first, then `b`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine2 {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    #[inline]
    pub const fn identity() -> Self {
        Self { m11: 1.0, m12: 0.0, m21: 0.0, m22: 1.0, dx: 0.0, dy: 0.0 }
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self { m11: sx, m12: 0.0, m21: 0.0, m22: sy, dx: 0.0, dy: 0.0 }
    }

    #[inline]
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self { m11: 1.0, m12: 0.0, m21: 0.0, m22: 1.0, dx, dy }
    }

    /// Rotation about the origin by `radians`.
    ///
    /// With +Y pointing down, positive angles turn clockwise on screen.
    #[inline]
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { m11: cos, m12: sin, m21: -sin, m22: cos, dx: 0.0, dy: 0.0 }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.m11 + p.y * self.m21 + self.dx,
            p.x * self.m12 + p.y * self.m22 + self.dy,
        )
    }

    #[inline]
    pub fn translation_part(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        [self.m11, self.m12, self.m21, self.m22, self.dx, self.dy]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Rows of the matrix as uploaded to shaders: `[m11 m12]`, `[m21 m22]`, `[dx dy]`.
    #[inline]
    pub fn to_rows(&self) -> [[f32; 2]; 3] {
        [[self.m11, self.m12], [self.m21, self.m22], [self.dx, self.dy]]
    }

    pub fn approx_eq(&self, other: &Affine2, eps: f32) -> bool {
        let a = self.to_rows();
        let b = other.to_rows();
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(x, y)| (x - y).abs() <= eps)
    }
}

impl Mul for Affine2 {
    type Output = Affine2;

    fn mul(self, b: Affine2) -> Affine2 {
        let a = self;
        Affine2 {
            m11: a.m11 * b.m11 + a.m12 * b.m21,
            m12: a.m11 * b.m12 + a.m12 * b.m22,
            m21: a.m21 * b.m11 + a.m22 * b.m21,
            m22: a.m21 * b.m12 + a.m22 * b.m22,
            dx: a.dx * b.m11 + a.dy * b.m21 + b.dx,
            dy: a.dx * b.m12 + a.dy * b.m22 + b.dy,
        }
    }
}
