//! 4x4 spatial transforms

use crate::vector::{Vec3, Vec4};
use core::ops::Mul;

/// 4x4 matrix (column-major). Column 3 holds the translation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, translation.extend(1.0))
    }

    /// Right-handed rotation about +X.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols(
            Vec4::X,
            Vec4::new(0.0, cos, sin, 0.0),
            Vec4::new(0.0, -sin, cos, 0.0),
            Vec4::W,
        )
    }

    /// Right-handed rotation about +Y. A quarter turn sends -Z to -X.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(cos, 0.0, -sin, 0.0),
            Vec4::Y,
            Vec4::new(sin, 0.0, cos, 0.0),
            Vec4::W,
        )
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.cols[3].truncate()
    }

    /// Replace the translation column, keeping rotation and scale.
    #[inline]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.cols[3] = translation.extend(1.0);
        self
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mat4_identity() {
        let v = Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(Mat4::IDENTITY * v, v);
    }

    #[test]
    fn test_mat4_translation() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Vec4::W, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(m.translation(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mat4_offset_is_in_local_space() {
        // A camera turned 90 degrees about Y looks down -X in world space.
        let camera = Mat4::from_translation(Vec3::new(0.0, 1.5, 0.0))
            * Mat4::from_rotation_y(crate::consts::FRAC_PI_2);
        let offset = Mat4::from_translation(Vec3::new(0.0, 0.0, -0.2));
        let placed = (camera * offset).translation();

        assert_relative_eq!(placed.x, -0.2, epsilon = 1e-6);
        assert_relative_eq!(placed.y, 1.5, epsilon = 1e-6);
        assert_relative_eq!(placed.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mat4_with_translation_keeps_rotation() {
        let m = Mat4::from_rotation_x(-crate::consts::FRAC_PI_2)
            .with_translation(Vec3::new(2.0, 0.0, 3.0));
        assert_eq!(m.translation(), Vec3::new(2.0, 0.0, 3.0));
        // Local +Y now points along -Z
        let up = (m * Vec3::Y.extend(0.0)).truncate();
        assert_relative_eq!(up.z, -1.0, epsilon = 1e-6);
    }
}
