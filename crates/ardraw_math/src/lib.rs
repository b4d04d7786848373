//! # ardraw_math - Placement Math
//!
//! The small slice of 3D math that object placement needs: points,
//! column-major 4x4 transforms, composition and translation extraction.

pub mod vector;
pub mod matrix;

pub use vector::*;
pub use matrix::*;

pub mod consts {
    pub const FRAC_PI_2: f32 = core::f32::consts::FRAC_PI_2;
}
