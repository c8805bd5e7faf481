//! Math utilities and types
//!
//! Provides the vector and matrix aliases used by the collision code, plus the
//! scalar helpers the swept tests are built on (quadratic roots and the unit
//! interval test).

pub use nalgebra::{Matrix4, Rotation3, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Returns true when `x` lies in the closed interval `[0, 1]`.
///
/// NaN and infinities compare false, which is what lets degenerate quadratic
/// roots fall out of the swept tests without special cases.
#[inline]
pub fn in_unit_interval(x: f32) -> bool {
    (0.0..=1.0).contains(&x)
}

/// Maps a parametric time onto itself when it is inside the current frame,
/// and onto `+inf` otherwise so it never wins a "minimum time" comparison.
#[inline]
pub fn screen_time(t: f32) -> f32 {
    if in_unit_interval(t) {
        t
    } else {
        f32::INFINITY
    }
}

/// Solve `a*t^2 + b*t + c = 0`.
///
/// Returns `None` when the discriminant is negative, otherwise both roots in
/// ascending order. A zero `a` is not special-cased: the division produces
/// infinities or NaN which callers filter with [`in_unit_interval`].
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let det = b * b - 4.0 * a * c;
    if det < 0.0 {
        return None;
    }

    let sqrt_det = det.sqrt();
    let root1 = -(b - sqrt_det) / (2.0 * a);
    let root2 = -(b + sqrt_det) / (2.0 * a);

    Some((min_value(root1, root2), max_value(root1, root2)))
}

/// `a < b ? a : b`, without `f32::min`'s NaN-swallowing behavior.
#[inline]
pub fn min_value(a: f32, b: f32) -> f32 {
    if a < b {
        a
    } else {
        b
    }
}

/// `a > b ? a : b`, without `f32::max`'s NaN-swallowing behavior.
#[inline]
pub fn max_value(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}

/// Extension trait for Mat4 with the transforms the collision code needs
pub trait Mat4Ext {
    /// Transform a point by this affine matrix (translation in the last column)
    fn transform_coord(&self, point: &Vec3) -> Vec3;

    /// Build a translation matrix
    fn translation(offset: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn transform_coord(&self, point: &Vec3) -> Vec3 {
        Vec3::new(
            self.m11 * point.x + self.m12 * point.y + self.m13 * point.z + self.m14,
            self.m21 * point.x + self.m22 * point.y + self.m23 * point.z + self.m24,
            self.m31 * point.x + self.m32 * point.y + self.m33 * point.z + self.m34,
        )
    }

    fn translation(offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset)
    }
}

/// Rotate `vector` by `degrees` around `axis` (right-handed).
///
/// A zero axis leaves the vector unchanged.
pub fn rotate_about(vector: &Vec3, axis: &Vec3, degrees: f32) -> Vec3 {
    match Unit::try_new(*axis, f32::EPSILON) {
        Some(axis) => Rotation3::from_axis_angle(&axis, utils::deg_to_rad(degrees)) * vector,
        None => *vector,
    }
}
