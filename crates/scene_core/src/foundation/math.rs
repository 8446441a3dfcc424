//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the translation/rotation/scale composition
//! used by every transform in the scene graph.
//!
//! ## Conventions
//!
//! Matrices act on column vectors. A local matrix is composed as
//! `T * R * S`: scale is applied first, then rotation, then translation.
//! World matrices are `parent * local`.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Rotation3, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Unit quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Smallest column length used as a divisor when extracting rotation.
///
/// Columns shorter than this (zero or near-zero scale) still decompose to a
/// finite rotation, but that rotation carries no meaning.
pub const SCALE_EPSILON: f32 = 1.0e-6;

/// Canonical axes shared by transforms and the frustum.
pub mod axis {
    use super::Vec3;

    /// Canonical forward axis (+Z)
    pub fn forward() -> Vec3 {
        Vec3::z()
    }

    /// Canonical up axis (+Y)
    pub fn up() -> Vec3 {
        Vec3::y()
    }

    /// Canonical right axis (+X)
    pub fn right() -> Vec3 {
        Vec3::x()
    }
}

/// Compose a local matrix from scale, rotation and translation.
///
/// Scale is applied first and translation last.
pub fn compose_trs(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(position)
        * rotation.to_homogeneous()
        * Mat4::new_nonuniform_scaling(scale)
}

/// Extract the translation column of an affine matrix
pub fn extract_translation(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Extract per-axis scale as the lengths of the basis columns.
///
/// Lengths are always non-negative; a mirrored basis is reported by
/// [`decompose_trs`], which folds the reflection into the X axis.
pub fn extract_scale(matrix: &Mat4) -> Vec3 {
    Vec3::new(
        Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude(),
        Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude(),
        Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude(),
    )
}

/// Extract the rotation of an affine matrix with its scale removed
pub fn extract_rotation(matrix: &Mat4) -> Quat {
    decompose_trs(matrix).1
}

/// Largest absolute per-axis scale of an affine matrix
pub fn max_axis_scale(matrix: &Mat4) -> f32 {
    extract_scale(matrix).max()
}

/// Split an affine matrix into `(translation, rotation, scale)`.
///
/// This is the inverse of [`compose_trs`] for matrices without shear and with
/// non-zero scale. A matrix with negative determinant is treated as mirrored
/// along X: the returned X scale is negative and the rotation stays proper.
pub fn decompose_trs(matrix: &Mat4) -> (Vec3, Quat, Vec3) {
    let position = extract_translation(matrix);
    let mut scale = extract_scale(matrix);

    let basis: Mat3 = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    if basis.determinant() < 0.0 {
        scale.x = -scale.x;
    }

    let divisor = |s: f32| if s.abs() < SCALE_EPSILON { SCALE_EPSILON.copysign(s) } else { s };
    let (sx, sy, sz) = (divisor(scale.x), divisor(scale.y), divisor(scale.z));

    let rotation_matrix = Mat3::from_columns(&[
        basis.column(0) / sx,
        basis.column(1) / sy,
        basis.column(2) / sz,
    ]);
    let rotation = Quat::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation_matrix));

    (position, rotation, scale)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}
