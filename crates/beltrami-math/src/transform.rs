use crate::{DMat4, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid body transform (rotation + translation, no shear/scale).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Rotation by `angle` radians around `axis`. The axis need not be
    /// normalized.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        Self::from_mat4(DMat4::from_axis_angle(axis.normalize(), angle))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }
}

/// OpenGL-style perspective projection (clip z in `[-1, 1]`).
pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> DMat4 {
    DMat4::perspective_rh_gl(fov_y, aspect, near, far)
}

/// Matrix for transforming normals: `transpose(inverse(m))`.
///
/// A singular `m` produces non-finite entries rather than an error.
pub fn normal_matrix(m: DMat4) -> DMat4 {
    m.inverse().transpose()
}

/// Column-major `f32` array for uniform upload.
pub fn to_f32_cols(m: DMat4) -> [f32; 16] {
    m.as_mat4().to_cols_array()
}
