//! Math utilities and types
//!
//! Provides the vector and matrix aliases used by the camera and scene graph.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix3, Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Rigid transform used by scene graph nodes and cameras
///
/// Rotation is kept as a plain basis matrix so that cameras can carry
/// their (direction, up, right) column convention directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation in parent space
    pub translate: Vec3,

    /// Rotation basis
    pub rotate: Mat3,

    /// Uniform scale
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec3::zeros(),
            rotate: Mat3::identity(),
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a translation
    pub fn from_translation(translate: Vec3) -> Self {
        Self {
            translate,
            ..Default::default()
        }
    }

    /// Combine this (parent) transform with a child's local transform
    pub fn combine(&self, child: &Transform) -> Transform {
        Transform {
            translate: self.translate + self.rotate * child.translate * self.scale,
            rotate: self.rotate * child.rotate,
            scale: self.scale * child.scale,
        }
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotate * point * self.scale + self.translate
    }

    /// Convert to a homogeneous transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translate)
            * self.rotate.to_homogeneous()
            * Mat4::new_scaling(self.scale)
    }
}

/// Mathematical constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants::{DEG_TO_RAD, RAD_TO_DEG};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * RAD_TO_DEG
    }
}
