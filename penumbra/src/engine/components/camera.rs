use crate::core::Transform;
use crate::utils::{MATRIX4_ID, perspective_lh};
use nalgebra::{Matrix4, UnitQuaternion, Vector3};

/// A projection and the pose it is viewed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    projection: Matrix4<f32>,
    pub transform: Transform,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(MATRIX4_ID)
    }
}

impl Camera {
    pub fn new(projection: Matrix4<f32>) -> Self {
        Camera {
            projection,
            transform: Transform::new(),
        }
    }

    /// A left-handed perspective camera at the origin. `fov` is the vertical
    /// field of view in radians.
    pub fn perspective(fov: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        Camera::new(perspective_lh(fov, aspect, z_near, z_far))
    }

    pub fn set_projection(&mut self, projection: Matrix4<f32>) {
        self.projection = projection;
    }

    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }

    #[inline]
    pub fn position(&self) -> Vector3<f32> {
        self.transform.position()
    }

    #[inline]
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.transform.rotation()
    }

    /// World to view space. Scale of the camera's transform is ignored.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.transform.isometry().inverse().to_homogeneous()
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }
}
