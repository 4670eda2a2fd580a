use nalgebra::{Isometry3, Matrix4, Translation3, Unit, UnitQuaternion, Vector3};

/// Stores the translation, rotation and scale of something placed in the scene.
///
/// Transforms are local. Hierarchies compose them by multiplying the parent's
/// [`matrix`](Transform::matrix) with the child's.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pos: Vector3<f32>,
    rot: UnitQuaternion<f32>,
    scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a transform at the origin with no rotation and a uniform scale
    /// of `1.0`.
    pub fn new() -> Self {
        Transform {
            pos: Vector3::zeros(),
            rot: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    #[inline(always)]
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.set_position_vec(Vector3::new(x, y, z))
    }

    pub fn set_position_vec(&mut self, pos: Vector3<f32>) {
        self.pos = pos;
    }

    pub fn position(&self) -> Vector3<f32> {
        self.pos
    }

    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.pos += delta;
    }

    pub fn set_rotation(&mut self, rot: UnitQuaternion<f32>) {
        self.rot = rot;
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.rot
    }

    /// Applies a rotation on top of the current one (in world orientation).
    pub fn rotate(&mut self, axis: &Unit<Vector3<f32>>, angle: f32) {
        self.rotate_by(UnitQuaternion::from_axis_angle(axis, angle));
    }

    pub fn rotate_by(&mut self, rotation: UnitQuaternion<f32>) {
        self.rot = rotation * self.rot;
        self.rot.renormalize_fast();
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vector3::new(scale, scale, scale);
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    pub fn scale(&self) -> &Vector3<f32> {
        &self.scale
    }

    /// `+Z` in this transform's orientation.
    pub fn forward(&self) -> Vector3<f32> {
        self.rot * Vector3::z()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.rot * Vector3::y()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.rot * Vector3::x()
    }

    /// Position and rotation, ignoring scale.
    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.pos), self.rot)
    }

    /// The model matrix: translation * rotation * scale.
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.pos)
            * self.rot.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }
}
