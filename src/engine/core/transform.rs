use crate::utils::math::QuaternionEuler;
use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};

/// Translation, rotation and scale of a native object.
///
/// Scale is applied first, then rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pos: Vector3<f32>,
    rot: UnitQuaternion<f32>,
    scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            pos: Vector3::zeros(),
            rot: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Creates a transform from a position, `XYZ` euler angles (radians) and a scale.
    pub fn from_parts(position: Vector3<f32>, euler: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Transform {
            pos: position,
            rot: UnitQuaternion::from_euler_vector(&euler),
            scale,
        }
    }

    #[inline]
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.set_position_vec(Vector3::new(x, y, z))
    }

    pub fn set_position_vec(&mut self, pos: Vector3<f32>) {
        self.pos = pos;
    }

    pub fn position(&self) -> Vector3<f32> {
        self.pos
    }

    pub fn translate(&mut self, other: Vector3<f32>) {
        self.pos += other;
    }

    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.rot = rotation;
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.rot
    }

    pub fn euler_rotation(&self) -> Vector3<f32> {
        self.rot.euler_vector()
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    /// Position and rotation without scale, the part a rigid body can carry.
    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.pos), self.rot)
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.isometry().to_homogeneous() * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let scaled = Point3::from(point.coords.component_mul(&self.scale));
        self.isometry().transform_point(&scaled)
    }

    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.rot * vector.component_mul(&self.scale)
    }
}
