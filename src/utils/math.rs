use nalgebra::{UnitQuaternion, Vector3};
use std::f32::consts::PI;

/// Euler angles in intrinsic `XYZ` order, the rotation matrix being `Rx * Ry * Rz`.
pub trait QuaternionEuler<T> {
    fn euler_vector(&self) -> Vector3<T>;
    fn from_euler_vector(angles: &Vector3<T>) -> UnitQuaternion<T>;
}

impl QuaternionEuler<f32> for UnitQuaternion<f32> {
    fn euler_vector(&self) -> Vector3<f32> {
        let m = self.to_rotation_matrix().into_inner();
        let y = m[(0, 2)].clamp(-1.0, 1.0).asin();

        if m[(0, 2)].abs() < 0.999_999_9 {
            Vector3::new(
                (-m[(1, 2)]).atan2(m[(2, 2)]),
                y,
                (-m[(0, 1)]).atan2(m[(0, 0)]),
            )
        } else {
            // gimbal lock, z folds into x
            Vector3::new(m[(2, 1)].atan2(m[(1, 1)]), y, 0.0)
        }
    }

    fn from_euler_vector(angles: &Vector3<f32>) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z)
    }
}

/// Angle around the Y axis, measured from -X towards +Z.
pub fn azimuth(v: &Vector3<f32>) -> f32 {
    v.z.atan2(-v.x)
}

/// Angle above or below the XZ plane.
pub fn inclination(v: &Vector3<f32>) -> f32 {
    (-v.y).atan2((v.x * v.x + v.z * v.z).sqrt())
}

/// Spherical texture coordinate for a point, before seam correction.
/// `v` grows upwards, the top pole maps to `1`.
pub fn spherical_uv(v: &Vector3<f32>) -> (f32, f32) {
    (
        azimuth(v) / 2.0 / PI + 0.5,
        1.0 - (inclination(v) / PI + 0.5),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn euler_round_trip() {
        let angles = Vector3::new(0.1_f32, -0.4, 0.9);
        let q = UnitQuaternion::from_euler_vector(&angles);
        assert!((q.euler_vector() - angles).norm() < 1e-5);
    }

    #[test]
    fn euler_applies_z_first_then_y_then_x() {
        let q = UnitQuaternion::from_euler_vector(&Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        let p = q.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-5, "{p:?}");

        let q = UnitQuaternion::from_euler_vector(&Vector3::new(0.0, FRAC_PI_2, FRAC_PI_2));
        let p = q.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-5, "{p:?}");
    }

    #[test]
    fn uv_of_axis_points() {
        let (u, v) = spherical_uv(&Vector3::new(-1.0, 0.0, 0.0));
        assert!((u - 0.5).abs() < 1e-6);
        assert!((v - 0.5).abs() < 1e-6);

        let (_, v_top) = spherical_uv(&Vector3::new(0.0, 1.0, 0.0));
        assert!((v_top - 1.0).abs() < 1e-6);

        let (_, v_bottom) = spherical_uv(&Vector3::new(0.0, -1.0, 0.0));
        assert!(v_bottom.abs() < 1e-6);
    }
}
