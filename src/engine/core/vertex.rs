use nalgebra::{Vector2, Vector3};
use static_assertions::const_assert_eq;

/// Interleaved vertex as it is handed to a renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    pub position: Vector3<f32>,
    pub tex_coord: Vector2<f32>,
    pub normal: Vector3<f32>,
}

const_assert_eq!(size_of::<Vertex3D>(), 8 * size_of::<f32>());

impl Vertex3D {
    pub const fn new(position: Vector3<f32>, tex_coord: Vector2<f32>, normal: Vector3<f32>) -> Self {
        Vertex3D {
            position,
            tex_coord,
            normal,
        }
    }

    pub const fn position_only(position: Vector3<f32>) -> Self {
        Vertex3D {
            position,
            tex_coord: Vector2::new(0.0, 0.0),
            normal: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}
