mod builder;

pub use builder::MeshBuilder;

use crate::core::Vertex3D;
use log::trace;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// CPU side triangle mesh. Without indices every three vertices form a triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) data: MeshVertexData<Vertex3D>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshVertexData<T: Debug + Clone> {
    pub(crate) vertices: Vec<T>,
    pub(crate) indices: Option<Vec<u32>>,
}

impl Mesh {
    pub fn builder(vertices: Vec<Vertex3D>) -> MeshBuilder {
        MeshBuilder::new(vertices)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.vertices.len()
    }

    #[inline]
    pub fn indices_count(&self) -> usize {
        self.indices().map_or(0, <[u32]>::len)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex3D] {
        &self.data.vertices
    }

    #[inline]
    pub fn indices(&self) -> Option<&[u32]> {
        self.data.indices.as_deref()
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.data.indices.is_some()
    }

    pub fn triangle_count(&self) -> usize {
        match self.indices() {
            Some(indices) => indices.len() / 3,
            None => self.vertex_count() / 3,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector3<f32>> + '_ {
        self.data.vertices.iter().map(|v| v.position)
    }

    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.data.make_triangle_indices()
    }

    pub fn point_cloud(&self) -> Vec<Point3<f32>> {
        self.data.make_point_cloud()
    }

    /// Largest distance of any vertex from the local origin.
    pub fn bounding_radius(&self) -> f32 {
        self.positions().map(|p| p.norm()).fold(0.0, f32::max)
    }

    /// Raw interleaved vertex bytes, ready for a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data.vertices)
    }

    /// Overwrites vertex positions in order. Extra positions are ignored.
    pub fn set_positions<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vector3<f32>>,
    {
        for (vertex, position) in self.data.vertices.iter_mut().zip(positions) {
            vertex.position = position;
        }
    }

    /// Recomputes normals from triangle geometry.
    ///
    /// Indexed meshes get area weighted vertex normals, triangle soups get flat face normals.
    pub fn recompute_normals(&mut self) {
        let triangles = self.triangles();
        let vertices = &mut self.data.vertices;

        for vertex in vertices.iter_mut() {
            vertex.normal = Vector3::zeros();
        }

        for [a, b, c] in triangles {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
                continue;
            }
            let pa = vertices[a].position;
            let pb = vertices[b].position;
            let pc = vertices[c].position;
            let face_normal = (pc - pb).cross(&(pa - pb));

            vertices[a].normal += face_normal;
            vertices[b].normal += face_normal;
            vertices[c].normal += face_normal;
        }

        for vertex in vertices.iter_mut() {
            vertex.normal = vertex
                .normal
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vector3::zeros);
        }

        trace!("Recomputed normals for {} vertices", vertices.len());
    }
}

impl MeshVertexData<Vertex3D> {
    pub fn new(vertices: Vec<Vertex3D>, indices: Option<Vec<u32>>) -> Self {
        MeshVertexData { vertices, indices }
    }

    pub fn make_triangle_indices(&self) -> Vec<[u32; 3]> {
        match &self.indices {
            None => (0u32..self.vertices.len() as u32)
                .collect::<Vec<_>>()
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
            Some(indices) => indices
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
        }
    }

    pub fn make_point_cloud(&self) -> Vec<Point3<f32>> {
        self.vertices.iter().map(|v| v.position.into()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn triangle() -> Vec<Vertex3D> {
        vec![
            Vertex3D::position_only(Vector3::new(0.0, 0.0, 0.0)),
            Vertex3D::position_only(Vector3::new(1.0, 0.0, 0.0)),
            Vertex3D::position_only(Vector3::new(0.0, 1.0, 0.0)),
        ]
    }

    #[test]
    fn soup_triangles_follow_vertex_order() {
        let mesh = Mesh::builder(triangle()).build();
        assert_eq!(mesh.triangles(), vec![[0, 1, 2]]);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_indexed());
    }

    #[test]
    fn computed_normals_face_counter_clockwise_side() {
        let mesh = Mesh::builder(triangle()).with_computed_normals().build();
        for v in mesh.vertices() {
            assert!((v.normal - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn vertex_bytes_cover_all_vertices() {
        let mesh = Mesh::builder(vec![Vertex3D::new(
            Vector3::new(1.0, 2.0, 3.0),
            Vector2::new(0.5, 0.5),
            Vector3::new(0.0, 1.0, 0.0),
        )])
        .build();

        assert_eq!(mesh.vertex_bytes().len(), size_of::<Vertex3D>());
    }
}
