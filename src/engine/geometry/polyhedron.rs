use crate::assets::Mesh;
use crate::core::Vertex3D;
use crate::geometry::{GeometryError, GeometryParams};
use crate::utils::math::{azimuth, spherical_uv};
use itertools::Itertools;
use log::trace;
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f32::consts::PI;

/// Positions are compared on this grid when merging vertices (4 decimal places).
const MERGE_PRECISION: f32 = 1e4;

/// How the generated surface is laid out in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryLayout {
    /// Shared vertices, addressed by an index list. Required by soft bodies.
    #[default]
    Indexed,
    /// Every triangle owns its three vertices.
    Buffer,
}

/// A polyhedron projected onto a sphere, together with the parameters it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedronGeometry {
    parameters: GeometryParams,
    layout: GeometryLayout,
    mesh: Mesh,
}

impl PolyhedronGeometry {
    pub fn new(parameters: GeometryParams, layout: GeometryLayout) -> Result<Self, GeometryError> {
        parameters.validate()?;

        let mut positions = subdivide(&parameters);
        apply_radius(&mut positions, parameters.radius);
        let uvs = generate_uvs(&positions);

        let vertices = positions
            .iter()
            .zip(uvs)
            .map(|(position, uv)| {
                let normal = position
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::zeros);
                Vertex3D::new(*position, uv, normal)
            })
            .collect::<Vec<_>>();

        let flat = parameters.detail == 0;
        let mesh = match layout {
            GeometryLayout::Buffer => {
                let builder = Mesh::builder(vertices);
                if flat {
                    builder.with_computed_normals().build()
                } else {
                    builder.build()
                }
            }
            GeometryLayout::Indexed => {
                let (vertices, indices) = merge_vertices(vertices);
                let builder = Mesh::builder(vertices).with_indices(indices);
                if flat {
                    builder.with_computed_normals().build()
                } else {
                    builder.build()
                }
            }
        };

        trace!(
            "Generated {:?} polyhedron: {} vertices, {} triangles (radius {}, detail {})",
            layout,
            mesh.vertex_count(),
            mesh.triangle_count(),
            parameters.radius,
            parameters.detail
        );

        Ok(PolyhedronGeometry {
            parameters,
            layout,
            mesh,
        })
    }

    #[inline]
    pub fn parameters(&self) -> &GeometryParams {
        &self.parameters
    }

    #[inline]
    pub fn layout(&self) -> GeometryLayout {
        self.layout
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[inline]
    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }
}

fn source_vertex(params: &GeometryParams, index: u32) -> Vector3<f32> {
    let offset = index as usize * 3;
    Vector3::new(
        params.vertices[offset],
        params.vertices[offset + 1],
        params.vertices[offset + 2],
    )
}

fn subdivide(params: &GeometryParams) -> Vec<Vector3<f32>> {
    let cols = params.detail as usize + 1;
    let mut out = Vec::with_capacity(params.face_count() * cols * cols * 3);

    for (a, b, c) in params.indices.iter().copied().tuples() {
        subdivide_face(
            source_vertex(params, a),
            source_vertex(params, b),
            source_vertex(params, c),
            cols,
            &mut out,
        );
    }

    out
}

/// Splits triangle `abc` into `cols * cols` triangles. Row `i` of the lattice runs
/// parallel to edge `ab`, stepping towards `c`.
fn subdivide_face(
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
    cols: usize,
    out: &mut Vec<Vector3<f32>>,
) {
    let mut lattice: Vec<Vec<Vector3<f32>>> = Vec::with_capacity(cols + 1);

    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(&c, t);
        let bj = b.lerp(&c, t);
        let rows = cols - i;

        let row = (0..=rows)
            .map(|j| {
                if j == 0 && i == cols {
                    aj
                } else {
                    aj.lerp(&bj, j as f32 / rows as f32)
                }
            })
            .collect();
        lattice.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.push(lattice[i][k + 1]);
                out.push(lattice[i + 1][k]);
                out.push(lattice[i][k]);
            } else {
                out.push(lattice[i][k + 1]);
                out.push(lattice[i + 1][k + 1]);
                out.push(lattice[i + 1][k]);
            }
        }
    }
}

fn apply_radius(positions: &mut [Vector3<f32>], radius: f32) {
    for position in positions.iter_mut() {
        *position = position
            .try_normalize(f32::EPSILON)
            .map_or_else(Vector3::zeros, |n| n * radius);
    }
}

fn generate_uvs(positions: &[Vector3<f32>]) -> Vec<Vector2<f32>> {
    let mut uvs: Vec<Vector2<f32>> = positions
        .iter()
        .map(|p| {
            let (u, v) = spherical_uv(p);
            Vector2::new(u, v)
        })
        .collect();

    correct_uvs(positions, &mut uvs);
    correct_seam(&mut uvs);

    uvs
}

fn correct_uvs(positions: &[Vector3<f32>], uvs: &mut [Vector2<f32>]) {
    for (corners, uv) in positions.chunks_exact(3).zip(uvs.chunks_exact_mut(3)) {
        let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
        let centroid_azimuth = azimuth(&centroid);

        for (corner, uv) in corners.iter().zip(uv.iter_mut()) {
            correct_uv(uv, corner, centroid_azimuth);
        }
    }
}

fn correct_uv(uv: &mut Vector2<f32>, corner: &Vector3<f32>, centroid_azimuth: f32) {
    if centroid_azimuth < 0.0 && uv.x == 1.0 {
        uv.x -= 1.0;
    }

    // poles have no azimuth of their own, borrow the face's
    if corner.x == 0.0 && corner.z == 0.0 {
        uv.x = centroid_azimuth / 2.0 / PI + 0.5;
    }
}

/// Faces straddling the u=0/u=1 seam get their low side shifted past 1.
fn correct_seam(uvs: &mut [Vector2<f32>]) {
    for face in uvs.chunks_exact_mut(3) {
        let max = face.iter().map(|uv| uv.x).fold(f32::MIN, f32::max);
        let min = face.iter().map(|uv| uv.x).fold(f32::MAX, f32::min);

        if max > 0.9 && min < 0.1 {
            for uv in face.iter_mut().filter(|uv| uv.x < 0.2) {
                uv.x += 1.0;
            }
        }
    }
}

fn merge_key(position: &Vector3<f32>) -> [i64; 3] {
    [
        (position.x * MERGE_PRECISION).round() as i64,
        (position.y * MERGE_PRECISION).round() as i64,
        (position.z * MERGE_PRECISION).round() as i64,
    ]
}

/// Collapses vertices sharing a position and drops triangles that became degenerate.
/// The first vertex seen for a position keeps its texture coordinate.
fn merge_vertices(soup: Vec<Vertex3D>) -> (Vec<Vertex3D>, Vec<u32>) {
    let mut lookup: HashMap<[i64; 3], u32> = HashMap::new();
    let mut unique = Vec::new();
    let mut remap = Vec::with_capacity(soup.len());

    for vertex in soup {
        let index = *lookup.entry(merge_key(&vertex.position)).or_insert_with(|| {
            unique.push(vertex);
            (unique.len() - 1) as u32
        });
        remap.push(index);
    }

    let indices = remap
        .chunks_exact(3)
        .filter(|tri| tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2])
        .flatten()
        .copied()
        .collect();

    (unique, indices)
}
