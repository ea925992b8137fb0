use crate::geometry::GeometryParams;
use serde::{Deserialize, Serialize};

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 0.618_034;

#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; 24] = [
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0,  1.0, -1.0,  -1.0,  1.0, -1.0,
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
    2, 1, 0,  0, 3, 2,
    0, 4, 7,  7, 3, 0,
    0, 1, 5,  5, 4, 0,
    1, 2, 6,  6, 5, 1,
    2, 3, 7,  7, 6, 2,
    4, 5, 6,  6, 7, 4,
];

#[rustfmt::skip]
const TETRAHEDRON_VERTICES: [f32; 12] = [
     1.0,  1.0,  1.0,  -1.0, -1.0,  1.0,  -1.0,  1.0, -1.0,   1.0, -1.0, -1.0,
];

#[rustfmt::skip]
const TETRAHEDRON_INDICES: [u32; 12] = [
    2, 1, 0,  0, 3, 2,  1, 3, 0,  2, 3, 1,
];

#[rustfmt::skip]
const OCTAHEDRON_VERTICES: [f32; 18] = [
     1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,
     0.0, 1.0, 0.0,   0.0,-1.0, 0.0,
     0.0, 0.0, 1.0,   0.0, 0.0,-1.0,
];

#[rustfmt::skip]
const OCTAHEDRON_INDICES: [u32; 24] = [
    0, 2, 4,  0, 4, 3,  0, 3, 5,  0, 5, 2,
    1, 2, 5,  1, 5, 3,  1, 3, 4,  1, 4, 2,
];

#[rustfmt::skip]
const ICOSAHEDRON_VERTICES: [f32; 36] = [
    -1.0,  PHI,  0.0,   1.0,  PHI,  0.0,  -1.0, -PHI,  0.0,   1.0, -PHI,  0.0,
     0.0, -1.0,  PHI,   0.0,  1.0,  PHI,   0.0, -1.0, -PHI,   0.0,  1.0, -PHI,
     PHI,  0.0, -1.0,   PHI,  0.0,  1.0,  -PHI,  0.0, -1.0,  -PHI,  0.0,  1.0,
];

#[rustfmt::skip]
const ICOSAHEDRON_INDICES: [u32; 60] = [
    0, 11, 5,  0, 5, 1,  0, 1, 7,  0, 7, 10,  0, 10, 11,
    1, 5, 9,  5, 11, 4,  11, 10, 2,  10, 7, 6,  7, 1, 8,
    3, 9, 4,  3, 4, 2,  3, 2, 6,  3, 6, 8,  3, 8, 9,
    4, 9, 5,  2, 4, 11,  6, 2, 10,  8, 6, 7,  9, 8, 1,
];

#[rustfmt::skip]
const DODECAHEDRON_VERTICES: [f32; 60] = [
    // (±1, ±1, ±1)
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,  -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,
     1.0, -1.0, -1.0,   1.0, -1.0,  1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,
    // (0, ±1/φ, ±φ)
     0.0, -INV_PHI, -PHI,   0.0, -INV_PHI,  PHI,
     0.0,  INV_PHI, -PHI,   0.0,  INV_PHI,  PHI,
    // (±1/φ, ±φ, 0)
    -INV_PHI, -PHI, 0.0,  -INV_PHI,  PHI, 0.0,
     INV_PHI, -PHI, 0.0,   INV_PHI,  PHI, 0.0,
    // (±φ, 0, ±1/φ)
    -PHI, 0.0, -INV_PHI,   PHI, 0.0, -INV_PHI,
    -PHI, 0.0,  INV_PHI,   PHI, 0.0,  INV_PHI,
];

#[rustfmt::skip]
const DODECAHEDRON_INDICES: [u32; 108] = [
    3, 11, 7,  3, 7, 15,  3, 15, 13,
    7, 19, 17,  7, 17, 6,  7, 6, 15,
    17, 4, 8,  17, 8, 10,  17, 10, 6,
    8, 0, 16,  8, 16, 2,  8, 2, 10,
    0, 12, 1,  0, 1, 18,  0, 18, 16,
    6, 10, 2,  6, 2, 13,  6, 13, 15,
    2, 16, 18,  2, 18, 3,  2, 3, 13,
    18, 1, 9,  18, 9, 11,  18, 11, 3,
    4, 14, 12,  4, 12, 0,  4, 0, 8,
    11, 9, 5,  11, 5, 19,  11, 19, 7,
    19, 5, 14,  19, 14, 4,  19, 4, 17,
    1, 12, 14,  1, 14, 5,  1, 5, 9,
];

/// Named base solids that can seed a polyhedron.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolyhedronPreset {
    #[default]
    Cube,
    Tetrahedron,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl PolyhedronPreset {
    pub const ALL: [PolyhedronPreset; 5] = [
        PolyhedronPreset::Cube,
        PolyhedronPreset::Tetrahedron,
        PolyhedronPreset::Octahedron,
        PolyhedronPreset::Icosahedron,
        PolyhedronPreset::Dodecahedron,
    ];

    pub fn vertices(self) -> &'static [f32] {
        match self {
            PolyhedronPreset::Cube => &CUBE_VERTICES,
            PolyhedronPreset::Tetrahedron => &TETRAHEDRON_VERTICES,
            PolyhedronPreset::Octahedron => &OCTAHEDRON_VERTICES,
            PolyhedronPreset::Icosahedron => &ICOSAHEDRON_VERTICES,
            PolyhedronPreset::Dodecahedron => &DODECAHEDRON_VERTICES,
        }
    }

    pub fn indices(self) -> &'static [u32] {
        match self {
            PolyhedronPreset::Cube => &CUBE_INDICES,
            PolyhedronPreset::Tetrahedron => &TETRAHEDRON_INDICES,
            PolyhedronPreset::Octahedron => &OCTAHEDRON_INDICES,
            PolyhedronPreset::Icosahedron => &ICOSAHEDRON_INDICES,
            PolyhedronPreset::Dodecahedron => &DODECAHEDRON_INDICES,
        }
    }

    pub fn params(self, radius: f32, detail: u32) -> GeometryParams {
        GeometryParams {
            vertices: self.vertices().to_vec(),
            indices: self.indices().to_vec(),
            radius,
            detail,
        }
    }
}
