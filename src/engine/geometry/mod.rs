//! Polyhedron surface generation.
//!
//! A polyhedron is described by a base solid (vertices + triangle indices), a radius and
//! a subdivision detail. Each base face is split into `(detail + 1)^2` triangles and every
//! resulting vertex is pushed onto the sphere of the given radius, so detail `0` keeps the
//! base solid and high detail converges towards a sphere.

pub mod params;
pub mod polyhedron;
pub mod presets;

pub use params::*;
pub use polyhedron::*;
pub use presets::*;

use snafu::Snafu;

/// Upper bound for the subdivision detail. Triangle count grows with `(detail + 1)^2`.
pub const MAX_DETAIL: u32 = 64;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum GeometryError {
    #[snafu(display("Vertex list length {len} is not a multiple of 3"))]
    VertexArity { len: usize },

    #[snafu(display("Index list length {len} is not a multiple of 3"))]
    IndexArity { len: usize },

    #[snafu(display("Vertex list contains NaN or infinite coordinates"))]
    NonFiniteVertex,

    #[snafu(display("Face index {index} is out of range for {vertex_count} vertices"))]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[snafu(display("Radius must be finite and greater than zero, got {radius}"))]
    InvalidRadius { radius: f32 },

    #[snafu(display("Subdivision detail {detail} exceeds the maximum of {MAX_DETAIL}"))]
    DetailTooHigh { detail: u32 },

    #[snafu(display("Geometry instruction `{name}` could not be decoded"))]
    Instruction {
        name: &'static str,
        source: serde_json::Error,
    },

    #[snafu(display("Got {count} positional geometry values, at most 4 are accepted"))]
    TooManyInstructions { count: usize },
}
