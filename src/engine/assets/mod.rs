//! Resources a native object is built from: meshes and materials.

pub mod material;
pub mod mesh;

pub use material::*;
pub use mesh::*;
