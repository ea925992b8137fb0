//! Plain data shared by geometry, physics and components.

pub mod transform;
pub mod vertex;

pub use transform::*;
pub use vertex::*;
