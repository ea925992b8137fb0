pub mod color;
pub mod math;

pub use color::*;
pub use math::*;
