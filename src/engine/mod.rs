pub mod assets;
pub mod components;
pub mod core;
pub mod geometry;
pub mod physics;
pub mod world;

pub use self::world::World;
