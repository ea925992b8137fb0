//! Components produce and own a native object.
//!
//! A component is created from declarative parameters, merged over its defaults.
//! Building creates the native object (see [`NativeMesh`]), wrapping applies the
//! parameters that live on the object itself, such as its transform and shadow flags.
//!
//! ```rust
//! use hedra::components::{Component, Polyhedron, PolyhedronParams};
//! use hedra::physics::PhysicsManager;
//!
//! let mut physics = PhysicsManager::default();
//! let mut poly = Polyhedron::new(PolyhedronParams::default(), &mut physics).unwrap();
//!
//! poly.set_radius(&mut physics, 2.0).unwrap();
//! assert_eq!(poly.radius(), Some(2.0));
//! assert!(poly.is_ready());
//! ```

pub mod native;
pub mod params;
pub mod polyhedron;

pub use native::*;
pub use params::*;
pub use polyhedron::*;

use crate::geometry::GeometryError;
use crate::physics::{PhysicsError, PhysicsManager};
use snafu::Snafu;
use std::any::Any;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum ComponentError {
    #[snafu(context(false), display("Invalid geometry: {source}"))]
    Geometry { source: GeometryError },

    #[snafu(context(false), display("Physics body could not be created: {source}"))]
    Physics { source: PhysicsError },

    #[snafu(display("Component parameters could not be decoded: {source}"))]
    InvalidParams { source: serde_json::Error },

    #[snafu(display("{name} has no native object yet, build it first"))]
    NotBuilt { name: &'static str },
}

#[allow(unused)]
pub trait Component: Any {
    fn name(&self) -> &'static str;

    // Creates the native object, replacing any previous one
    fn build(&mut self, physics: &mut PhysicsManager) -> Result<(), ComponentError>;

    // Applies parameters stored on the native object itself
    fn wrap(&mut self, physics: &mut PhysicsManager) -> Result<(), ComponentError>;

    fn native(&self) -> Option<&NativeMesh>;

    fn is_built(&self) -> bool {
        self.native().is_some()
    }

    // Gets called after physics have evolved
    fn fixed_update(&mut self, physics: &mut PhysicsManager) {}

    // Gets called when the component is about to be deleted
    fn delete(&mut self, physics: &mut PhysicsManager) {}
}
