//! Physics simulation powered by `rapier`, plus soft bodies.
//!
//! The [`PhysicsManager`] owns every rigid body, collider and soft body and
//! advances them in fixed timesteps. [`ConvexBody`] and [`SoftBody`] are the
//! two physical representations a mesh component can be wrapped in.

pub mod convex;
pub mod params;
pub mod simulator;
pub mod softbody;

pub use convex::*;
pub use params::*;
pub use simulator::*;
pub use softbody::*;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum PhysicsError {
    #[snafu(display("Cannot build a convex hull from {points} points"))]
    DegenerateHull { points: usize },

    #[snafu(display("A soft body needs at least one triangle"))]
    EmptySoftBody,

    #[snafu(display("A soft body needs an indexed mesh so neighbouring faces share nodes"))]
    UnindexedSoftBody,

    #[snafu(display("Node {node} is out of range for a soft body with {count} nodes"))]
    NodeOutOfRange { node: usize, count: usize },

    #[snafu(display("The rigid body was removed from the physics world"))]
    MissingBody,

    #[snafu(display("The collider was removed from the physics world"))]
    MissingCollider,

    #[snafu(display("The soft body was removed from the physics world"))]
    UnknownSoftBody,
}
