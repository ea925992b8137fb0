use bon::Builder;
use serde::{Deserialize, Serialize};

/// Body properties shared by rigid and soft bodies.
///
/// A mass of `0` turns the body into a fixed one that is never moved by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct PhysicsParams {
    #[builder(default = 10.0)]
    pub mass: f32,
    #[builder(default = 0.8)]
    pub friction: f32,
    #[builder(default = 0.3)]
    pub restitution: f32,
    #[builder(default = 0.0)]
    pub damping: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        PhysicsParams::builder().build()
    }
}

impl PhysicsParams {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }
}

/// Solver settings for soft bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct SoftParams {
    /// Link stiffness in `[0, 1]`.
    #[builder(default = 0.9)]
    pub stiffness: f32,
    /// Target volume relative to the rest volume. `0` disables volume preservation.
    #[builder(default = 1.0)]
    pub pressure: f32,
    #[builder(default = 4)]
    pub iterations: u32,
}

impl Default for SoftParams {
    fn default() -> Self {
        SoftParams::builder().build()
    }
}
