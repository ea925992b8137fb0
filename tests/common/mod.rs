use hedra::physics::PhysicsManager;
use hedra::rapier3d::prelude::*;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Adds a 100x1x100 static slab whose top face sits at y = 0.
#[allow(dead_code)]
pub fn add_floor(physics: &mut PhysicsManager) -> ColliderHandle {
    let floor = ColliderBuilder::cuboid(50.0, 0.5, 50.0)
        .translation(vector![0.0, -0.5, 0.0])
        .build();
    physics.collider_set.insert(floor)
}
