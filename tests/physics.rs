mod common;

use hedra::core::Transform;
use hedra::geometry::{GeometryLayout, PolyhedronGeometry, PolyhedronPreset};
use hedra::nalgebra::Vector3;
use hedra::physics::{ConvexBody, PhysicsError, PhysicsManager, PhysicsParams, SoftBody, SoftParams};

fn sphere_like(radius: f32) -> PolyhedronGeometry {
    PolyhedronGeometry::new(PolyhedronPreset::Icosahedron.params(radius, 1), GeometryLayout::Indexed).unwrap()
}

fn raised(y: f32) -> Transform {
    Transform::from_parts(Vector3::new(0.0, y, 0.0), Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0))
}

#[test]
fn convex_body_comes_to_rest_on_floor() {
    common::init_logging();
    let mut physics = PhysicsManager::default();
    common::add_floor(&mut physics);

    let geometry = sphere_like(1.0);
    let body = ConvexBody::new(&mut physics, geometry.mesh(), &raised(5.0), PhysicsParams::default()).unwrap();

    for _ in 0..240 {
        physics.step();
    }

    let mut transform = raised(5.0);
    body.sync_to_transform(&physics, &mut transform).unwrap();
    let y = transform.position().y;
    assert!(y > 0.5 && y < 1.5, "resting height {y}");
}

#[test]
fn massless_body_is_fixed() {
    let mut physics = PhysicsManager::default();
    let geometry = sphere_like(1.0);
    let params = PhysicsParams {
        mass: 0.0,
        ..Default::default()
    };
    let body = ConvexBody::new(&mut physics, geometry.mesh(), &raised(3.0), params).unwrap();

    for _ in 0..60 {
        physics.step();
    }

    let rigid_body = body.body(&physics).unwrap();
    assert!(rigid_body.is_fixed());
    assert_eq!(rigid_body.translation().y, 3.0);
}

#[test]
fn convex_geometry_swap_resizes_collider() {
    let mut physics = PhysicsManager::default();
    let mut body = ConvexBody::new(&mut physics, sphere_like(1.0).mesh(), &raised(0.0), PhysicsParams::default()).unwrap();

    let before = body.collider(&physics).unwrap().shape().compute_local_aabb().extents();
    body.set_geometry(&mut physics, sphere_like(4.0).mesh()).unwrap();
    let after = body.collider(&physics).unwrap().shape().compute_local_aabb().extents();

    assert!((after.x / before.x - 4.0).abs() < 1e-3);
    assert_eq!(physics.rigid_body_set.len(), 1);
    assert_eq!(physics.collider_set.len(), 1);
}

#[test]
fn degenerate_hull_is_an_error() {
    let mut physics = PhysicsManager::default();
    let flat = PolyhedronGeometry::new(
        hedra::geometry::GeometryParams {
            vertices: vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            indices: vec![],
            radius: 1.0,
            detail: 0,
        },
        GeometryLayout::Buffer,
    )
    .unwrap();

    let result = ConvexBody::new(&mut physics, flat.mesh(), &raised(0.0), PhysicsParams::default());
    assert!(matches!(result, Err(PhysicsError::DegenerateHull { points: 0 })));
    assert_eq!(physics.rigid_body_set.len(), 0);
}

#[test]
fn removing_convex_body_clears_sets() {
    let mut physics = PhysicsManager::default();
    let body = ConvexBody::new(&mut physics, sphere_like(1.0).mesh(), &raised(0.0), PhysicsParams::default()).unwrap();

    body.remove(&mut physics);
    assert_eq!(physics.rigid_body_set.len(), 0);
    assert_eq!(physics.collider_set.len(), 0);
    assert!(body.body(&physics).is_none());
}

#[test]
fn soft_body_lands_on_floor() {
    common::init_logging();
    let mut physics = PhysicsManager::default();
    common::add_floor(&mut physics);

    let geometry = sphere_like(1.0);
    let body = SoftBody::new(geometry.mesh(), &raised(3.0), PhysicsParams::default(), SoftParams::default()).unwrap();
    let handle = physics.insert_soft_body(body);

    for _ in 0..180 {
        physics.step();
    }

    let body = physics.soft_body(handle).unwrap();
    let lowest = body.nodes().iter().map(|n| n.position.y).fold(f32::MAX, f32::min);
    assert!(lowest > -0.05, "lowest node at {lowest}");
    assert!(body.center().y < 3.0);
    assert_eq!(body.mesh().vertex_count(), body.nodes().len());
}

#[test]
fn soft_body_nodes_are_in_world_space() {
    let geometry = sphere_like(1.0);
    let body = SoftBody::new(geometry.mesh(), &raised(10.0), PhysicsParams::default(), SoftParams::default()).unwrap();

    assert!((body.center() - Vector3::new(0.0, 10.0, 0.0)).norm() < 1e-4);
}

#[test]
fn soft_body_needs_indexed_surface() {
    let geometry =
        PolyhedronGeometry::new(PolyhedronPreset::Cube.params(1.0, 0), GeometryLayout::Buffer).unwrap();
    let result = SoftBody::new(geometry.mesh(), &raised(0.0), PhysicsParams::default(), SoftParams::default());

    assert!(matches!(result, Err(PhysicsError::UnindexedSoftBody)));
}

#[test]
fn removed_soft_body_is_unknown() {
    let mut physics = PhysicsManager::default();
    let geometry = sphere_like(1.0);
    let body = SoftBody::new(geometry.mesh(), &raised(0.0), PhysicsParams::default(), SoftParams::default()).unwrap();
    let handle = physics.insert_soft_body(body);

    assert!(physics.remove_soft_body(handle).is_some());
    assert!(matches!(physics.soft_body(handle), Err(PhysicsError::UnknownSoftBody)));
}
