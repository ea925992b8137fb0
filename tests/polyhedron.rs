mod common;

use futures::executor::block_on;
use hedra::components::{
    Component, ComponentError, ComponentParams, NativeBody, NativeKind, Polyhedron,
    PolyhedronParams,
};
use hedra::geometry::{GeometryLayout, GeometryPatch, PolyhedronPreset};
use hedra::nalgebra::{Point3, Vector3};
use hedra::physics::{PhysicsManager, PhysicsParams};

fn params(physics: Option<PhysicsParams>, softbody: bool, buffer: bool) -> PolyhedronParams {
    PolyhedronParams {
        base: ComponentParams {
            physics,
            softbody,
            buffer,
            ..Default::default()
        },
        geometry: PolyhedronPreset::Cube.params(1.0, 1),
    }
}

#[test]
fn defaults_build_a_plain_mesh() {
    common::init_logging();
    let mut physics = PhysicsManager::default();
    let poly = Polyhedron::new(PolyhedronParams::default(), &mut physics).unwrap();

    assert!(poly.is_ready());
    assert_eq!(poly.native_kind(), Some(NativeKind::Mesh));
    assert_eq!(poly.radius(), Some(6.0));
    assert_eq!(poly.detail(), Some(2));
    assert_eq!(poly.vertices().map(<[f32]>::len), Some(24));
    assert_eq!(poly.indices().map(<[u32]>::len), Some(36));
    assert_eq!(physics.rigid_body_set.len(), 0);
}

#[test]
fn native_kind_follows_physics_flags() {
    let mut physics = PhysicsManager::default();

    let plain = Polyhedron::new(params(None, true, false), &mut physics).unwrap();
    assert_eq!(plain.native_kind(), Some(NativeKind::Mesh));

    let convex = Polyhedron::new(params(Some(PhysicsParams::default()), false, false), &mut physics).unwrap();
    assert_eq!(convex.native_kind(), Some(NativeKind::ConvexMesh));
    assert_eq!(physics.rigid_body_set.len(), 1);

    let soft = Polyhedron::new(params(Some(PhysicsParams::default()), true, false), &mut physics).unwrap();
    assert_eq!(soft.native_kind(), Some(NativeKind::SoftMesh));
    assert_eq!(physics.soft_bodies.len(), 1);
}

#[test]
fn layout_follows_buffer_flag_unless_soft() {
    let mut physics = PhysicsManager::default();

    let buffered = Polyhedron::new(params(None, false, true), &mut physics).unwrap();
    let layout = buffered.native().unwrap().geometry().layout();
    assert_eq!(layout, GeometryLayout::Buffer);

    let indexed = Polyhedron::new(params(None, false, false), &mut physics).unwrap();
    assert_eq!(indexed.native().unwrap().geometry().layout(), GeometryLayout::Indexed);

    let soft = Polyhedron::new(params(Some(PhysicsParams::default()), true, true), &mut physics).unwrap();
    assert_eq!(soft.native().unwrap().geometry().layout(), GeometryLayout::Indexed);
}

#[test]
fn unbuilt_component_has_no_native() {
    let mut physics = PhysicsManager::default();
    let mut poly = Polyhedron::unbuilt(PolyhedronParams::default());

    assert!(!poly.is_built());
    assert!(!poly.is_ready());
    assert_eq!(poly.radius(), None);
    assert!(matches!(poly.wrap(&mut physics), Err(ComponentError::NotBuilt { .. })));

    // setters on an unbuilt component only update the parameters
    poly.set_radius(&mut physics, 2.0).unwrap();
    assert_eq!(poly.params().geometry.radius, 2.0);
    assert_eq!(poly.radius(), None);

    poly.build(&mut physics).unwrap();
    assert_eq!(poly.radius(), Some(2.0));
}

#[test]
fn build_flag_false_defers_building() {
    let mut physics = PhysicsManager::default();
    let mut p = params(Some(PhysicsParams::default()), false, false);
    p.base.build = false;

    let mut poly = Polyhedron::new(p, &mut physics).unwrap();
    assert!(!poly.is_built());
    assert_eq!(physics.rigid_body_set.len(), 0);

    block_on(poly.build_async(&mut physics)).unwrap();
    assert!(poly.is_built());
    assert!(!poly.is_ready());
    assert_eq!(physics.rigid_body_set.len(), 1);

    poly.wrap(&mut physics).unwrap();
    assert!(poly.is_ready());
}

#[test]
fn setters_regenerate_geometry() {
    let mut physics = PhysicsManager::default();
    let mut poly = Polyhedron::new(params(None, false, false), &mut physics).unwrap();
    let before = poly.native().unwrap().geometry().mesh().vertex_count();

    poly.set_detail(&mut physics, 3).unwrap();
    assert_eq!(poly.detail(), Some(3));
    assert!(poly.native().unwrap().geometry().mesh().vertex_count() > before);

    poly.set_radius(&mut physics, 2.5).unwrap();
    let mesh_radius = poly.native().unwrap().geometry().mesh().bounding_radius();
    assert!((mesh_radius - 2.5).abs() < 1e-4);

    let tetra = PolyhedronPreset::Tetrahedron;
    poly.set_vertices(&mut physics, tetra.vertices().to_vec()).unwrap_err();
    poly.update_geometry(
        &mut physics,
        GeometryPatch {
            vertices: Some(tetra.vertices().to_vec()),
            indices: Some(tetra.indices().to_vec()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(poly.vertices(), Some(tetra.vertices()));
    assert_eq!(poly.indices(), Some(tetra.indices()));
}

#[test]
fn invalid_setter_leaves_component_untouched() {
    let mut physics = PhysicsManager::default();
    let mut poly = Polyhedron::new(params(None, false, false), &mut physics).unwrap();
    let snapshot = poly.params().clone();

    assert!(matches!(
        poly.set_radius(&mut physics, 0.0),
        Err(ComponentError::Geometry { .. })
    ));
    assert!(poly.set_indices(&mut physics, vec![0, 1, 99]).is_err());
    assert!(poly.set_detail(&mut physics, 10_000).is_err());

    assert_eq!(poly.params(), &snapshot);
    assert_eq!(poly.radius(), Some(1.0));
}

#[test]
fn setters_resync_convex_collider() {
    let mut physics = PhysicsManager::default();
    let mut poly = Polyhedron::new(params(Some(PhysicsParams::default()), false, false), &mut physics).unwrap();

    let collider_extent = |poly: &Polyhedron, physics: &PhysicsManager| {
        let Some(NativeBody::Convex(body)) = poly.native().map(|n| n.body()) else {
            panic!("expected a convex body");
        };
        body.collider(physics).unwrap().shape().compute_local_aabb().extents().x
    };

    let before = collider_extent(&poly, &physics);
    poly.set_radius(&mut physics, 3.0).unwrap();
    let after = collider_extent(&poly, &physics);

    assert!((after / before - 3.0).abs() < 1e-3);
    assert_eq!(physics.rigid_body_set.len(), 1);
}

#[test]
fn setters_rebuild_soft_body() {
    let mut physics = PhysicsManager::default();
    let mut poly = Polyhedron::new(params(Some(PhysicsParams::default()), true, false), &mut physics).unwrap();

    let nodes = |poly: &Polyhedron, physics: &PhysicsManager| {
        poly.native().unwrap().surface(physics).unwrap().vertex_count()
    };

    assert_eq!(nodes(&poly, &physics), 26);
    poly.set_detail(&mut physics, 0).unwrap();
    assert_eq!(nodes(&poly, &physics), 8);
    assert_eq!(physics.soft_bodies.len(), 1);
}

#[test]
fn update_params_merges_patch() {
    let mut poly = Polyhedron::unbuilt(PolyhedronParams::default());
    let merged = poly.update_params(GeometryPatch {
        detail: Some(0),
        ..Default::default()
    });

    assert_eq!(merged.geometry.detail, 0);
    assert_eq!(merged.geometry.radius, 6.0);
}

#[test]
fn wrap_places_native_at_params_transform() {
    let mut physics = PhysicsManager::default();
    let mut p = params(Some(PhysicsParams::default()), false, false);
    p.base.position = [1.0, 2.0, 3.0];
    p.base.shadow.cast = false;

    let poly = Polyhedron::new(p, &mut physics).unwrap();
    let native = poly.native().unwrap();

    assert_eq!(native.transform().position(), Vector3::new(1.0, 2.0, 3.0));
    assert!(!native.shadow.cast);
    assert!(native.shadow.receive);
}

#[test]
fn duplicate_gets_its_own_body() {
    let mut physics = PhysicsManager::default();
    let mut p = params(Some(PhysicsParams::default()), false, false);
    p.base.position = [0.0, 4.0, 0.0];
    let poly = Polyhedron::new(p, &mut physics).unwrap();

    let copy = poly.duplicate(&mut physics).unwrap();

    assert_eq!(physics.rigid_body_set.len(), 2);
    assert_eq!(copy.params(), poly.params());
    assert_eq!(copy.radius(), poly.radius());
    assert_eq!(copy.transform(), poly.transform());
    assert!(copy.is_ready());
}

#[test]
fn duplicate_of_unbuilt_stays_unbuilt() {
    let mut physics = PhysicsManager::default();
    let poly = Polyhedron::unbuilt(PolyhedronParams::default());

    let copy = poly.duplicate(&mut physics).unwrap();
    assert!(!copy.is_built());
}

#[test]
fn delete_releases_physics() {
    let mut physics = PhysicsManager::default();
    let mut rigid = Polyhedron::new(params(Some(PhysicsParams::default()), false, false), &mut physics).unwrap();
    let mut soft = Polyhedron::new(params(Some(PhysicsParams::default()), true, false), &mut physics).unwrap();

    rigid.delete(&mut physics);
    soft.delete(&mut physics);

    assert_eq!(physics.rigid_body_set.len(), 0);
    assert_eq!(physics.collider_set.len(), 0);
    assert!(physics.soft_bodies.is_empty());
    assert!(!rigid.is_built());
}

#[test]
fn rebuilding_replaces_old_body() {
    let mut physics = PhysicsManager::default();
    let mut poly = Polyhedron::new(params(Some(PhysicsParams::default()), false, false), &mut physics).unwrap();

    poly.build(&mut physics).unwrap();
    poly.build(&mut physics).unwrap();
    assert_eq!(physics.rigid_body_set.len(), 1);
}

#[test]
fn from_json_with_positional_geometry() {
    let mut physics = PhysicsManager::default();
    let poly = Polyhedron::from_json(
        r#"{
            "geometry": [[1,1,1, -1,-1,1, -1,1,-1, 1,-1,-1], [2,1,0, 0,3,2, 1,3,0, 2,3,1], 2, 0],
            "physics": {"mass": 1},
            "material": {"kind": "standard", "opacity": 0.25}
        }"#,
        &mut physics,
    )
    .unwrap();

    assert_eq!(poly.native_kind(), Some(NativeKind::ConvexMesh));
    assert_eq!(poly.radius(), Some(2.0));
    assert_eq!(poly.detail(), Some(0));
    assert!(poly.native().unwrap().material().transparent);
}

#[test]
fn rotation_params_apply_in_xyz_order() {
    let mut physics = PhysicsManager::default();
    let mut p = params(Some(PhysicsParams::default()), false, false);
    p.base.rotation = [std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2, 0.0];

    let poly = Polyhedron::new(p, &mut physics).unwrap();
    let transform = poly.transform().unwrap();
    let moved = transform.transform_point(&Point3::new(1.0, 0.0, 0.0));
    assert!((moved - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-5, "{moved:?}");

    let Some(NativeBody::Convex(body)) = poly.native().map(|n| n.body()) else {
        panic!("expected a convex body");
    };
    let rotation = body.body(&physics).unwrap().rotation();
    let moved = rotation * Vector3::new(1.0, 0.0, 0.0);
    assert!((moved - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-5, "{moved:?}");
}

#[test]
fn failed_rebuild_keeps_previous_body() {
    common::init_logging();
    let mut physics = PhysicsManager::default();
    let mut poly = Polyhedron::new(params(Some(PhysicsParams::default()), false, false), &mut physics).unwrap();

    poly.update_params(GeometryPatch {
        radius: Some(0.0),
        ..Default::default()
    });
    assert!(matches!(poly.build(&mut physics), Err(ComponentError::Geometry { .. })));

    assert!(poly.is_built());
    assert!(poly.is_ready());
    assert_eq!(poly.native_kind(), Some(NativeKind::ConvexMesh));
    assert_eq!(poly.radius(), Some(1.0));
    assert_eq!(physics.rigid_body_set.len(), 1);
    assert_eq!(physics.collider_set.len(), 1);

    // a valid parameter set rebuilds over the kept body
    poly.update_params(GeometryPatch {
        radius: Some(2.0),
        ..Default::default()
    });
    poly.build(&mut physics).unwrap();
    assert_eq!(poly.radius(), Some(2.0));
    assert_eq!(physics.rigid_body_set.len(), 1);
}

#[test]
fn failed_soft_rebuild_keeps_previous_body() {
    let mut physics = PhysicsManager::default();
    let mut poly = Polyhedron::new(params(Some(PhysicsParams::default()), true, false), &mut physics).unwrap();

    poly.update_params(GeometryPatch {
        indices: Some(vec![0, 1, 42]),
        ..Default::default()
    });
    assert!(poly.build(&mut physics).is_err());

    assert_eq!(poly.native_kind(), Some(NativeKind::SoftMesh));
    assert_eq!(physics.soft_bodies.len(), 1);
    assert!(poly.native().unwrap().surface(&physics).is_ok());
}
