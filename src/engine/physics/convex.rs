use crate::assets::Mesh;
use crate::core::Transform;
use crate::physics::{
    DegenerateHullErr, MissingBodyErr, MissingColliderErr, PhysicsError, PhysicsManager,
    PhysicsParams,
};
use log::debug;
use nalgebra::{Point3, Vector3};
use rapier3d::prelude::*;
use snafu::OptionExt;

/// A rigid body whose collider is the convex hull of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    params: PhysicsParams,
    scale: Vector3<f32>,
}

impl ConvexBody {
    pub fn new(
        physics: &mut PhysicsManager,
        mesh: &Mesh,
        transform: &Transform,
        params: PhysicsParams,
    ) -> Result<Self, PhysicsError> {
        let scale = transform.scale();
        let points = hull_points(mesh, &scale);

        let collider = ColliderBuilder::convex_hull(&points)
            .context(DegenerateHullErr {
                points: points.len(),
            })?
            .friction(params.friction)
            .restitution(params.restitution);
        let collider = if params.is_static() {
            collider.build()
        } else {
            collider.mass(params.mass).build()
        };

        let body = if params.is_static() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        }
        .position(transform.isometry())
        .linear_damping(params.damping)
        .angular_damping(params.damping)
        .build();

        let body_handle = physics.rigid_body_set.insert(body);
        let collider_handle = physics.collider_set.insert_with_parent(
            collider,
            body_handle,
            &mut physics.rigid_body_set,
        );

        debug!(
            "Created convex body {body_handle:?} from {} hull points (mass {})",
            points.len(),
            params.mass
        );

        Ok(ConvexBody {
            body_handle,
            collider_handle,
            params,
            scale,
        })
    }

    #[inline]
    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn body<'a>(&self, physics: &'a PhysicsManager) -> Option<&'a RigidBody> {
        physics.rigid_body_set.get(self.body_handle)
    }

    pub fn body_mut<'a>(&self, physics: &'a mut PhysicsManager) -> Option<&'a mut RigidBody> {
        physics.rigid_body_set.get_mut(self.body_handle)
    }

    pub fn collider<'a>(&self, physics: &'a PhysicsManager) -> Option<&'a Collider> {
        physics.collider_set.get(self.collider_handle)
    }

    /// Swaps the collider shape for the hull of a new mesh, keeping the body state.
    pub fn set_geometry(&mut self, physics: &mut PhysicsManager, mesh: &Mesh) -> Result<(), PhysicsError> {
        let points = hull_points(mesh, &self.scale);
        let shape = SharedShape::convex_hull(&points).context(DegenerateHullErr {
            points: points.len(),
        })?;

        let collider = physics
            .collider_set
            .get_mut(self.collider_handle)
            .context(MissingColliderErr)?;
        collider.set_shape(shape);
        if !self.params.is_static() {
            collider.set_mass(self.params.mass);
        }

        debug!("Resynced convex body {:?} with {} hull points", self.body_handle, points.len());
        Ok(())
    }

    /// Teleports the body to the transform. A changed scale rebuilds the hull.
    pub fn set_transform(
        &mut self,
        physics: &mut PhysicsManager,
        mesh: &Mesh,
        transform: &Transform,
    ) -> Result<(), PhysicsError> {
        if self.scale != transform.scale() {
            self.scale = transform.scale();
            self.set_geometry(physics, mesh)?;
        }

        let body = self.body_mut(physics).context(MissingBodyErr)?;
        body.set_position(transform.isometry(), true);
        body.set_linvel(Vector3::zeros(), true);
        body.set_angvel(Vector3::zeros(), true);
        Ok(())
    }

    /// Copies the simulated pose into the transform.
    pub fn sync_to_transform(&self, physics: &PhysicsManager, transform: &mut Transform) -> Result<(), PhysicsError> {
        let body = self.body(physics).context(MissingBodyErr)?;
        transform.set_position_vec(*body.translation());
        transform.set_rotation(*body.rotation());
        Ok(())
    }

    pub fn remove(&self, physics: &mut PhysicsManager) {
        physics.remove_rigid_body(self.body_handle);
    }
}

fn hull_points(mesh: &Mesh, scale: &Vector3<f32>) -> Vec<Point3<f32>> {
    mesh.positions()
        .map(|p| Point3::from(p.component_mul(scale)))
        .collect()
}
