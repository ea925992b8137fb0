use crate::physics::{PhysicsError, SoftBody, UnknownSoftBodyErr};
use log::debug;
use nalgebra::{Point3, Vector3};
use rapier3d::prelude::*;
use slotmap::{SlotMap, new_key_type};
use snafu::OptionExt;
use std::time::{Duration, Instant};

new_key_type! { pub struct SoftBodyHandle; }

pub struct PhysicsManager {
    pub gravity: Vector3<f32>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
    pub soft_bodies: SlotMap<SoftBodyHandle, SoftBody>,
    pub last_update: Instant,
    pub timestep: Duration,
}

const EARTH_GRAVITY: f32 = 9.81;

impl Default for PhysicsManager {
    fn default() -> Self {
        let timestep = Duration::from_millis(1000 / 60);
        let integration_parameters = IntegrationParameters {
            dt: timestep.as_secs_f32(),
            ..IntegrationParameters::default()
        };

        PhysicsManager {
            gravity: Vector3::new(0.0, -EARTH_GRAVITY, 0.0),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            soft_bodies: SlotMap::with_key(),
            last_update: Instant::now(),
            timestep,
        }
    }
}

impl PhysicsManager {
    /// Advances rigid bodies by one timestep, then every soft body.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.query_pipeline.update(&self.collider_set);

        let dt = self.integration_parameters.dt;
        let gravity = self.gravity;
        let Self {
            soft_bodies,
            query_pipeline,
            rigid_body_set,
            collider_set,
            ..
        } = self;

        for body in soft_bodies.values_mut() {
            body.step(dt, &gravity, |point: &Point3<f32>| {
                let (_, projection) = query_pipeline.project_point(
                    rigid_body_set,
                    collider_set,
                    point,
                    false,
                    QueryFilter::default(),
                )?;
                projection.is_inside.then_some(projection.point)
            });
        }
    }

    /// Runs as many fixed steps as the wall clock time since the last call requires.
    /// Returns the number of steps taken.
    pub fn update(&mut self) -> u32 {
        let mut steps = 0;
        while self.last_update.elapsed() > self.timestep {
            self.last_update += self.timestep;
            self.step();
            steps += 1;
        }
        steps
    }

    pub fn insert_soft_body(&mut self, body: SoftBody) -> SoftBodyHandle {
        let handle = self.soft_bodies.insert(body);
        debug!("Inserted soft body {handle:?}");
        handle
    }

    pub fn soft_body(&self, handle: SoftBodyHandle) -> Result<&SoftBody, PhysicsError> {
        self.soft_bodies.get(handle).context(UnknownSoftBodyErr)
    }

    pub fn soft_body_mut(&mut self, handle: SoftBodyHandle) -> Result<&mut SoftBody, PhysicsError> {
        self.soft_bodies.get_mut(handle).context(UnknownSoftBodyErr)
    }

    pub fn remove_soft_body(&mut self, handle: SoftBodyHandle) -> Option<SoftBody> {
        let body = self.soft_bodies.remove(handle);
        if body.is_some() {
            debug!("Removed soft body {handle:?}");
        }
        body
    }

    /// Removes a rigid body together with every collider attached to it.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        let body = self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        if body.is_some() {
            debug!("Removed rigid body {handle:?}");
        }
        body
    }
}
