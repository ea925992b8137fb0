use crate::assets::Mesh;
use crate::core::Transform;
use crate::physics::{
    EmptySoftBodyErr, NodeOutOfRangeErr, PhysicsError, PhysicsParams, SoftParams,
    UnindexedSoftBodyErr,
};
use itertools::Itertools;
use log::{debug, trace};
use nalgebra::{Point3, Vector3};
use snafu::{OptionExt, ensure};

const LENGTH_EPSILON: f32 = 1e-6;
const VOLUME_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct SoftNode {
    pub position: Vector3<f32>,
    pub previous: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub inv_mass: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftLink {
    pub a: u32,
    pub b: u32,
    pub rest_length: f32,
}

/// A deformable body simulated with position based dynamics.
///
/// Every vertex of an indexed mesh becomes a node and every unique triangle edge a
/// distance constraint. Closed meshes, where every edge is shared by exactly two
/// triangles, additionally keep their volume scaled by [`SoftParams::pressure`].
/// Node positions live in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftBody {
    nodes: Vec<SoftNode>,
    links: Vec<SoftLink>,
    triangles: Vec<[u32; 3]>,
    rest_volume: f32,
    params: PhysicsParams,
    soft: SoftParams,
    mesh: Mesh,
}

impl SoftBody {
    pub fn new(
        mesh: &Mesh,
        transform: &Transform,
        params: PhysicsParams,
        soft: SoftParams,
    ) -> Result<Self, PhysicsError> {
        ensure!(mesh.is_indexed(), UnindexedSoftBodyErr);
        let triangles = mesh.triangles();
        ensure!(!triangles.is_empty() && mesh.vertex_count() > 0, EmptySoftBodyErr);

        let inv_mass = if params.is_static() {
            0.0
        } else {
            mesh.vertex_count() as f32 / params.mass
        };

        let mut world_mesh = mesh.clone();
        world_mesh.set_positions(
            mesh.positions()
                .map(|p| transform.transform_point(&Point3::from(p)).coords)
                .collect::<Vec<_>>(),
        );

        let nodes: Vec<SoftNode> = world_mesh
            .positions()
            .map(|position| SoftNode {
                position,
                previous: position,
                velocity: Vector3::zeros(),
                inv_mass,
            })
            .collect();

        let edge_uses = triangles
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .map(|(a, b)| (a.min(b), a.max(b)))
            .counts();
        let closed = edge_uses.values().all(|&uses| uses == 2);

        let links = edge_uses
            .into_keys()
            .sorted()
            .map(|(a, b)| SoftLink {
                a,
                b,
                rest_length: (nodes[b as usize].position - nodes[a as usize].position).norm(),
            })
            .collect::<Vec<_>>();

        // an open surface encloses nothing, pressure only applies to closed ones
        let rest_volume = if closed {
            signed_volume(&nodes, &triangles)
        } else {
            0.0
        };
        world_mesh.recompute_normals();

        debug!(
            "Created soft body: {} nodes, {} links, rest volume {rest_volume}",
            nodes.len(),
            links.len()
        );

        Ok(SoftBody {
            nodes,
            links,
            triangles,
            rest_volume,
            params,
            soft,
            mesh: world_mesh,
        })
    }

    #[inline]
    pub fn nodes(&self) -> &[SoftNode] {
        &self.nodes
    }

    #[inline]
    pub fn links(&self) -> &[SoftLink] {
        &self.links
    }

    #[inline]
    pub fn rest_volume(&self) -> f32 {
        self.rest_volume
    }

    pub fn volume(&self) -> f32 {
        signed_volume(&self.nodes, &self.triangles)
    }

    /// The deformed surface in world space.
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn center(&self) -> Vector3<f32> {
        let sum: Vector3<f32> = self.nodes.iter().map(|n| n.position).sum();
        sum / self.nodes.len().max(1) as f32
    }

    #[inline]
    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    #[inline]
    pub fn soft_params(&self) -> &SoftParams {
        &self.soft
    }

    /// Pins a node in place.
    pub fn append_anchor(&mut self, node: usize) -> Result<(), PhysicsError> {
        let count = self.nodes.len();
        let node = self
            .nodes
            .get_mut(node)
            .context(NodeOutOfRangeErr { node, count })?;
        node.inv_mass = 0.0;
        node.velocity = Vector3::zeros();
        Ok(())
    }

    /// Rebuilds nodes and links from a new surface. Anchors and velocities are reset.
    pub fn set_geometry(&mut self, mesh: &Mesh, transform: &Transform) -> Result<(), PhysicsError> {
        *self = SoftBody::new(mesh, transform, self.params, self.soft)?;
        Ok(())
    }

    /// Advances the body by `dt`.
    ///
    /// `resolve` receives a node position and returns the surface point it should be
    /// pushed to when it ended up inside another collider.
    pub fn step<F>(&mut self, dt: f32, gravity: &Vector3<f32>, mut resolve: F)
    where
        F: FnMut(&Point3<f32>) -> Option<Point3<f32>>,
    {
        if dt <= 0.0 {
            return;
        }

        let damping = (1.0 - self.params.damping * dt).clamp(0.0, 1.0);
        for node in self.nodes.iter_mut().filter(|n| n.inv_mass > 0.0) {
            node.velocity = (node.velocity + gravity * dt) * damping;
            node.previous = node.position;
            node.position += node.velocity * dt;
        }

        for _ in 0..self.soft.iterations.max(1) {
            self.solve_links();
            self.solve_volume();
        }

        let friction = self.params.friction.clamp(0.0, 1.0);
        for node in self.nodes.iter_mut().filter(|n| n.inv_mass > 0.0) {
            let Some(surface) = resolve(&Point3::from(node.position)) else {
                continue;
            };
            let push = surface.coords - node.position;
            node.position = surface.coords;

            if let Some(normal) = push.try_normalize(LENGTH_EPSILON) {
                let travel = node.position - node.previous;
                let tangential = travel - normal * travel.dot(&normal);
                node.position -= tangential * friction;
            }
        }

        for node in self.nodes.iter_mut() {
            node.velocity = if node.inv_mass > 0.0 {
                (node.position - node.previous) / dt
            } else {
                Vector3::zeros()
            };
        }

        self.mesh.set_positions(self.nodes.iter().map(|n| n.position));
        self.mesh.recompute_normals();
        trace!("Soft body stepped, volume {}", self.volume());
    }

    fn solve_links(&mut self) {
        let stiffness = self.soft.stiffness.clamp(0.0, 1.0);

        for link in &self.links {
            let (a, b) = (link.a as usize, link.b as usize);
            let wa = self.nodes[a].inv_mass;
            let wb = self.nodes[b].inv_mass;
            let w = wa + wb;
            if w <= 0.0 {
                continue;
            }

            let delta = self.nodes[b].position - self.nodes[a].position;
            let length = delta.norm();
            if length < LENGTH_EPSILON {
                continue;
            }

            let correction = delta * ((length - link.rest_length) / (length * w) * stiffness);
            self.nodes[a].position += correction * wa;
            self.nodes[b].position -= correction * wb;
        }
    }

    fn solve_volume(&mut self) {
        if self.soft.pressure <= 0.0 || self.rest_volume.abs() < VOLUME_EPSILON {
            return;
        }

        let target = self.rest_volume * self.soft.pressure;
        let error = signed_volume(&self.nodes, &self.triangles) - target;

        let mut gradients = vec![Vector3::zeros(); self.nodes.len()];
        for &[a, b, c] in &self.triangles {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let pa = self.nodes[a].position;
            let pb = self.nodes[b].position;
            let pc = self.nodes[c].position;
            gradients[a] += pb.cross(&pc) / 6.0;
            gradients[b] += pc.cross(&pa) / 6.0;
            gradients[c] += pa.cross(&pb) / 6.0;
        }

        let denominator: f32 = self
            .nodes
            .iter()
            .zip(&gradients)
            .map(|(node, g)| node.inv_mass * g.norm_squared())
            .sum();
        if denominator < VOLUME_EPSILON {
            return;
        }

        let lambda = -error / denominator;
        for (node, gradient) in self.nodes.iter_mut().zip(&gradients) {
            node.position += gradient * (lambda * node.inv_mass);
        }
    }
}

/// Volume enclosed by a triangle surface, positive for counter-clockwise outward faces.
fn signed_volume(nodes: &[SoftNode], triangles: &[[u32; 3]]) -> f32 {
    triangles
        .iter()
        .map(|&[a, b, c]| {
            let pa = nodes[a as usize].position;
            let pb = nodes[b as usize].position;
            let pc = nodes[c as usize].position;
            pa.dot(&pb.cross(&pc))
        })
        .sum::<f32>()
        / 6.0
}
