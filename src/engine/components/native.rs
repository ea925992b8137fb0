use crate::assets::{Material, Mesh};
use crate::components::ShadowParams;
use crate::core::Transform;
use crate::geometry::PolyhedronGeometry;
use crate::physics::{
    ConvexBody, PhysicsError, PhysicsManager, PhysicsParams, SoftBody, SoftBodyHandle, SoftParams,
};
use log::debug;
use std::fmt::{Display, Formatter};

/// Which kind of native object a component ended up wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Mesh,
    ConvexMesh,
    SoftMesh,
}

impl Display for NativeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NativeKind::Mesh => "Mesh",
            NativeKind::ConvexMesh => "ConvexMesh",
            NativeKind::SoftMesh => "SoftMesh",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NativeBody {
    Plain,
    Convex(ConvexBody),
    Soft(SoftBodyHandle),
}

/// The renderable (and possibly physical) object a mesh component owns.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeMesh {
    geometry: PolyhedronGeometry,
    material: Material,
    transform: Transform,
    pub shadow: ShadowParams,
    body: NativeBody,
}

impl NativeMesh {
    pub fn plain(geometry: PolyhedronGeometry, material: Material, transform: Transform) -> Self {
        NativeMesh {
            geometry,
            material,
            transform,
            shadow: ShadowParams::default(),
            body: NativeBody::Plain,
        }
    }

    pub fn convex(
        physics: &mut PhysicsManager,
        geometry: PolyhedronGeometry,
        material: Material,
        transform: Transform,
        params: PhysicsParams,
    ) -> Result<Self, PhysicsError> {
        let body = ConvexBody::new(physics, geometry.mesh(), &transform, params)?;

        Ok(NativeMesh {
            geometry,
            material,
            transform,
            shadow: ShadowParams::default(),
            body: NativeBody::Convex(body),
        })
    }

    pub fn soft(
        physics: &mut PhysicsManager,
        geometry: PolyhedronGeometry,
        material: Material,
        transform: Transform,
        params: PhysicsParams,
        soft: SoftParams,
    ) -> Result<Self, PhysicsError> {
        let body = SoftBody::new(geometry.mesh(), &transform, params, soft)?;
        let handle = physics.insert_soft_body(body);

        Ok(NativeMesh {
            geometry,
            material,
            transform,
            shadow: ShadowParams::default(),
            body: NativeBody::Soft(handle),
        })
    }

    pub fn kind(&self) -> NativeKind {
        match self.body {
            NativeBody::Plain => NativeKind::Mesh,
            NativeBody::Convex(_) => NativeKind::ConvexMesh,
            NativeBody::Soft(_) => NativeKind::SoftMesh,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &PolyhedronGeometry {
        &self.geometry
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn body(&self) -> &NativeBody {
        &self.body
    }

    /// The surface as it should be drawn. Soft bodies return their deformed,
    /// world space surface; everything else the local geometry.
    pub fn surface<'a>(&'a self, physics: &'a PhysicsManager) -> Result<&'a Mesh, PhysicsError> {
        match &self.body {
            NativeBody::Soft(handle) => Ok(physics.soft_body(*handle)?.mesh()),
            _ => Ok(self.geometry.mesh()),
        }
    }

    /// Replaces the geometry and brings the physics body in line with it.
    pub fn set_geometry(
        &mut self,
        physics: &mut PhysicsManager,
        geometry: PolyhedronGeometry,
    ) -> Result<(), PhysicsError> {
        match &mut self.body {
            NativeBody::Plain => {}
            NativeBody::Convex(body) => body.set_geometry(physics, geometry.mesh())?,
            NativeBody::Soft(handle) => physics
                .soft_body_mut(*handle)?
                .set_geometry(geometry.mesh(), &self.transform)?,
        }

        debug!(
            "{} geometry replaced ({} vertices)",
            self.kind(),
            geometry.mesh().vertex_count()
        );
        self.geometry = geometry;
        Ok(())
    }

    /// Moves the object. Physical bodies are teleported, soft bodies rebuilt in place.
    pub fn set_transform(&mut self, physics: &mut PhysicsManager, transform: Transform) -> Result<(), PhysicsError> {
        if self.transform == transform {
            return Ok(());
        }

        match &mut self.body {
            NativeBody::Plain => {}
            NativeBody::Convex(body) => body.set_transform(physics, self.geometry.mesh(), &transform)?,
            NativeBody::Soft(handle) => physics
                .soft_body_mut(*handle)?
                .set_geometry(self.geometry.mesh(), &transform)?,
        }

        self.transform = transform;
        Ok(())
    }

    /// Pulls the simulated pose of a rigid body into the transform.
    pub fn sync_from_physics(&mut self, physics: &PhysicsManager) -> Result<(), PhysicsError> {
        match &self.body {
            NativeBody::Convex(body) => body.sync_to_transform(physics, &mut self.transform),
            NativeBody::Soft(handle) => physics.soft_body(*handle).map(|_| ()),
            NativeBody::Plain => Ok(()),
        }
    }

    pub fn remove_from(&self, physics: &mut PhysicsManager) {
        match &self.body {
            NativeBody::Plain => {}
            NativeBody::Convex(body) => body.remove(physics),
            NativeBody::Soft(handle) => {
                physics.remove_soft_body(*handle);
            }
        }
    }
}
