use crate::assets::load_material;
use crate::components::{
    Component, ComponentError, NativeKind, NativeMesh, NotBuiltErr, PolyhedronParams,
};
use crate::core::Transform;
use crate::geometry::{GeometryError, GeometryLayout, GeometryPatch, PolyhedronGeometry};
use crate::physics::PhysicsManager;
use futures::future::{Ready, ready};
use log::{debug, warn};
use snafu::OptionExt;

/// A mesh shaped by a polyhedron, optionally simulated as a rigid or soft body.
///
/// The geometry parameters stay live after building: every setter regenerates the
/// surface and hands it to the native object, which re-synchronizes its physics body.
#[derive(Debug)]
pub struct Polyhedron {
    params: PolyhedronParams,
    native: Option<NativeMesh>,
    ready: bool,
}

impl Polyhedron {
    pub const NAME: &'static str = "Polyhedron";

    /// Creates the component and, unless `build` is unset, builds and wraps it right away.
    pub fn new(params: PolyhedronParams, physics: &mut PhysicsManager) -> Result<Self, ComponentError> {
        let mut polyhedron = Polyhedron::unbuilt(params);

        if polyhedron.params.base.build {
            polyhedron.build(physics)?;
            polyhedron.wrap(physics)?;
        }

        Ok(polyhedron)
    }

    /// Creates the component without a native object.
    pub fn unbuilt(params: PolyhedronParams) -> Self {
        Polyhedron {
            params,
            native: None,
            ready: false,
        }
    }

    pub fn from_json(json: &str, physics: &mut PhysicsManager) -> Result<Self, ComponentError> {
        Polyhedron::new(PolyhedronParams::from_json(json)?, physics)
    }

    #[inline]
    pub fn params(&self) -> &PolyhedronParams {
        &self.params
    }

    /// Whether the component has been wrapped and is usable in a scene.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn native_kind(&self) -> Option<NativeKind> {
        self.native.as_ref().map(NativeMesh::kind)
    }

    pub fn native_mut(&mut self) -> Option<&mut NativeMesh> {
        self.native.as_mut()
    }

    /// [`Component::build`], delivered as a future that is already resolved.
    pub fn build_async(&mut self, physics: &mut PhysicsManager) -> Ready<Result<(), ComponentError>> {
        ready(self.build(physics))
    }

    /// Generates the surface for a parameter set. Soft bodies always get the indexed
    /// layout since their nodes have to be shared between faces.
    pub fn build_geometry(params: &PolyhedronParams) -> Result<PolyhedronGeometry, GeometryError> {
        let layout = if params.base.buffer && !params.base.is_softbody() {
            GeometryLayout::Buffer
        } else {
            GeometryLayout::Indexed
        };

        PolyhedronGeometry::new(params.geometry.clone(), layout)
    }

    /// Merges a partial geometry update into the parameters and returns the result.
    pub fn update_params(&mut self, patch: GeometryPatch) -> &PolyhedronParams {
        self.params.geometry.apply(patch);
        &self.params
    }

    /// Applies a geometry patch and pushes the regenerated surface to the native object.
    ///
    /// Nothing changes if the patched parameters do not describe a valid polyhedron.
    pub fn update_geometry(
        &mut self,
        physics: &mut PhysicsManager,
        patch: GeometryPatch,
    ) -> Result<(), ComponentError> {
        let params = self.params.patched(patch);
        let geometry = Polyhedron::build_geometry(&params)?;

        match self.native.as_mut() {
            Some(native) => native.set_geometry(physics, geometry)?,
            None => warn!("{} is not built yet, new geometry will be used on build", Self::NAME),
        }

        self.params = params;
        Ok(())
    }

    pub fn set_vertices(&mut self, physics: &mut PhysicsManager, vertices: Vec<f32>) -> Result<(), ComponentError> {
        self.update_geometry(
            physics,
            GeometryPatch {
                vertices: Some(vertices),
                ..Default::default()
            },
        )
    }

    pub fn set_indices(&mut self, physics: &mut PhysicsManager, indices: Vec<u32>) -> Result<(), ComponentError> {
        self.update_geometry(
            physics,
            GeometryPatch {
                indices: Some(indices),
                ..Default::default()
            },
        )
    }

    pub fn set_radius(&mut self, physics: &mut PhysicsManager, radius: f32) -> Result<(), ComponentError> {
        self.update_geometry(
            physics,
            GeometryPatch {
                radius: Some(radius),
                ..Default::default()
            },
        )
    }

    pub fn set_detail(&mut self, physics: &mut PhysicsManager, detail: u32) -> Result<(), ComponentError> {
        self.update_geometry(
            physics,
            GeometryPatch {
                detail: Some(detail),
                ..Default::default()
            },
        )
    }

    // Getters read what the native geometry was built from, not the pending parameters.

    pub fn vertices(&self) -> Option<&[f32]> {
        Some(&self.native.as_ref()?.geometry().parameters().vertices)
    }

    pub fn indices(&self) -> Option<&[u32]> {
        Some(&self.native.as_ref()?.geometry().parameters().indices)
    }

    pub fn radius(&self) -> Option<f32> {
        Some(self.native.as_ref()?.geometry().parameters().radius)
    }

    pub fn detail(&self) -> Option<u32> {
        Some(self.native.as_ref()?.geometry().parameters().detail)
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.native.as_ref().map(NativeMesh::transform)
    }

    pub fn set_transform(&mut self, physics: &mut PhysicsManager, transform: Transform) -> Result<(), ComponentError> {
        let native = self.native.as_mut().context(NotBuiltErr { name: Self::NAME })?;
        native.set_transform(physics, transform)?;
        Ok(())
    }

    /// Takes over the parameters of another polyhedron. If the other one is built,
    /// this one is built too and placed where the other currently is.
    pub fn copy_from(&mut self, other: &Polyhedron, physics: &mut PhysicsManager) -> Result<&mut Self, ComponentError> {
        self.params = other.params.clone();

        if let Some(source) = other.native.as_ref() {
            self.build(physics)?;
            self.wrap(physics)?;

            let native = self.native.as_mut().context(NotBuiltErr { name: Self::NAME })?;
            native.set_transform(physics, *source.transform())?;
            native.shadow = source.shadow;
        }

        Ok(self)
    }

    /// An independent copy with its own native object and physics body.
    pub fn duplicate(&self, physics: &mut PhysicsManager) -> Result<Polyhedron, ComponentError> {
        let mut copy = Polyhedron::unbuilt(PolyhedronParams::default());
        copy.copy_from(self, physics)?;
        Ok(copy)
    }
}

impl Component for Polyhedron {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn build(&mut self, physics: &mut PhysicsManager) -> Result<(), ComponentError> {
        let base = &self.params.base;
        let material = load_material(Some(&base.material));
        let geometry = Polyhedron::build_geometry(&self.params)?;
        let transform = base.transform();

        let native = match base.physics {
            Some(physics_params) if base.softbody => NativeMesh::soft(
                physics,
                geometry,
                material,
                transform,
                physics_params,
                base.soft,
            )?,
            Some(physics_params) => {
                NativeMesh::convex(physics, geometry, material, transform, physics_params)?
            }
            None => NativeMesh::plain(geometry, material, transform),
        };

        debug!("Built {} as {}", Self::NAME, native.kind());

        // the old object stays untouched until its replacement exists
        if let Some(previous) = self.native.replace(native) {
            previous.remove_from(physics);
        }
        self.ready = false;
        Ok(())
    }

    fn wrap(&mut self, physics: &mut PhysicsManager) -> Result<(), ComponentError> {
        let native = self.native.as_mut().context(NotBuiltErr { name: Self::NAME })?;

        native.set_transform(physics, self.params.base.transform())?;
        native.shadow = self.params.base.shadow;

        self.ready = true;
        Ok(())
    }

    fn native(&self) -> Option<&NativeMesh> {
        self.native.as_ref()
    }

    fn fixed_update(&mut self, physics: &mut PhysicsManager) {
        if let Some(native) = self.native.as_mut() {
            if let Err(e) = native.sync_from_physics(physics) {
                warn!("{} lost its physics body: {e}", Self::NAME);
            }
        }
    }

    fn delete(&mut self, physics: &mut PhysicsManager) {
        if let Some(native) = self.native.take() {
            native.remove_from(physics);
            debug!("Deleted {} ({})", Self::NAME, native.kind());
        }
        self.ready = false;
    }
}
