use crate::assets::MaterialParams;
use crate::components::{ComponentError, InvalidParamsErr};
use crate::core::Transform;
use crate::geometry::{GeometryParams, GeometryPatch};
use crate::physics::{PhysicsParams, SoftParams};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    pub cast: bool,
    pub receive: bool,
}

impl Default for ShadowParams {
    fn default() -> Self {
        ShadowParams {
            cast: true,
            receive: true,
        }
    }
}

/// Parameters every mesh component understands.
///
/// `physics` being set is what enables physics for a component. `softbody` then picks
/// a soft body over a rigid convex one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentParams {
    /// Build the native object right away when the component is created.
    pub build: bool,
    pub position: [f32; 3],
    /// Euler angles in radians.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub shadow: ShadowParams,
    pub material: MaterialParams,
    pub physics: Option<PhysicsParams>,
    pub softbody: bool,
    pub soft: SoftParams,
    /// Prefer the non-indexed layout. Ignored for soft bodies.
    pub buffer: bool,
}

impl Default for ComponentParams {
    fn default() -> Self {
        ComponentParams {
            build: true,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            shadow: ShadowParams::default(),
            material: MaterialParams::default(),
            physics: None,
            softbody: false,
            soft: SoftParams::default(),
            buffer: false,
        }
    }
}

impl ComponentParams {
    pub fn transform(&self) -> Transform {
        Transform::from_parts(
            Vector3::from(self.position),
            Vector3::from(self.rotation),
            Vector3::from(self.scale),
        )
    }

    #[inline]
    pub fn has_physics(&self) -> bool {
        self.physics.is_some()
    }

    #[inline]
    pub fn is_softbody(&self) -> bool {
        self.has_physics() && self.softbody
    }
}

/// Full parameter set of a [`Polyhedron`](crate::components::Polyhedron).
///
/// Every field is optional in JSON, anything missing takes the component default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyhedronParams {
    #[serde(flatten)]
    pub base: ComponentParams,
    pub geometry: GeometryParams,
}

impl PolyhedronParams {
    pub fn from_json(json: &str) -> Result<Self, ComponentError> {
        serde_json::from_str(json).context(InvalidParamsErr)
    }

    pub fn to_json(&self) -> Result<String, ComponentError> {
        serde_json::to_string(self).context(InvalidParamsErr)
    }

    /// Returns a copy with the geometry patch merged in.
    pub fn patched(&self, patch: GeometryPatch) -> Self {
        let mut params = self.clone();
        params.geometry.apply(patch);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialKind;

    #[test]
    fn empty_json_gives_defaults() {
        let params = PolyhedronParams::from_json("{}").unwrap();
        assert_eq!(params, PolyhedronParams::default());
        assert!(params.base.build);
        assert!(!params.base.has_physics());
    }

    #[test]
    fn flattened_base_fields_parse() {
        let params = PolyhedronParams::from_json(
            r#"{
                "position": [0, 10, 0],
                "material": {"kind": "lambert", "color": 16711680},
                "physics": {"mass": 2},
                "softbody": true,
                "geometry": {"radius": 3, "detail": 1}
            }"#,
        )
        .unwrap();

        assert_eq!(params.base.position, [0.0, 10.0, 0.0]);
        assert_eq!(params.base.material.kind, MaterialKind::Lambert);
        assert_eq!(params.base.physics.map(|p| p.mass), Some(2.0));
        assert_eq!(params.base.physics.map(|p| p.friction), Some(0.8));
        assert!(params.base.is_softbody());
        assert_eq!(params.geometry.radius, 3.0);
        assert_eq!(params.geometry.detail, 1);
        assert_eq!(params.geometry.vertex_count(), 8);
    }

    #[test]
    fn softbody_needs_physics() {
        let params = ComponentParams {
            softbody: true,
            ..Default::default()
        };
        assert!(!params.is_softbody());
    }

    #[test]
    fn malformed_json_is_invalid_params() {
        assert!(matches!(
            PolyhedronParams::from_json(r#"{"geometry": {"radius": "big"}}"#),
            Err(ComponentError::InvalidParams { .. })
        ));
    }
}
