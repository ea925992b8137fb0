use crate::utils::hex_to_rgb;
use bon::Builder;
use log::trace;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Lighting model a material is shaded with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    #[default]
    Basic,
    Lambert,
    Phong,
    Standard,
}

/// Declarative material description as it appears in component parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    pub kind: MaterialKind,
    pub color: u32,
    pub opacity: f32,
    pub transparent: bool,
    pub wireframe: bool,
}

impl Default for MaterialParams {
    fn default() -> Self {
        MaterialParams {
            kind: MaterialKind::Basic,
            color: 0xFFFFFF,
            opacity: 1.0,
            transparent: false,
            wireframe: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Material {
    #[builder(into, default = "Default Material".to_string())]
    pub name: String,
    #[builder(default)]
    pub kind: MaterialKind,
    #[builder(default = Vector3::new(1.0, 1.0, 1.0))]
    pub color: Vector3<f32>,
    #[builder(default = 1.0)]
    pub opacity: f32,
    #[builder(default = false)]
    pub transparent: bool,
    #[builder(default = false)]
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Material::builder().build()
    }
}

impl Material {
    pub fn from_params(params: &MaterialParams) -> Self {
        let opacity = params.opacity.clamp(0.0, 1.0);

        Material::builder()
            .name(format!("{:?} Material", params.kind))
            .kind(params.kind)
            .color(hex_to_rgb(params.color))
            .opacity(opacity)
            .transparent(params.transparent || opacity < 1.0)
            .wireframe(params.wireframe)
            .build()
    }
}

/// Resolves component material parameters. Missing parameters give the default material.
pub fn load_material(params: Option<&MaterialParams>) -> Material {
    let material = match params {
        Some(params) => Material::from_params(params),
        None => Material::default(),
    };

    trace!("Loaded material {:?}", material.name);
    material
}
