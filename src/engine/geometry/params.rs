use crate::geometry::presets::{CUBE_INDICES, CUBE_VERTICES};
use crate::geometry::{
    DetailTooHighErr, GeometryError, IndexArityErr, IndexOutOfRangeErr, InstructionErr,
    InvalidRadiusErr, MAX_DETAIL, NonFiniteVertexErr, TooManyInstructionsErr, VertexArityErr,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::{ensure, ResultExt};

pub const DEFAULT_RADIUS: f32 = 6.0;
pub const DEFAULT_DETAIL: u32 = 2;

/// Positional argument order of the geometry group, `[vertices, indices, radius, detail]`.
pub const GEOMETRY_INSTRUCTIONS: [&str; 4] = ["vertices", "indices", "radius", "detail"];

/// Inputs of a polyhedron: a flat `x, y, z` vertex list, a flat triangle index list,
/// the radius every generated vertex is projected onto and the subdivision detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryInput")]
pub struct GeometryParams {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub radius: f32,
    pub detail: u32,
}

impl Default for GeometryParams {
    fn default() -> Self {
        GeometryParams {
            vertices: CUBE_VERTICES.to_vec(),
            indices: CUBE_INDICES.to_vec(),
            radius: DEFAULT_RADIUS,
            detail: DEFAULT_DETAIL,
        }
    }
}

/// A partial geometry update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryPatch {
    pub vertices: Option<Vec<f32>>,
    pub indices: Option<Vec<u32>>,
    pub radius: Option<f32>,
    pub detail: Option<u32>,
}

impl GeometryParams {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        ensure!(
            self.vertices.len() % 3 == 0,
            VertexArityErr {
                len: self.vertices.len()
            }
        );
        ensure!(
            self.indices.len() % 3 == 0,
            IndexArityErr {
                len: self.indices.len()
            }
        );
        ensure!(
            self.vertices.iter().all(|v| v.is_finite()),
            NonFiniteVertexErr
        );

        let vertex_count = self.vertex_count();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return IndexOutOfRangeErr {
                index,
                vertex_count,
            }
            .fail();
        }

        ensure!(
            self.radius.is_finite() && self.radius > 0.0,
            InvalidRadiusErr {
                radius: self.radius
            }
        );
        ensure!(
            self.detail <= MAX_DETAIL,
            DetailTooHighErr {
                detail: self.detail
            }
        );

        Ok(())
    }

    pub fn apply(&mut self, patch: GeometryPatch) {
        if let Some(vertices) = patch.vertices {
            self.vertices = vertices;
        }
        if let Some(indices) = patch.indices {
            self.indices = indices;
        }
        if let Some(radius) = patch.radius {
            self.radius = radius;
        }
        if let Some(detail) = patch.detail {
            self.detail = detail;
        }
    }

    fn apply_instruction(&mut self, name: &'static str, value: Value) -> Result<(), GeometryError> {
        match name {
            "vertices" => self.vertices = serde_json::from_value(value).context(InstructionErr { name })?,
            "indices" => self.indices = serde_json::from_value(value).context(InstructionErr { name })?,
            "radius" => self.radius = serde_json::from_value(value).context(InstructionErr { name })?,
            "detail" => self.detail = serde_json::from_value(value).context(InstructionErr { name })?,
            _ => {}
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GeometryInput {
    Positional(Vec<Value>),
    Named(NamedGeometry),
}

#[derive(Deserialize)]
#[serde(default)]
struct NamedGeometry {
    #[serde(alias = "verticesOfCube")]
    vertices: Vec<f32>,
    #[serde(alias = "indicesOfFaces")]
    indices: Vec<u32>,
    radius: f32,
    detail: u32,
}

impl Default for NamedGeometry {
    fn default() -> Self {
        let defaults = GeometryParams::default();
        NamedGeometry {
            vertices: defaults.vertices,
            indices: defaults.indices,
            radius: defaults.radius,
            detail: defaults.detail,
        }
    }
}

impl TryFrom<GeometryInput> for GeometryParams {
    type Error = GeometryError;

    fn try_from(input: GeometryInput) -> Result<Self, Self::Error> {
        match input {
            GeometryInput::Named(named) => Ok(GeometryParams {
                vertices: named.vertices,
                indices: named.indices,
                radius: named.radius,
                detail: named.detail,
            }),
            GeometryInput::Positional(values) => {
                ensure!(
                    values.len() <= GEOMETRY_INSTRUCTIONS.len(),
                    TooManyInstructionsErr { count: values.len() }
                );

                let mut params = GeometryParams::default();
                for (name, value) in GEOMETRY_INSTRUCTIONS.into_iter().zip(values) {
                    params.apply_instruction(name, value)?;
                }
                Ok(params)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_cube() {
        let params = GeometryParams::default();
        assert_eq!(params.vertex_count(), 8);
        assert_eq!(params.face_count(), 12);
        assert_eq!(params.radius, 6.0);
        assert_eq!(params.detail, 2);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let params = GeometryParams {
            indices: vec![0, 1, 8],
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(GeometryError::IndexOutOfRange {
                index: 8,
                vertex_count: 8
            })
        ));
    }

    #[test]
    fn radius_must_be_positive() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let params = GeometryParams {
                radius,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(GeometryError::InvalidRadius { .. })
            ));
        }
    }

    #[test]
    fn patch_only_touches_set_fields() {
        let mut params = GeometryParams::default();
        params.apply(GeometryPatch {
            radius: Some(2.5),
            ..Default::default()
        });
        assert_eq!(params.radius, 2.5);
        assert_eq!(params.detail, DEFAULT_DETAIL);
        assert_eq!(params.vertices, CUBE_VERTICES.to_vec());
    }

    #[test]
    fn positional_instructions_fill_in_order() {
        let params: GeometryParams =
            serde_json::from_str("[[0,0,1, 1,0,0, 0,1,0], [0,1,2], 3.5]").unwrap();
        assert_eq!(params.vertex_count(), 3);
        assert_eq!(params.indices, vec![0, 1, 2]);
        assert_eq!(params.radius, 3.5);
        assert_eq!(params.detail, DEFAULT_DETAIL);
    }

    #[test]
    fn named_fields_accept_legacy_names() {
        let params: GeometryParams =
            serde_json::from_str(r#"{"verticesOfCube": [1,0,0, 0,1,0, 0,0,1], "indicesOfFaces": [0,1,2], "detail": 0}"#)
                .unwrap();
        assert_eq!(params.vertex_count(), 3);
        assert_eq!(params.detail, 0);
        assert_eq!(params.radius, DEFAULT_RADIUS);
    }

    #[test]
    fn too_many_positional_values_fail() {
        let result: Result<GeometryParams, _> = serde_json::from_str("[[], [], 1.0, 0, 7]");
        assert!(result.is_err());
    }
}
