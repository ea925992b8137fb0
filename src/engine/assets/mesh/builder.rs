use crate::assets::{Mesh, MeshVertexData};
use crate::core::Vertex3D;

#[derive(Debug, Clone)]
pub struct MeshBuilder {
    vertices: Vec<Vertex3D>,
    indices: Option<Vec<u32>>,
    recompute_normals: bool,
}

impl MeshBuilder {
    pub fn new(vertices: Vec<Vertex3D>) -> Self {
        MeshBuilder {
            vertices,
            indices: None,
            recompute_normals: false,
        }
    }

    pub fn build(self) -> Mesh {
        let mut mesh = Mesh {
            data: MeshVertexData::new(self.vertices, self.indices),
        };

        if self.recompute_normals {
            mesh.recompute_normals();
        }

        mesh
    }

    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Derive normals from the triangles instead of keeping the given ones.
    pub fn with_computed_normals(mut self) -> Self {
        self.recompute_normals = true;
        self
    }
}

impl From<MeshBuilder> for Mesh {
    fn from(builder: MeshBuilder) -> Self {
        builder.build()
    }
}
