use crate::engine::core::Vertex3D;
use nalgebra::{Vector2, Vector3};

/// CPU side geometry, handed to [`RenderDevice::upload_mesh`](crate::rendering::RenderDevice::upload_mesh).
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        MeshData { vertices, indices }
    }

    /// A 2x2 plane lying in XZ, facing `+Y`.
    pub fn unit_plane() -> Self {
        let up = Vector3::new(0.0, 1.0, 0.0);
        let vertices = vec![
            Vertex3D::new(Vector3::new(-1.0, 0.0, -1.0), Vector2::new(0.0, 0.0), up),
            Vertex3D::new(Vector3::new(-1.0, 0.0, 1.0), Vector2::new(0.0, 1.0), up),
            Vertex3D::new(Vector3::new(1.0, 0.0, 1.0), Vector2::new(1.0, 1.0), up),
            Vertex3D::new(Vector3::new(1.0, 0.0, -1.0), Vector2::new(1.0, 0.0), up),
        ];

        MeshData::new(vertices, vec![0, 1, 2, 0, 2, 3])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
