use nalgebra::{Vector2, Vector3};
use static_assertions::const_assert_eq;
use wgpu::{BufferAddress, VertexAttribute, VertexFormat};

const VEC2_SIZE: BufferAddress = size_of::<Vector2<f32>>() as BufferAddress;
const VEC3_SIZE: BufferAddress = size_of::<Vector3<f32>>() as BufferAddress;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    pub position: Vector3<f32>,
    pub tex_coord: Vector2<f32>,
    pub normal: Vector3<f32>,
}

const_assert_eq!(size_of::<Vertex3D>(), 32);

impl Vertex3D {
    pub const fn new(position: Vector3<f32>, tex_coord: Vector2<f32>, normal: Vector3<f32>) -> Self {
        Vertex3D {
            position,
            tex_coord,
            normal,
        }
    }

    pub const fn continuous_descriptor<'a>() -> wgpu::VertexBufferLayout<'a> {
        const LAYOUT: wgpu::VertexBufferLayout = wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex3D>() as BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    format: VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                VertexAttribute {
                    format: VertexFormat::Float32x2,
                    offset: VEC3_SIZE,
                    shader_location: 1,
                },
                VertexAttribute {
                    format: VertexFormat::Float32x3,
                    offset: VEC3_SIZE + VEC2_SIZE,
                    shader_location: 2,
                },
            ],
        };

        LAYOUT
    }
}
