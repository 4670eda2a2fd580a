//! The boundary between the renderer and a GPU API.
//!
//! [`RenderDevice`] is an immediate-mode command stream: every call takes
//! effect in program order on the calling thread. Implementations translate
//! it into their API of choice. [`HeadlessDevice`](super::HeadlessDevice)
//! records the calls instead of executing them.

use crate::engine::assets::MeshData;
use crate::rendering::pipeline_state::{GlobalState, PipelineState};
use crate::rendering::uniform::UniformValue;
use smallvec::SmallVec;
use snafu::Snafu;
use wgpu::{Color, FilterMode, TextureFormat};
use winit::dpi::PhysicalSize;

macro_rules! gpu_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            pub const fn id(self) -> u32 {
                self.0
            }
        }
    };
}

gpu_handle!(
    /// A 2D image that can be sampled or rendered into.
    TextureHandle
);
gpu_handle!(MeshHandle);
gpu_handle!(ProgramHandle);

/// Where draw calls end up.
///
/// `Window` is the default framebuffer. It stands in wherever a texture
/// destination is expected but none is given.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum RenderTarget {
    #[default]
    Window,
    Texture(TextureHandle),
}

impl From<TextureHandle> for RenderTarget {
    fn from(texture: TextureHandle) -> Self {
        RenderTarget::Texture(texture)
    }
}

impl From<Option<TextureHandle>> for RenderTarget {
    fn from(texture: Option<TextureHandle>) -> Self {
        texture.map_or(RenderTarget::Window, RenderTarget::Texture)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor<'a> {
    pub label: &'a str,
    pub size: PhysicalSize<u32>,
    pub format: TextureFormat,
    pub filter: FilterMode,
    /// Clamp lookups outside `[0, 1]` to the edge instead of repeating.
    pub clamp: bool,
}

/// What a [`RenderDevice::clear`] call resets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearOps {
    pub color: Option<Color>,
    pub depth: bool,
}

impl ClearOps {
    pub const CLEAR_COLOR: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Unshadowed texels stay green, which makes them easy to spot in a
    /// captured frame and gives the variance test a fixed starting point.
    pub const SHADOW_CLEAR_COLOR: Color = Color {
        r: 0.0,
        g: 1.0,
        b: 0.0,
        a: 0.0,
    };

    pub const FRAME: ClearOps = ClearOps {
        color: Some(Self::CLEAR_COLOR),
        depth: true,
    };

    pub const SHADOW_MAP: ClearOps = ClearOps {
        color: Some(Self::SHADOW_CLEAR_COLOR),
        depth: true,
    };

    pub const DEPTH_ONLY: ClearOps = ClearOps {
        color: None,
        depth: true,
    };
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformType {
    Int,
    Float,
    Vec3,
    Mat4,
    Sampler2D,
}

/// A uniform as reported by program reflection.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct UniformDecl {
    pub name: String,
    pub ty: UniformType,
}

impl UniformDecl {
    pub fn new(name: impl Into<String>, ty: UniformType) -> Self {
        UniformDecl {
            name: name.into(),
            ty,
        }
    }
}

pub type UniformDecls = SmallVec<[UniformDecl; 8]>;

/// A linked program and its active uniforms.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInfo {
    pub handle: ProgramHandle,
    pub uniforms: UniformDecls,
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub))]
pub enum DeviceError {
    #[snafu(display("Shader program {name} failed to build: {message}"))]
    ProgramCompile { name: String, message: String },

    #[snafu(display("Texture {label} could not be created: {message}"))]
    TextureCreation { label: String, message: String },

    #[snafu(display("Mesh upload failed: {message}"))]
    MeshUpload { message: String },
}

pub trait RenderDevice {
    /// Size of the default framebuffer.
    fn surface_size(&self) -> PhysicalSize<u32>;

    fn create_texture(&mut self, desc: &TextureDescriptor) -> Result<TextureHandle, DeviceError>;
    fn destroy_texture(&mut self, texture: TextureHandle);
    fn texture_size(&self, texture: TextureHandle) -> Option<PhysicalSize<u32>>;

    fn load_program(&mut self, name: &str) -> Result<ProgramInfo, DeviceError>;
    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<MeshHandle, DeviceError>;

    /// State that is set once and never changes between passes.
    fn set_global_state(&mut self, state: &GlobalState);
    fn set_pipeline_state(&mut self, state: &PipelineState);

    fn bind_render_target(&mut self, target: RenderTarget);
    fn clear(&mut self, ops: ClearOps);

    /// Binds `texture` to the sampler `slot`. `None` unbinds it.
    fn bind_texture(&mut self, slot: u32, texture: Option<TextureHandle>);
    fn use_program(&mut self, program: ProgramHandle);
    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: &UniformValue);
    fn draw_mesh(&mut self, mesh: MeshHandle);
}
