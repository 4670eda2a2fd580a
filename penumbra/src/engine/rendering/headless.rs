//! A [`RenderDevice`] that records commands instead of drawing.
//!
//! Used for tests and for inspecting what a frame would submit. Every call is
//! appended to a [`DeviceCommand`] log, textures and meshes get sequential
//! handles, and programs report whatever uniforms were registered for their
//! name with [`HeadlessDevice::register_program`].
//!
//! The log is never trimmed on its own. Call
//! [`HeadlessDevice::clear_commands`] before a frame to see only that frame.

use crate::engine::assets::MeshData;
use crate::rendering::device::{
    ClearOps, MeshHandle, ProgramHandle, ProgramInfo, ProgramCompileErr, RenderTarget,
    TextureDescriptor, UniformDecl, UniformDecls, UniformType,
};
use crate::rendering::pipeline_state::{GlobalState, PipelineState};
use crate::rendering::uniform::UniformValue;
use crate::rendering::{DeviceError, RenderDevice, TextureHandle};
use log::trace;
use smallvec::smallvec;
use snafu::ensure;
use std::collections::{HashMap, HashSet};
use wgpu::TextureFormat;
use winit::dpi::PhysicalSize;

pub const DEFAULT_SURFACE_SIZE: PhysicalSize<u32> = PhysicalSize::new(800, 600);

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    CreateTexture {
        texture: TextureHandle,
        label: String,
        size: PhysicalSize<u32>,
        format: TextureFormat,
    },
    DestroyTexture(TextureHandle),
    LoadProgram {
        program: ProgramHandle,
        name: String,
    },
    UploadMesh(MeshHandle),
    SetGlobalState(GlobalState),
    SetPipelineState(PipelineState),
    BindRenderTarget(RenderTarget),
    Clear(ClearOps),
    BindTexture {
        slot: u32,
        texture: Option<TextureHandle>,
    },
    UseProgram(ProgramHandle),
    SetUniform {
        program: ProgramHandle,
        name: String,
        value: UniformValue,
    },
    DrawMesh(MeshHandle),
}

#[derive(Debug, Clone)]
struct HeadlessTexture {
    size: PhysicalSize<u32>,
}

#[derive(Debug)]
pub struct HeadlessDevice {
    surface_size: PhysicalSize<u32>,
    commands: Vec<DeviceCommand>,

    textures: HashMap<TextureHandle, HeadlessTexture>,
    next_texture: u32,
    next_mesh: u32,

    program_uniforms: HashMap<String, UniformDecls>,
    failing_programs: HashSet<String>,
    programs: Vec<String>,

    pipeline_state: Option<PipelineState>,
    render_target: RenderTarget,
    program: Option<ProgramHandle>,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::with_surface_size(DEFAULT_SURFACE_SIZE)
    }

    pub fn with_surface_size(surface_size: PhysicalSize<u32>) -> Self {
        HeadlessDevice {
            surface_size,
            commands: Vec::new(),
            textures: HashMap::new(),
            next_texture: 0,
            next_mesh: 0,
            program_uniforms: builtin_program_uniforms(),
            failing_programs: HashSet::new(),
            programs: Vec::new(),
            pipeline_state: None,
            render_target: RenderTarget::Window,
            program: None,
        }
    }

    /// Declares the uniforms a program of this name will report when loaded.
    pub fn register_program<I>(&mut self, name: &str, uniforms: I)
    where
        I: IntoIterator<Item = UniformDecl>,
    {
        self.program_uniforms
            .insert(name.to_string(), uniforms.into_iter().collect());
    }

    /// Makes loading a program of this name fail like a compile error.
    pub fn fail_program(&mut self, name: &str) {
        self.failing_programs.insert(name.to_string());
    }

    pub fn set_surface_size(&mut self, size: PhysicalSize<u32>) {
        self.surface_size = size;
    }

    /// Everything recorded since construction or the last
    /// [`clear_commands`](Self::clear_commands).
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// The state set last, `None` before the first set.
    pub fn pipeline_state(&self) -> Option<&PipelineState> {
        self.pipeline_state.as_ref()
    }

    pub fn render_target(&self) -> RenderTarget {
        self.render_target
    }

    pub fn current_program(&self) -> Option<ProgramHandle> {
        self.program
    }

    pub fn program_name(&self, program: ProgramHandle) -> Option<&str> {
        self.programs.get(program.id() as usize).map(String::as_str)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl RenderDevice for HeadlessDevice {
    fn surface_size(&self) -> PhysicalSize<u32> {
        self.surface_size
    }

    fn create_texture(&mut self, desc: &TextureDescriptor) -> Result<TextureHandle, DeviceError> {
        let texture = TextureHandle::new(self.next_texture);
        self.next_texture += 1;

        self.textures
            .insert(texture, HeadlessTexture { size: desc.size });
        self.commands.push(DeviceCommand::CreateTexture {
            texture,
            label: desc.label.to_string(),
            size: desc.size,
            format: desc.format,
        });

        Ok(texture)
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.textures.remove(&texture);
        self.commands.push(DeviceCommand::DestroyTexture(texture));
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<PhysicalSize<u32>> {
        self.textures.get(&texture).map(|t| t.size)
    }

    fn load_program(&mut self, name: &str) -> Result<ProgramInfo, DeviceError> {
        ensure!(
            !self.failing_programs.contains(name),
            ProgramCompileErr {
                name,
                message: "compilation disabled for this program",
            }
        );

        let program = ProgramHandle::new(self.programs.len() as u32);
        self.programs.push(name.to_string());
        self.commands.push(DeviceCommand::LoadProgram {
            program,
            name: name.to_string(),
        });

        let uniforms = self.program_uniforms.get(name).cloned().unwrap_or_default();
        trace!("Headless program {name} reports {} uniforms", uniforms.len());

        Ok(ProgramInfo {
            handle: program,
            uniforms,
        })
    }

    fn upload_mesh(&mut self, _mesh: &MeshData) -> Result<MeshHandle, DeviceError> {
        let mesh = MeshHandle::new(self.next_mesh);
        self.next_mesh += 1;
        self.commands.push(DeviceCommand::UploadMesh(mesh));
        Ok(mesh)
    }

    fn set_global_state(&mut self, state: &GlobalState) {
        self.commands.push(DeviceCommand::SetGlobalState(*state));
    }

    fn set_pipeline_state(&mut self, state: &PipelineState) {
        self.pipeline_state = Some(*state);
        self.commands.push(DeviceCommand::SetPipelineState(*state));
    }

    fn bind_render_target(&mut self, target: RenderTarget) {
        self.render_target = target;
        self.commands.push(DeviceCommand::BindRenderTarget(target));
    }

    fn clear(&mut self, ops: ClearOps) {
        self.commands.push(DeviceCommand::Clear(ops));
    }

    fn bind_texture(&mut self, slot: u32, texture: Option<TextureHandle>) {
        self.commands
            .push(DeviceCommand::BindTexture { slot, texture });
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.program = Some(program);
        self.commands.push(DeviceCommand::UseProgram(program));
    }

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: &UniformValue) {
        self.commands.push(DeviceCommand::SetUniform {
            program,
            name: name.to_string(),
            value: *value,
        });
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) {
        self.commands.push(DeviceCommand::DrawMesh(mesh));
    }
}

/// What the shipped programs declare.
fn builtin_program_uniforms() -> HashMap<String, UniformDecls> {
    use UniformType::*;

    let filter: UniformDecls = smallvec![
        UniformDecl::new("T_MVP", Mat4),
        UniformDecl::new("R_filterTexture", Sampler2D),
    ];
    let mut blur = filter.clone();
    blur.push(UniformDecl::new("R_blurScale", Vec3));

    let mut directional: UniformDecls = smallvec![
        UniformDecl::new("T_model", Mat4),
        UniformDecl::new("T_MVP", Mat4),
        UniformDecl::new("C_eyePos", Vec3),
        UniformDecl::new("R_lightMatrix", Mat4),
        UniformDecl::new("R_shadowMap", Sampler2D),
        UniformDecl::new("R_shadowVarianceMin", Float),
        UniformDecl::new("R_shadowLightBleedingReduction", Float),
        UniformDecl::new("M_specularIntensity", Float),
        UniformDecl::new("M_specularPower", Float),
        UniformDecl::new("L_color", Vec3),
        UniformDecl::new("L_intensity", Float),
    ];
    let mut point = directional.clone();
    point.extend([
        UniformDecl::new("L_position", Vec3),
        UniformDecl::new("L_range", Float),
        UniformDecl::new("L_attenuationConstant", Float),
        UniformDecl::new("L_attenuationLinear", Float),
        UniformDecl::new("L_attenuationExponent", Float),
    ]);
    let mut spot = point.clone();
    spot.extend([
        UniformDecl::new("L_direction", Vec3),
        UniformDecl::new("L_cutoff", Float),
    ]);
    directional.push(UniformDecl::new("L_direction", Vec3));

    HashMap::from([
        ("forward-directional".to_string(), directional),
        ("forward-point".to_string(), point),
        ("forward-spot".to_string(), spot),
        (
            "forward-ambient".to_string(),
            smallvec![
                UniformDecl::new("T_model", Mat4),
                UniformDecl::new("T_MVP", Mat4),
                UniformDecl::new("C_eyePos", Vec3),
                UniformDecl::new("R_ambient", Vec3),
                UniformDecl::new("M_diffuse", Sampler2D),
            ],
        ),
        (
            "shadowMapGenerator".to_string(),
            smallvec![UniformDecl::new("T_MVP", Mat4)],
        ),
        ("filter-null".to_string(), filter),
        ("filter-gausBlur7x1".to_string(), blur),
    ])
}
