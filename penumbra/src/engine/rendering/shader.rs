use crate::engine::assets::Material;
use crate::rendering::device::{ProgramHandle, ProgramInfo, UniformDecl, UniformDecls, UniformType};
use crate::rendering::uniform::{UniformSource, UniformValue};
use crate::rendering::{DeviceError, RenderDevice};
use log::{trace, warn};
use nalgebra::Matrix4;

pub trait Shader {
    fn name(&self) -> &str;

    /// Makes this shader the one subsequent draws use.
    fn bind(&self, device: &mut dyn RenderDevice);

    fn update_uniforms(
        &self,
        device: &mut dyn RenderDevice,
        model: &Matrix4<f32>,
        material: &Material,
        uniforms: &dyn UniformSource,
    );
}

/// A [`Shader`] backed by a device program.
///
/// Uniform values are looked up by the prefix of their name:
///
/// | prefix | source                                                        |
/// |--------|---------------------------------------------------------------|
/// | `T_`   | transforms: `T_model`, `T_MVP`                                |
/// | `C_`   | the pass camera: `C_eyePos`                                   |
/// | `R_`   | the engine: `R_lightMatrix` or anything in the uniform store  |
/// | `M_`   | the material                                                  |
/// | `L_`   | the active light                                              |
///
/// Samplers (`R_` and `M_`) get their texture unit from the store's sampler
/// slots, and the texture is bound to that unit as a side effect.
#[derive(Debug, Clone)]
pub struct ProgramShader {
    name: String,
    program: ProgramHandle,
    uniforms: UniformDecls,
}

impl ProgramShader {
    pub fn load(device: &mut dyn RenderDevice, name: &str) -> Result<Self, DeviceError> {
        let ProgramInfo { handle, uniforms } = device.load_program(name)?;
        trace!("Loaded program {name} with {} uniforms", uniforms.len());

        Ok(ProgramShader {
            name: name.to_string(),
            program: handle,
            uniforms,
        })
    }

    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    pub fn uniforms(&self) -> &[UniformDecl] {
        &self.uniforms
    }

    fn resolve(
        decl: &UniformDecl,
        device: &mut dyn RenderDevice,
        model: &Matrix4<f32>,
        material: &Material,
        uniforms: &dyn UniformSource,
    ) -> Option<UniformValue> {
        let (prefix, key) = decl.name.split_once('_')?;

        match (prefix, decl.ty) {
            ("T", UniformType::Mat4) => match key {
                "model" => Some(UniformValue::Mat4(*model)),
                "MVP" => Some(UniformValue::Mat4(uniforms.camera().view_projection() * model)),
                _ => None,
            },
            ("C", UniformType::Vec3) if key == "eyePos" => {
                Some(UniformValue::Vec3(uniforms.camera().position()))
            }
            ("R", UniformType::Mat4) if key == "lightMatrix" => {
                Some(UniformValue::Mat4(uniforms.light_matrix() * model))
            }
            ("R", UniformType::Sampler2D) => {
                let slot = uniforms.sampler_slot(key)?;
                device.bind_texture(slot, uniforms.texture(key));
                Some(UniformValue::Int(slot as i32))
            }
            ("R", UniformType::Vec3) => uniforms.vector3(key).map(UniformValue::Vec3),
            ("R", UniformType::Float) => uniforms.float(key).map(UniformValue::Float),
            ("M", UniformType::Sampler2D) => {
                let slot = uniforms.sampler_slot(key)?;
                device.bind_texture(slot, material.texture(key));
                Some(UniformValue::Int(slot as i32))
            }
            ("M", UniformType::Float) => material.float(key).map(UniformValue::Float),
            ("M", UniformType::Vec3) => material.vector3(key).map(UniformValue::Vec3),
            ("L", _) => uniforms.active_light()?.uniform(key),
            _ => None,
        }
    }
}

impl Shader for ProgramShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, device: &mut dyn RenderDevice) {
        device.use_program(self.program);
    }

    fn update_uniforms(
        &self,
        device: &mut dyn RenderDevice,
        model: &Matrix4<f32>,
        material: &Material,
        uniforms: &dyn UniformSource,
    ) {
        for decl in &self.uniforms {
            match Self::resolve(decl, device, model, material, uniforms) {
                Some(value) => device.set_uniform(self.program, &decl.name, &value),
                None => warn!("{}: nothing provides uniform {}", self.name, decl.name),
            }
        }
    }
}
