#![allow(dead_code)]

use nalgebra::Matrix4;
use penumbra::assets::Material;
use penumbra::components::{Attenuation, DirectionalLight, PointLight, SpotLight};
use penumbra::rendering::lights::{ShadowSettings, ShadowTier};
use penumbra::rendering::{
    DeviceCommand, DrawCtx, EngineConfig, HeadlessDevice, MeshHandle, RenderPassType,
    RenderTarget, RenderingEngine, SceneObject, Shader,
};
use std::cell::RefCell;

pub type Engine = RenderingEngine<HeadlessDevice>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn engine() -> Engine {
    engine_with(EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> Engine {
    init_logging();
    RenderingEngine::with_config(HeadlessDevice::new(), config).unwrap()
}

pub fn tier(t: u8) -> ShadowTier {
    ShadowTier::new(t).unwrap()
}

pub fn shader(engine: &mut Engine, name: &str) -> Box<dyn Shader> {
    Box::new(engine.load_shader(name).unwrap())
}

pub fn point_light(engine: &mut Engine) -> PointLight {
    let shader = shader(engine, PointLight::SHADER);
    PointLight::new(shader, [1.0, 1.0, 1.0].into(), 0.5, Attenuation::default())
}

pub fn directional_light(engine: &mut Engine, settings: ShadowSettings) -> DirectionalLight {
    let shader = shader(engine, DirectionalLight::SHADER);
    DirectionalLight::new(shader, [1.0, 0.9, 0.8].into(), 0.4).with_shadows(settings, 80.0)
}

pub fn spot_light(engine: &mut Engine, settings: ShadowSettings) -> SpotLight {
    let shader = shader(engine, SpotLight::SHADER);
    SpotLight::new(
        shader,
        [0.0, 1.0, 1.0].into(),
        0.8,
        Attenuation::new(0.0, 0.0, 0.1),
        90f32.to_radians(),
    )
    .with_shadows(settings)
}

/// Draws one mesh per `render_all` call and remembers every call.
pub struct RecordingScene {
    pub mesh: MeshHandle,
    pub material: Material,
    pub calls: RefCell<Vec<(String, RenderPassType)>>,
}

impl RecordingScene {
    pub fn new() -> Self {
        RecordingScene {
            mesh: MeshHandle::new(1000),
            material: Material::builder().name("Recorded").build(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn passes(&self) -> Vec<RenderPassType> {
        self.calls.borrow().iter().map(|(_, pass)| *pass).collect()
    }

    pub fn shaders(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(name, _)| name.clone()).collect()
    }
}

impl SceneObject for RecordingScene {
    fn render_all(&self, shader: &dyn Shader, ctx: &mut DrawCtx<'_>) {
        self.calls
            .borrow_mut()
            .push((shader.name().to_string(), ctx.pass_type));

        shader.bind(ctx.device);
        shader.update_uniforms(ctx.device, &Matrix4::identity(), &self.material, ctx.uniforms);
        ctx.device.draw_mesh(self.mesh);
    }
}

pub fn draw_count(commands: &[DeviceCommand]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, DeviceCommand::DrawMesh(_)))
        .count()
}

pub fn target_binds(commands: &[DeviceCommand]) -> Vec<RenderTarget> {
    commands
        .iter()
        .filter_map(|c| match c {
            DeviceCommand::BindRenderTarget(target) => Some(*target),
            _ => None,
        })
        .collect()
}

/// Render target binds to any map of the engine's shadow bank.
pub fn shadow_target_binds(engine: &Engine) -> usize {
    let bank = engine.shadow_maps();
    target_binds(engine.device().commands())
        .into_iter()
        .filter(|target| {
            bank.iter().any(|slot| {
                *target == RenderTarget::Texture(slot.map())
                    || *target == RenderTarget::Texture(slot.scratch())
            })
        })
        .count()
}

/// Values of every `set_uniform` of `name`, in submission order.
pub fn uniform_values(
    commands: &[DeviceCommand],
    name: &str,
) -> Vec<penumbra::rendering::uniform::UniformValue> {
    commands
        .iter()
        .filter_map(|c| match c {
            DeviceCommand::SetUniform {
                name: uniform,
                value,
                ..
            } if uniform == name => Some(*value),
            _ => None,
        })
        .collect()
}
