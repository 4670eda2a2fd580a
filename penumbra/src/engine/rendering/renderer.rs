//! The forward renderer driving every pass of a frame.
//!
//! A frame is an ambient pass followed by, for every light, an optional
//! shadow map pass and an additive lighting pass. See
//! [`RenderingEngine::render`] for the exact order.

use super::error::*;
use crate::components::Camera;
use crate::rendering::context::{DrawCtx, RenderPassType, SceneObject};
use crate::rendering::device::{ClearOps, RenderTarget};
use crate::rendering::light_manager::{LightHandle, LightManager};
use crate::rendering::lights::{Light, ShadowTier};
use crate::rendering::offscreen_surface::OffscreenSurface;
use crate::rendering::pipeline_state::{GlobalState, PipelineScope, PipelineState};
use crate::rendering::post_process_pass::{FilterCtx, FilterQuad, reset_filter_camera};
use crate::rendering::shader::ProgramShader;
use crate::rendering::shadow_map::ShadowMapBank;
use crate::rendering::uniform::{PassUniforms, UniformStore, names};
use crate::rendering::{RenderDevice, Shader, TextureHandle};
use crate::utils::{bias_matrix, zero_scale_matrix};
use bon::Builder;
use log::{debug, info, trace, warn};
use nalgebra::{Matrix4, Vector3};
use snafu::{OptionExt, ResultExt, ensure};
use winit::dpi::PhysicalSize;

pub const AMBIENT_SHADER: &str = "forward-ambient";
pub const SHADOW_MAP_SHADER: &str = "shadowMapGenerator";
pub const NULL_FILTER_SHADER: &str = "filter-null";
pub const GAUSSIAN_BLUR_SHADER: &str = "filter-gausBlur7x1";

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct EngineConfig {
    /// Number of shadow map sizes to allocate, from `2x2` up to
    /// `2^shadow_tiers` squared.
    #[builder(default = 10)]
    pub shadow_tiers: u8,
    #[builder(default = Vector3::new(0.2, 0.2, 0.2))]
    pub ambient: Vector3<f32>,
    /// Render the lit scene into the offscreen texture and present it
    /// through the null filter.
    #[builder(default)]
    pub offscreen: bool,
    /// Variance floor handed to light shaders when the light has no shadow.
    #[builder(default = 0.00002)]
    pub fallback_variance_min: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::builder().build()
    }
}

pub struct RenderingEngine<D: RenderDevice> {
    device: D,
    config: EngineConfig,

    offscreen: OffscreenSurface,
    filter_quad: FilterQuad,

    ambient_shader: ProgramShader,
    shadow_map_shader: ProgramShader,
    null_filter: ProgramShader,
    gaussian_blur_filter: ProgramShader,

    shadow_maps: ShadowMapBank,
    alt_camera: Camera,
    light_matrix: Matrix4<f32>,
    bias_matrix: Matrix4<f32>,
    uniforms: UniformStore,

    lights: LightManager,
}

impl<D: RenderDevice> RenderingEngine<D> {
    pub fn new(device: D) -> Result<Self> {
        Self::with_config(device, EngineConfig::default())
    }

    pub fn with_config(mut device: D, config: EngineConfig) -> Result<Self> {
        let dev: &mut dyn RenderDevice = &mut device;

        let shadow_maps = ShadowMapBank::new(dev, config.shadow_tiers)?;

        let surface_size = dev.surface_size();
        let offscreen = OffscreenSurface::new(dev, surface_size)?;
        let filter_quad = FilterQuad::new(dev, offscreen.texture())?;

        let ambient_shader = load_builtin(dev, AMBIENT_SHADER, "ambient shader")?;
        let shadow_map_shader = load_builtin(dev, SHADOW_MAP_SHADER, "shadow map shader")?;
        let null_filter = load_builtin(dev, NULL_FILTER_SHADER, "null filter")?;
        let gaussian_blur_filter = load_builtin(dev, GAUSSIAN_BLUR_SHADER, "blur filter")?;

        dev.set_global_state(&GlobalState::default());
        dev.set_pipeline_state(&PipelineState::OPAQUE);

        let mut alt_camera = Camera::default();
        reset_filter_camera(&mut alt_camera);

        let mut uniforms = UniformStore::new();
        uniforms.set_sampler_slot(names::DIFFUSE, 0);
        uniforms.set_sampler_slot(names::NORMAL_MAP, 1);
        uniforms.set_sampler_slot(names::DISP_MAP, 2);
        uniforms.set_sampler_slot(names::SHADOW_MAP, 3);
        uniforms.set_sampler_slot(names::FILTER_TEXTURE, 0);
        uniforms.set_vector3(names::AMBIENT, config.ambient);

        info!(
            "Rendering engine ready: {} shadow tiers, offscreen {}",
            shadow_maps.len(),
            config.offscreen
        );

        Ok(RenderingEngine {
            device,
            config,
            offscreen,
            filter_quad,
            ambient_shader,
            shadow_map_shader,
            null_filter,
            gaussian_blur_filter,
            shadow_maps,
            alt_camera,
            light_matrix: zero_scale_matrix(),
            bias_matrix: bias_matrix(),
            uniforms,
            lights: LightManager::new(),
        })
    }

    /// Renders one frame of `root` as seen from `camera`.
    ///
    /// # Panics
    ///
    /// When a light's shadow tier is larger than the shadow map bank. Lights
    /// are checked when added, so this only happens if a light's settings
    /// were changed afterwards.
    pub fn render(&mut self, root: &dyn SceneObject, camera: &Camera) {
        let RenderingEngine {
            device,
            config,
            offscreen,
            filter_quad,
            ambient_shader,
            shadow_map_shader,
            null_filter,
            gaussian_blur_filter,
            shadow_maps,
            alt_camera,
            light_matrix,
            bias_matrix,
            uniforms,
            lights,
        } = self;
        let device: &mut dyn RenderDevice = device;

        let frame_target = if config.offscreen {
            RenderTarget::Texture(offscreen.texture())
        } else {
            RenderTarget::Window
        };

        trace!("Ambient pass");
        device.bind_render_target(frame_target);
        device.clear(ClearOps::FRAME);
        {
            let pass = PassUniforms::new(uniforms, camera, light_matrix, None);
            let mut ctx = DrawCtx::new(device, &pass, RenderPassType::Ambient);
            root.render_all(ambient_shader, &mut ctx);
        }

        for (_, light) in lights.iter() {
            match light.shadow_info() {
                Some(shadow) => {
                    let tier = shadow.tier();
                    let Some(slot) = shadow_maps.slot(tier).copied() else {
                        panic!(
                            "Shadow tier {tier} is out of range, the bank only has {} tiers",
                            shadow_maps.len()
                        );
                    };

                    trace!("Shadow pass, tier {tier}");
                    uniforms.set_texture(names::SHADOW_MAP, Some(slot.map()));
                    device.bind_render_target(slot.map().into());
                    device.clear(ClearOps::SHADOW_MAP);

                    let pose =
                        light.shadow_camera_transform(&camera.position(), &camera.rotation());
                    alt_camera.set_projection(*shadow.projection());
                    alt_camera.transform.set_position_vec(pose.position);
                    alt_camera.transform.set_rotation(pose.rotation);

                    *light_matrix = *bias_matrix * alt_camera.view_projection();

                    uniforms.set_float(names::SHADOW_VARIANCE_MIN, shadow.min_variance());
                    uniforms.set_float(
                        names::SHADOW_LIGHT_BLEEDING_REDUCTION,
                        shadow.light_bleed_reduction(),
                    );

                    {
                        let state = PipelineState::shadow_caster(shadow.flip_faces());
                        let mut scope = PipelineScope::enter(device, &state);
                        let pass = PassUniforms::new(uniforms, alt_camera, light_matrix, Some(light));
                        let mut ctx = DrawCtx::new(&mut *scope, &pass, RenderPassType::Shadow);
                        root.render_all(shadow_map_shader, &mut ctx);
                    }

                    if shadow.softness() != 0.0 {
                        let mut ctx = FilterCtx {
                            device: &mut *device,
                            uniforms: &mut *uniforms,
                            camera: &mut *alt_camera,
                            light_matrix,
                        };
                        filter_quad.blur(&mut ctx, gaussian_blur_filter, &slot, shadow.softness());
                    }
                }
                None => {
                    *light_matrix = zero_scale_matrix();
                    uniforms.set_texture(names::SHADOW_MAP, Some(shadow_maps.first().map()));
                    uniforms.set_float(names::SHADOW_VARIANCE_MIN, config.fallback_variance_min);
                    uniforms.set_float(names::SHADOW_LIGHT_BLEEDING_REDUCTION, 0.0);
                }
            }

            trace!("Light pass, {}", light.shader().name());
            device.bind_render_target(frame_target);
            let mut scope = PipelineScope::enter(device, &PipelineState::LIGHT_ACCUMULATE);
            let pass = PassUniforms::new(uniforms, camera, light_matrix, Some(light));
            let mut ctx = DrawCtx::new(&mut *scope, &pass, RenderPassType::Light);
            root.render_all(light.shader(), &mut ctx);
        }

        if config.offscreen {
            let mut ctx = FilterCtx {
                device,
                uniforms,
                camera: alt_camera,
                light_matrix,
            };
            filter_quad.apply(&mut ctx, null_filter, offscreen.texture(), RenderTarget::Window);
        }
    }

    /// Draws `source` through `shader` into `destination` with the
    /// full-screen quad.
    ///
    /// # Panics
    ///
    /// When `destination` is `source`.
    pub fn apply_filter(&mut self, shader: &dyn Shader, source: TextureHandle, destination: RenderTarget) {
        let mut ctx = FilterCtx {
            device: &mut self.device,
            uniforms: &mut self.uniforms,
            camera: &mut self.alt_camera,
            light_matrix: &self.light_matrix,
        };
        self.filter_quad.apply(&mut ctx, shader, source, destination);
    }

    /// Blurs the shadow map of `tier` by `amount` texels.
    ///
    /// # Panics
    ///
    /// When the bank has no map of that tier.
    pub fn blur_shadow_map(&mut self, tier: ShadowTier, amount: f32) {
        let Some(slot) = self.shadow_maps.slot(tier).copied() else {
            panic!(
                "Shadow tier {tier} is out of range, the bank only has {} tiers",
                self.shadow_maps.len()
            );
        };

        let mut ctx = FilterCtx {
            device: &mut self.device,
            uniforms: &mut self.uniforms,
            camera: &mut self.alt_camera,
            light_matrix: &self.light_matrix,
        };
        self.filter_quad
            .blur(&mut ctx, &self.gaussian_blur_filter, &slot, amount);
    }

    /// Registers a light. Its shadow tier, if any, must fit the shadow map
    /// bank.
    pub fn add_light(&mut self, light: Box<dyn Light>) -> Result<LightHandle> {
        if let Some(shadow) = light.shadow_info() {
            let tier = shadow.tier();
            ensure!(
                self.shadow_maps.supports(tier),
                UnsupportedShadowTierErr {
                    tier: tier.get(),
                    available: self.shadow_maps.max_tier(),
                }
            );
        }

        let handle = self.lights.insert(light);
        debug!("Added light {handle:?}, {} lights total", self.lights.len());
        Ok(handle)
    }

    pub fn remove_light(&mut self, handle: LightHandle) -> Result<Box<dyn Light>> {
        self.lights.remove(handle).context(UnknownLightErr)
    }

    pub fn light(&self, handle: LightHandle) -> Option<&dyn Light> {
        self.lights.get(handle)
    }

    pub fn light_mut(&mut self, handle: LightHandle) -> Option<&mut (dyn Light + 'static)> {
        self.lights.get_mut(handle)
    }

    pub fn lights(&self) -> &LightManager {
        &self.lights
    }

    /// Recreates the offscreen texture at the new window size.
    pub fn resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        if size.width == 0 || size.height == 0 {
            warn!("Ignoring resize to {}x{}", size.width, size.height);
            return Ok(());
        }

        self.offscreen.recreate(&mut self.device, size)?;
        self.filter_quad.set_source(self.offscreen.texture());
        debug!("Resized offscreen target to {}x{}", size.width, size.height);
        Ok(())
    }

    pub fn load_shader(&mut self, name: &str) -> Result<ProgramShader> {
        ProgramShader::load(&mut self.device, name).context(DeviceErr { what: "shader" })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn uniforms(&self) -> &UniformStore {
        &self.uniforms
    }

    /// For parameters of custom filters.
    pub fn uniforms_mut(&mut self) -> &mut UniformStore {
        &mut self.uniforms
    }

    /// The light matrix of the last light rendered.
    pub fn light_matrix(&self) -> &Matrix4<f32> {
        &self.light_matrix
    }

    pub fn bias_matrix(&self) -> &Matrix4<f32> {
        &self.bias_matrix
    }

    pub fn shadow_maps(&self) -> &ShadowMapBank {
        &self.shadow_maps
    }

    /// The offscreen color texture, the usual source of a filter.
    pub fn temp_target(&self) -> TextureHandle {
        self.offscreen.texture()
    }

    pub fn null_filter(&self) -> &ProgramShader {
        &self.null_filter
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn load_builtin(
    device: &mut dyn RenderDevice,
    name: &str,
    what: &'static str,
) -> Result<ProgramShader> {
    ProgramShader::load(device, name).context(DeviceErr { what })
}
