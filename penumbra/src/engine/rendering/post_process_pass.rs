use crate::components::Camera;
use crate::core::Transform;
use crate::engine::assets::{Material, MeshData};
use crate::rendering::device::{ClearOps, MeshHandle, RenderTarget};
use crate::rendering::error::*;
use crate::rendering::shadow_map::ShadowMapSlot;
use crate::rendering::uniform::{PassUniforms, UniformStore, names};
use crate::rendering::{RenderDevice, Shader, TextureHandle};
use crate::utils::MATRIX4_ID;
use log::trace;
use nalgebra::{Matrix4, UnitQuaternion, Vector3};
use snafu::ResultExt;
use std::f32::consts::{FRAC_PI_2, PI};

/// What a filter pass reads and writes besides its shader.
pub struct FilterCtx<'a> {
    pub device: &'a mut dyn RenderDevice,
    pub uniforms: &'a mut UniformStore,
    pub camera: &'a mut Camera,
    pub light_matrix: &'a Matrix4<f32>,
}

/// The screen-covering quad every filter is drawn with.
#[derive(Debug)]
pub struct FilterQuad {
    mesh: MeshHandle,
    transform: Transform,
    material: Material,
}

impl FilterQuad {
    pub fn new(device: &mut dyn RenderDevice, source: TextureHandle) -> Result<Self> {
        let mesh = device
            .upload_mesh(&MeshData::unit_plane())
            .context(DeviceErr { what: "filter quad" })?;

        // the unit plane lies in XZ; stand it up to face the filter camera
        let mut transform = Transform::new();
        transform.set_uniform_scale(1.0);
        transform.rotate(&Vector3::x_axis(), FRAC_PI_2);
        transform.rotate(&Vector3::z_axis(), PI);

        let material = Material::builder()
            .name("Filter")
            .diffuse(source)
            .specular_intensity(1.0)
            .specular_power(8.0)
            .build();

        Ok(FilterQuad {
            mesh,
            transform,
            material,
        })
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_source(&mut self, source: TextureHandle) {
        self.material.diffuse = Some(source);
    }

    /// Draws `source` through `shader` into `destination`.
    ///
    /// # Panics
    ///
    /// When `destination` is `source` itself. Nothing has been submitted to
    /// the device at that point.
    pub fn apply(
        &self,
        ctx: &mut FilterCtx<'_>,
        shader: &dyn Shader,
        source: TextureHandle,
        destination: RenderTarget,
    ) {
        assert_ne!(
            RenderTarget::Texture(source),
            destination,
            "A filter can't read from the texture it renders into"
        );
        trace!("Filter {} from {source:?} into {destination:?}", shader.name());

        ctx.device.bind_render_target(destination);
        ctx.uniforms.set_texture(names::FILTER_TEXTURE, Some(source));

        reset_filter_camera(ctx.camera);
        ctx.device.clear(ClearOps::DEPTH_ONLY);

        let model = self.transform.matrix();
        let pass = PassUniforms::new(ctx.uniforms, ctx.camera, ctx.light_matrix, None);
        shader.bind(ctx.device);
        shader.update_uniforms(ctx.device, &model, &self.material, &pass);
        ctx.device.draw_mesh(self.mesh);

        ctx.uniforms.set_texture(names::FILTER_TEXTURE, None);
    }

    /// Separable blur of a shadow map: horizontally into the scratch map,
    /// then vertically back into the map. `amount` is in texels.
    pub fn blur(
        &self,
        ctx: &mut FilterCtx<'_>,
        shader: &dyn Shader,
        slot: &ShadowMapSlot,
        amount: f32,
    ) {
        let size = slot.size();

        ctx.uniforms.set_vector3(
            names::BLUR_SCALE,
            Vector3::new(amount / size.width as f32, 0.0, 0.0),
        );
        self.apply(ctx, shader, slot.map(), slot.scratch().into());

        ctx.uniforms.set_vector3(
            names::BLUR_SCALE,
            Vector3::new(0.0, amount / size.height as f32, 0.0),
        );
        self.apply(ctx, shader, slot.scratch(), slot.map().into());
    }
}

/// Identity projection at the origin, looking back along `-Z` at the quad.
pub fn reset_filter_camera(camera: &mut Camera) {
    camera.set_projection(MATRIX4_ID);
    camera.transform.set_position(0.0, 0.0, 0.0);
    camera
        .transform
        .set_rotation(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI));
}
