//! Named values shaders read while a pass is running.
//!
//! The [`UniformStore`] is written by the engine before each pass and read
//! back by [`Shader::update_uniforms`](crate::rendering::Shader::update_uniforms)
//! through the [`UniformSource`] of that pass. Values are overwritten pass
//! by pass; the last write wins.

use crate::components::Camera;
use crate::rendering::lights::Light;
use crate::rendering::TextureHandle;
use nalgebra::{Matrix4, Vector3};
use std::collections::HashMap;

/// Names of the values the engine itself writes.
pub mod names {
    pub const DIFFUSE: &str = "diffuse";
    pub const NORMAL_MAP: &str = "normalMap";
    pub const DISP_MAP: &str = "dispMap";
    pub const SHADOW_MAP: &str = "shadowMap";
    pub const FILTER_TEXTURE: &str = "filterTexture";

    pub const AMBIENT: &str = "ambient";
    pub const BLUR_SCALE: &str = "blurScale";
    pub const SHADOW_VARIANCE_MIN: &str = "shadowVarianceMin";
    pub const SHADOW_LIGHT_BLEEDING_REDUCTION: &str = "shadowLightBleedingReduction";
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vector3<f32>),
    Mat4(Matrix4<f32>),
}

#[derive(Debug, Default, Clone)]
pub struct UniformStore {
    sampler_slots: HashMap<String, u32>,
    vectors: HashMap<String, Vector3<f32>>,
    floats: HashMap<String, f32>,
    textures: HashMap<String, TextureHandle>,
}

impl UniformStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sampler_slot(&mut self, name: &str, slot: u32) {
        self.sampler_slots.insert(name.to_string(), slot);
    }

    pub fn sampler_slot(&self, name: &str) -> Option<u32> {
        self.sampler_slots.get(name).copied()
    }

    pub fn set_vector3(&mut self, name: &str, value: Vector3<f32>) {
        self.vectors.insert(name.to_string(), value);
    }

    pub fn vector3(&self, name: &str) -> Option<Vector3<f32>> {
        self.vectors.get(name).copied()
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Sets or, with `None`, removes a texture binding.
    pub fn set_texture(&mut self, name: &str, texture: Option<TextureHandle>) {
        match texture {
            Some(texture) => {
                self.textures.insert(name.to_string(), texture);
            }
            None => {
                self.textures.remove(name);
            }
        }
    }

    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(name).copied()
    }
}

/// What a shader may ask for while its uniforms are being updated.
pub trait UniformSource {
    fn sampler_slot(&self, name: &str) -> Option<u32>;
    fn vector3(&self, name: &str) -> Option<Vector3<f32>>;
    fn float(&self, name: &str) -> Option<f32>;
    fn texture(&self, name: &str) -> Option<TextureHandle>;

    /// The viewpoint of the current pass.
    fn camera(&self) -> &Camera;

    /// World to shadow-map-texture transform of the active light.
    fn light_matrix(&self) -> &Matrix4<f32>;

    fn active_light(&self) -> Option<&dyn Light>;
}

/// The [`UniformSource`] of one pass: the store plus the camera and light
/// that pass runs with.
#[derive(Clone, Copy)]
pub struct PassUniforms<'a> {
    store: &'a UniformStore,
    camera: &'a Camera,
    light_matrix: &'a Matrix4<f32>,
    light: Option<&'a dyn Light>,
}

impl<'a> PassUniforms<'a> {
    pub fn new(
        store: &'a UniformStore,
        camera: &'a Camera,
        light_matrix: &'a Matrix4<f32>,
        light: Option<&'a dyn Light>,
    ) -> Self {
        PassUniforms {
            store,
            camera,
            light_matrix,
            light,
        }
    }
}

impl UniformSource for PassUniforms<'_> {
    fn sampler_slot(&self, name: &str) -> Option<u32> {
        self.store.sampler_slot(name)
    }

    fn vector3(&self, name: &str) -> Option<Vector3<f32>> {
        self.store.vector3(name)
    }

    fn float(&self, name: &str) -> Option<f32> {
        self.store.float(name)
    }

    fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.store.texture(name)
    }

    fn camera(&self) -> &Camera {
        self.camera
    }

    fn light_matrix(&self) -> &Matrix4<f32> {
        self.light_matrix
    }

    fn active_light(&self) -> Option<&dyn Light> {
        self.light
    }
}
