use crate::engine::core::Transform;
use crate::rendering::uniform::UniformValue;
use crate::rendering::Shader;
use bon::Builder;
use nalgebra::{Matrix4, UnitQuaternion, Vector3};
use std::fmt::{Display, Formatter};
use std::num::NonZeroU8;

/// Shadow map resolution, as a power of two. Tier `t` is `2^t` texels wide.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShadowTier(NonZeroU8);

impl ShadowTier {
    /// `None` for `0`, which is not a resolution.
    pub const fn new(size_as_power_of_two: u8) -> Option<Self> {
        match NonZeroU8::new(size_as_power_of_two) {
            Some(tier) => Some(ShadowTier(tier)),
            None => None,
        }
    }

    pub const fn get(self) -> u8 {
        self.0.get()
    }

    pub fn resolution(self) -> u32 {
        1u32.checked_shl(u32::from(self.get())).unwrap_or(u32::MAX)
    }

    /// Position of this tier in a [`ShadowMapBank`](crate::rendering::ShadowMapBank).
    pub const fn bank_index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl Display for ShadowTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0} ({1}x{1})", self.get(), self.resolution())
    }
}

/// How a light wants its shadow map rendered. Everything but the
/// projection, which each light type derives itself.
#[derive(Debug, Copy, Clone, PartialEq, Builder)]
pub struct ShadowSettings {
    pub tier: ShadowTier,
    /// Blur radius in texels; `0.0` disables the blur.
    #[builder(default = 1.0)]
    pub softness: f32,
    #[builder(default = 0.2)]
    pub light_bleed_reduction: f32,
    #[builder(default = 0.00002)]
    pub min_variance: f32,
}

impl ShadowSettings {
    pub fn with_tier(tier: ShadowTier) -> Self {
        ShadowSettings::builder().tier(tier).build()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowInfo {
    projection: Matrix4<f32>,
    flip_faces: bool,
    settings: ShadowSettings,
}

impl ShadowInfo {
    pub fn new(projection: Matrix4<f32>, flip_faces: bool, settings: ShadowSettings) -> Self {
        ShadowInfo {
            projection,
            flip_faces,
            settings,
        }
    }

    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }

    /// Render shadow casters with reversed winding.
    pub fn flip_faces(&self) -> bool {
        self.flip_faces
    }

    pub fn tier(&self) -> ShadowTier {
        self.settings.tier
    }

    pub fn softness(&self) -> f32 {
        self.settings.softness
    }

    pub fn light_bleed_reduction(&self) -> f32 {
        self.settings.light_bleed_reduction
    }

    pub fn min_variance(&self) -> f32 {
        self.settings.min_variance
    }

    pub fn settings(&self) -> &ShadowSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ShadowSettings) {
        self.settings = settings;
    }
}

/// Pose of the camera a shadow map is rendered from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadowCameraTransform {
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

pub trait Light {
    /// The shader of this light's accumulation pass.
    fn shader(&self) -> &dyn Shader;

    fn transform(&self) -> &Transform;

    /// `None` for lights that don't cast shadows.
    fn shadow_info(&self) -> Option<&ShadowInfo> {
        None
    }

    fn shadow_info_mut(&mut self) -> Option<&mut ShadowInfo> {
        None
    }

    /// Where to render the shadow map from, given where the main camera is.
    fn shadow_camera_transform(
        &self,
        _main_position: &Vector3<f32>,
        _main_rotation: &UnitQuaternion<f32>,
    ) -> ShadowCameraTransform {
        ShadowCameraTransform {
            position: self.transform().position(),
            rotation: self.transform().rotation(),
        }
    }

    /// Value for the `L_<name>` uniform of this light's shader.
    fn uniform(&self, name: &str) -> Option<UniformValue>;
}
