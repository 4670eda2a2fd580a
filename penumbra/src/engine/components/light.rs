use crate::core::Transform;
use crate::rendering::Shader;
use crate::rendering::lights::{Light, ShadowCameraTransform, ShadowInfo, ShadowSettings};
use crate::rendering::uniform::UniformValue;
use crate::utils::{attenuation_range, orthographic, perspective_lh, snap_down};
use nalgebra::{UnitQuaternion, Vector3};

/// Default edge length of the square a directional light's shadow covers.
pub const DEFAULT_SHADOW_AREA: f32 = 80.0;

/// Near plane of a spot light's shadow projection.
pub const SPOT_SHADOW_NEAR: f32 = 0.1;

/// Far plane of a spot light's shadow projection when its range is unbounded.
pub const SPOT_SHADOW_MAX_FAR: f32 = 1000.0;

/// `constant + linear * d + exponent * d²`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub exponent: f32,
}

impl Attenuation {
    pub const fn new(constant: f32, linear: f32, exponent: f32) -> Self {
        Attenuation {
            constant,
            linear,
            exponent,
        }
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Attenuation::new(0.0, 0.0, 1.0)
    }
}

/// What every light type carries.
struct LightBase {
    color: Vector3<f32>,
    intensity: f32,
    transform: Transform,
    shader: Box<dyn Shader>,
    shadow: Option<ShadowInfo>,
}

impl LightBase {
    fn new(shader: Box<dyn Shader>, color: Vector3<f32>, intensity: f32) -> Self {
        LightBase {
            color,
            intensity,
            transform: Transform::new(),
            shader,
            shadow: None,
        }
    }

    fn uniform(&self, name: &str) -> Option<UniformValue> {
        match name {
            "color" => Some(UniformValue::Vec3(self.color)),
            "intensity" => Some(UniformValue::Float(self.intensity)),
            _ => None,
        }
    }
}

macro_rules! light_accessors {
    () => {
        pub fn color(&self) -> Vector3<f32> {
            self.base.color
        }

        pub fn set_color(&mut self, color: Vector3<f32>) {
            self.base.color = color;
        }

        pub fn intensity(&self) -> f32 {
            self.base.intensity
        }

        pub fn transform_mut(&mut self) -> &mut Transform {
            &mut self.base.transform
        }
    };
}

/// A light infinitely far away, shining along its transform's forward axis.
pub struct DirectionalLight {
    base: LightBase,
    half_shadow_area: f32,
}

impl DirectionalLight {
    pub const SHADER: &'static str = "forward-directional";

    pub fn new(shader: Box<dyn Shader>, color: Vector3<f32>, intensity: f32) -> Self {
        DirectionalLight {
            base: LightBase::new(shader, color, intensity),
            half_shadow_area: DEFAULT_SHADOW_AREA / 2.0,
        }
    }

    /// Casts shadows over a `shadow_area` wide square centred in front of
    /// the main camera.
    pub fn with_shadows(mut self, settings: ShadowSettings, shadow_area: f32) -> Self {
        let h = shadow_area / 2.0;
        self.half_shadow_area = h;
        self.base.shadow = Some(ShadowInfo::new(
            orthographic(-h, h, -h, h, -h, h),
            true,
            settings,
        ));
        self
    }

    pub fn half_shadow_area(&self) -> f32 {
        self.half_shadow_area
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.base.transform.forward()
    }

    light_accessors!();
}

impl Light for DirectionalLight {
    fn shader(&self) -> &dyn Shader {
        self.base.shader.as_ref()
    }

    fn transform(&self) -> &Transform {
        &self.base.transform
    }

    fn shadow_info(&self) -> Option<&ShadowInfo> {
        self.base.shadow.as_ref()
    }

    fn shadow_info_mut(&mut self) -> Option<&mut ShadowInfo> {
        self.base.shadow.as_mut()
    }

    /// Half the shadow area ahead of the main camera, moved in whole shadow
    /// texels so the map doesn't shimmer while the camera moves.
    fn shadow_camera_transform(
        &self,
        main_position: &Vector3<f32>,
        main_rotation: &UnitQuaternion<f32>,
    ) -> ShadowCameraTransform {
        let h = self.half_shadow_area;
        let rotation = self.base.transform.rotation();
        let position = main_position + main_rotation * Vector3::z() * h;

        let Some(shadow) = &self.base.shadow else {
            return ShadowCameraTransform { position, rotation };
        };

        let texel_size = (h * 2.0) / shadow.tier().resolution() as f32;
        let mut light_space = rotation.inverse() * position;
        light_space.x = snap_down(light_space.x, texel_size);
        light_space.y = snap_down(light_space.y, texel_size);

        ShadowCameraTransform {
            position: rotation * light_space,
            rotation,
        }
    }

    fn uniform(&self, name: &str) -> Option<UniformValue> {
        match name {
            "direction" => Some(UniformValue::Vec3(self.direction())),
            _ => self.base.uniform(name),
        }
    }
}

/// A light at a position, fading out with distance. Never casts shadows.
pub struct PointLight {
    base: LightBase,
    attenuation: Attenuation,
    range: f32,
}

impl PointLight {
    pub const SHADER: &'static str = "forward-point";

    pub fn new(
        shader: Box<dyn Shader>,
        color: Vector3<f32>,
        intensity: f32,
        attenuation: Attenuation,
    ) -> Self {
        let max_channel = color.x.max(color.y).max(color.z);
        let range = attenuation_range(
            attenuation.constant,
            attenuation.linear,
            attenuation.exponent,
            intensity,
            max_channel,
        );

        PointLight {
            base: LightBase::new(shader, color, intensity),
            attenuation,
            range,
        }
    }

    pub fn attenuation(&self) -> &Attenuation {
        &self.attenuation
    }

    /// Distance at which this light stops contributing a visible amount.
    pub fn range(&self) -> f32 {
        self.range
    }

    light_accessors!();

    fn point_uniform(&self, name: &str) -> Option<UniformValue> {
        let value = match name {
            "position" => UniformValue::Vec3(self.base.transform.position()),
            "range" => UniformValue::Float(self.range),
            "attenuationConstant" => UniformValue::Float(self.attenuation.constant),
            "attenuationLinear" => UniformValue::Float(self.attenuation.linear),
            "attenuationExponent" => UniformValue::Float(self.attenuation.exponent),
            _ => return self.base.uniform(name),
        };
        Some(value)
    }
}

impl Light for PointLight {
    fn shader(&self) -> &dyn Shader {
        self.base.shader.as_ref()
    }

    fn transform(&self) -> &Transform {
        &self.base.transform
    }

    fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.point_uniform(name)
    }
}

/// A point light restricted to a cone around its forward axis.
pub struct SpotLight {
    point: PointLight,
    view_angle: f32,
    cutoff: f32,
}

impl SpotLight {
    pub const SHADER: &'static str = "forward-spot";

    /// `view_angle` is the full opening angle of the cone in radians.
    pub fn new(
        shader: Box<dyn Shader>,
        color: Vector3<f32>,
        intensity: f32,
        attenuation: Attenuation,
        view_angle: f32,
    ) -> Self {
        SpotLight {
            point: PointLight::new(shader, color, intensity, attenuation),
            view_angle,
            cutoff: (view_angle / 2.0).cos(),
        }
    }

    pub fn with_shadows(mut self, settings: ShadowSettings) -> Self {
        let far = self.point.range.min(SPOT_SHADOW_MAX_FAR);
        self.point.base.shadow = Some(ShadowInfo::new(
            perspective_lh(self.view_angle, 1.0, SPOT_SHADOW_NEAR, far),
            false,
            settings,
        ));
        self
    }

    pub fn view_angle(&self) -> f32 {
        self.view_angle
    }

    /// Cosine of half the view angle.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn range(&self) -> f32 {
        self.point.range
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.point.base.transform.forward()
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        self.point.transform_mut()
    }
}

impl Light for SpotLight {
    fn shader(&self) -> &dyn Shader {
        self.point.base.shader.as_ref()
    }

    fn transform(&self) -> &Transform {
        &self.point.base.transform
    }

    fn shadow_info(&self) -> Option<&ShadowInfo> {
        self.point.base.shadow.as_ref()
    }

    fn shadow_info_mut(&mut self) -> Option<&mut ShadowInfo> {
        self.point.base.shadow.as_mut()
    }

    fn uniform(&self, name: &str) -> Option<UniformValue> {
        match name {
            "direction" => Some(UniformValue::Vec3(self.direction())),
            "cutoff" => Some(UniformValue::Float(self.cutoff)),
            _ => self.point.point_uniform(name),
        }
    }
}
