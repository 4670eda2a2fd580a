use crate::rendering::TextureHandle;
use bon::Builder;
use nalgebra::Vector3;

/// Surface parameters read by shaders through their `M_` uniforms.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Material {
    #[builder(into)]
    pub name: String,
    pub diffuse: Option<TextureHandle>,
    pub normal_map: Option<TextureHandle>,
    pub disp_map: Option<TextureHandle>,
    #[builder(default = Vector3::new(1.0, 1.0, 1.0))]
    pub color: Vector3<f32>,
    #[builder(default = 1.0)]
    pub specular_intensity: f32,
    #[builder(default = 8.0)]
    pub specular_power: f32,
    #[builder(default = 0.0)]
    pub disp_map_scale: f32,
    #[builder(default = 0.0)]
    pub disp_map_offset: f32,
}

impl Material {
    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        match name {
            "diffuse" => self.diffuse,
            "normalMap" => self.normal_map,
            "dispMap" => self.disp_map,
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match name {
            "specularIntensity" => Some(self.specular_intensity),
            "specularPower" => Some(self.specular_power),
            "dispMapScale" => Some(self.disp_map_scale),
            "dispMapBias" => {
                let base_bias = self.disp_map_scale / 2.0;
                Some(-base_bias + base_bias * self.disp_map_offset)
            }
            _ => None,
        }
    }

    pub fn vector3(&self, name: &str) -> Option<Vector3<f32>> {
        match name {
            "color" => Some(self.color),
            _ => None,
        }
    }
}
