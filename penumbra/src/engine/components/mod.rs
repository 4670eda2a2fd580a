//! Cameras and the built-in light types.
//!
//! Lights are created with the [`Shader`](crate::rendering::Shader) of their
//! accumulation pass and handed to
//! [`RenderingEngine::add_light`](crate::rendering::RenderingEngine::add_light):
//!
//! ```rust
//! use nalgebra::Vector3;
//! use penumbra::components::PointLight;
//! use penumbra::components::Attenuation;
//! use penumbra::rendering::{HeadlessDevice, RenderingEngine};
//!
//! let mut engine = RenderingEngine::new(HeadlessDevice::new()).unwrap();
//! let shader = engine.load_shader(PointLight::SHADER).unwrap();
//! let light = PointLight::new(Box::new(shader), Vector3::new(1.0, 0.5, 0.0), 0.8, Attenuation::default());
//! engine.add_light(Box::new(light)).unwrap();
//! ```

pub mod camera;
pub mod light;

pub use camera::*;
pub use light::*;
