//! Forward multi-light rendering with variance shadow maps.
//!
//! [`RenderingEngine`] owns everything a frame needs besides the scene and the
//! camera: the shadow map bank, the filter quad, the auxiliary camera used for
//! shadow and filter passes, and the [`UniformStore`](uniform::UniformStore)
//! shaders read from. The scene is anything implementing [`SceneObject`].
//!
//! ```rust
//! use penumbra::components::Camera;
//! use penumbra::rendering::{HeadlessDevice, RenderingEngine};
//! use penumbra::scene::Node;
//!
//! let mut engine = RenderingEngine::new(HeadlessDevice::new()).unwrap();
//! let camera = Camera::perspective(70f32.to_radians(), 4.0 / 3.0, 0.1, 1000.0);
//! let scene = Node::new("root");
//!
//! engine.render(&scene, &camera);
//! ```
//!
//! All GPU work goes through [`RenderDevice`]. [`HeadlessDevice`] records it
//! instead, which is what the tests inspect.

mod context;
pub mod device;
mod error;
mod headless;
pub mod light_manager;
pub mod lights;
mod offscreen_surface;
pub mod pipeline_state;
mod post_process_pass;
mod renderer;
mod shader;
pub mod shadow_map;
pub mod uniform;

pub use context::*;
pub use device::{
    ClearOps, DeviceError, MeshHandle, ProgramHandle, RenderDevice, RenderTarget,
    TextureHandle,
};
pub use error::*;
pub use headless::*;
pub use light_manager::{LightHandle, LightManager};
pub use offscreen_surface::*;
pub use pipeline_state::{PipelineScope, PipelineState};
pub use post_process_pass::*;
pub use renderer::*;
pub use shader::*;
pub use shadow_map::{ShadowMapBank, ShadowMapSlot};
