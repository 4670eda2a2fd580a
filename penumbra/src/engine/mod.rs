//! The renderer core and the collaborators it talks to.
//!
//! The entry point is [`RenderingEngine`](rendering::RenderingEngine). It owns
//! the shadow map bank, the full-screen filter quad and the auxiliary camera,
//! and drives the ambient, shadow and light accumulation passes of a frame.
//! Everything that actually touches the GPU goes through the
//! [`RenderDevice`](rendering::RenderDevice) trait.

pub mod assets;
pub mod components;
pub mod core;
pub mod rendering;
pub mod scene;
