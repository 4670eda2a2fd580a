//! A minimal scene graph the engine can render.

pub mod node;

pub use node::*;
