//! Plain data handed to the device or read by shaders.

pub mod material;
pub mod mesh;

pub use material::*;
pub use mesh::*;
