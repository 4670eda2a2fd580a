pub mod transform;
pub mod vertex;

pub use transform::*;
pub use vertex::*;
