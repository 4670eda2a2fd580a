use crate::rendering::uniform::UniformSource;
use crate::rendering::{RenderDevice, Shader};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RenderPassType {
    Ambient,
    Shadow,
    Light,
}

/// Everything a scene needs to submit its draw calls for one pass.
pub struct DrawCtx<'a> {
    pub device: &'a mut dyn RenderDevice,
    pub uniforms: &'a dyn UniformSource,
    pub pass_type: RenderPassType,
}

impl<'a> DrawCtx<'a> {
    pub fn new(
        device: &'a mut dyn RenderDevice,
        uniforms: &'a dyn UniformSource,
        pass_type: RenderPassType,
    ) -> Self {
        DrawCtx {
            device,
            uniforms,
            pass_type,
        }
    }
}

/// Something the engine can render: usually the root of a scene graph.
///
/// For every drawable it contains, `render_all` must bind `shader`, call
/// [`Shader::update_uniforms`] with the drawable's model matrix and
/// material and the pass's [`DrawCtx::uniforms`], then issue the draw.
pub trait SceneObject {
    fn render_all(&self, shader: &dyn Shader, ctx: &mut DrawCtx<'_>);
}
