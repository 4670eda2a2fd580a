use crate::core::Transform;
use crate::engine::assets::Material;
use crate::rendering::{DrawCtx, MeshHandle, SceneObject, Shader};
use nalgebra::Matrix4;

/// An uploaded mesh and the material it is drawn with.
#[derive(Debug, Clone)]
pub struct MeshRenderer {
    pub mesh: MeshHandle,
    pub material: Material,
}

impl MeshRenderer {
    pub fn new(mesh: MeshHandle, material: Material) -> Self {
        MeshRenderer { mesh, material }
    }
}

/// A named transform with meshes attached and child nodes placed relative
/// to it.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    renderers: Vec<MeshRenderer>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            transform: Transform::new(),
            renderers: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: MeshRenderer) -> Self {
        self.renderers.push(renderer);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_renderer(&mut self, renderer: MeshRenderer) {
        self.renderers.push(renderer);
    }

    pub fn add_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn renderers(&self) -> &[MeshRenderer] {
        &self.renderers
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    fn render_with_parent(&self, parent: &Matrix4<f32>, shader: &dyn Shader, ctx: &mut DrawCtx<'_>) {
        let model = parent * self.transform.matrix();

        for renderer in &self.renderers {
            shader.bind(ctx.device);
            shader.update_uniforms(ctx.device, &model, &renderer.material, ctx.uniforms);
            ctx.device.draw_mesh(renderer.mesh);
        }

        for child in &self.children {
            child.render_with_parent(&model, shader, ctx);
        }
    }
}

impl SceneObject for Node {
    fn render_all(&self, shader: &dyn Shader, ctx: &mut DrawCtx<'_>) {
        self.render_with_parent(&Matrix4::identity(), shader, ctx);
    }
}
