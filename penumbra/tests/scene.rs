mod common;

use common::*;
use nalgebra::{Matrix4, Vector3};
use penumbra::assets::{Material, MeshData};
use penumbra::components::Camera;
use penumbra::rendering::uniform::UniformValue;
use penumbra::rendering::RenderDevice;
use penumbra::scene::{MeshRenderer, Node};

#[test]
fn node_draws_every_renderer_with_composed_transforms() {
    let mut engine = engine();
    let mesh = engine
        .device_mut()
        .upload_mesh(&MeshData::unit_plane())
        .unwrap();
    let material = Material::builder().name("floor").build();

    let mut child = Node::new("child").with_renderer(MeshRenderer::new(mesh, material.clone()));
    child.transform.set_position(0.0, 1.0, 0.0);

    let mut root = Node::new("root")
        .with_renderer(MeshRenderer::new(mesh, material))
        .with_child(child);
    root.transform.set_position(2.0, 0.0, 0.0);

    engine.device_mut().clear_commands();
    engine.render(&root, &Camera::default());

    let commands = engine.device().commands();
    assert_eq!(draw_count(commands), 2);
    assert_eq!(
        uniform_values(commands, "T_model"),
        [
            UniformValue::Mat4(Matrix4::new_translation(&Vector3::new(2.0, 0.0, 0.0))),
            UniformValue::Mat4(Matrix4::new_translation(&Vector3::new(2.0, 1.0, 0.0))),
        ]
    );
}

#[test]
fn empty_node_draws_nothing() {
    let mut engine = engine();
    let light = point_light(&mut engine);
    engine.add_light(Box::new(light)).unwrap();

    let mut root = Node::new("root");
    root.add_child(Node::new("empty"));
    assert_eq!(root.children().len(), 1);

    engine.device_mut().clear_commands();
    engine.render(&root, &Camera::default());

    assert_eq!(draw_count(engine.device().commands()), 0);
}
