mod common;

use common::*;
use nalgebra::{Matrix4, Vector3};
use penumbra::assets::Material;
use penumbra::components::{Attenuation, Camera, PointLight};
use penumbra::rendering::device::{UniformDecl, UniformType};
use penumbra::rendering::uniform::{PassUniforms, UniformStore, UniformValue};
use penumbra::rendering::{
    DeviceCommand, HeadlessDevice, ProgramShader, RenderDevice, Shader, TextureHandle,
};

fn program(device: &mut HeadlessDevice, uniforms: &[(&str, UniformType)]) -> ProgramShader {
    device.register_program(
        "test-program",
        uniforms.iter().map(|(name, ty)| UniformDecl::new(*name, *ty)),
    );
    ProgramShader::load(device, "test-program").unwrap()
}

#[test]
fn transform_uniforms_combine_model_and_camera() {
    init_logging();
    let mut device = HeadlessDevice::new();
    let shader = program(
        &mut device,
        &[
            ("T_model", UniformType::Mat4),
            ("T_MVP", UniformType::Mat4),
            ("C_eyePos", UniformType::Vec3),
            ("R_lightMatrix", UniformType::Mat4),
        ],
    );

    let mut camera = Camera::perspective(1.0, 1.0, 0.1, 100.0);
    camera.transform.set_position(0.0, 1.0, -5.0);
    let light_matrix = Matrix4::new_scaling(0.5);
    let model = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
    let store = UniformStore::new();
    let pass = PassUniforms::new(&store, &camera, &light_matrix, None);

    device.clear_commands();
    shader.update_uniforms(&mut device, &model, &Material::builder().name("m").build(), &pass);

    let commands = device.commands();
    assert_eq!(uniform_values(commands, "T_model"), [UniformValue::Mat4(model)]);
    assert_eq!(
        uniform_values(commands, "T_MVP"),
        [UniformValue::Mat4(camera.view_projection() * model)]
    );
    assert_eq!(
        uniform_values(commands, "C_eyePos"),
        [UniformValue::Vec3(Vector3::new(0.0, 1.0, -5.0))]
    );
    assert_eq!(
        uniform_values(commands, "R_lightMatrix"),
        [UniformValue::Mat4(light_matrix * model)]
    );
}

#[test]
fn samplers_bind_textures_to_their_slots() {
    init_logging();
    let mut device = HeadlessDevice::new();
    let shader = program(
        &mut device,
        &[
            ("M_diffuse", UniformType::Sampler2D),
            ("M_normalMap", UniformType::Sampler2D),
            ("R_shadowMap", UniformType::Sampler2D),
        ],
    );

    let diffuse = TextureHandle::new(7);
    let shadow = TextureHandle::new(9);
    let material = Material::builder().name("m").diffuse(diffuse).build();

    let mut store = UniformStore::new();
    store.set_sampler_slot("diffuse", 0);
    store.set_sampler_slot("normalMap", 1);
    store.set_sampler_slot("shadowMap", 3);
    store.set_texture("shadowMap", Some(shadow));

    let camera = Camera::default();
    let light_matrix = Matrix4::identity();
    let pass = PassUniforms::new(&store, &camera, &light_matrix, None);

    device.clear_commands();
    shader.update_uniforms(&mut device, &Matrix4::identity(), &material, &pass);

    let commands = device.commands();
    assert!(commands.contains(&DeviceCommand::BindTexture {
        slot: 0,
        texture: Some(diffuse)
    }));
    assert!(commands.contains(&DeviceCommand::BindTexture {
        slot: 1,
        texture: None
    }));
    assert!(commands.contains(&DeviceCommand::BindTexture {
        slot: 3,
        texture: Some(shadow)
    }));
    assert_eq!(uniform_values(commands, "R_shadowMap"), [UniformValue::Int(3)]);
    assert_eq!(uniform_values(commands, "M_diffuse"), [UniformValue::Int(0)]);
}

#[test]
fn material_and_light_values_are_forwarded() {
    init_logging();
    let mut device = HeadlessDevice::new();
    let shader = program(
        &mut device,
        &[
            ("M_specularPower", UniformType::Float),
            ("M_dispMapBias", UniformType::Float),
            ("L_intensity", UniformType::Float),
            ("L_color", UniformType::Vec3),
        ],
    );
    let light_shader = Box::new(ProgramShader::load(&mut device, "forward-point").unwrap());
    let light = PointLight::new(light_shader, Vector3::new(0.2, 0.4, 0.6), 3.0, Attenuation::default());

    let material = Material::builder()
        .name("m")
        .specular_power(16.0)
        .disp_map_scale(0.5)
        .disp_map_offset(1.0)
        .build();
    let store = UniformStore::new();
    let camera = Camera::default();
    let light_matrix = Matrix4::identity();
    let pass = PassUniforms::new(&store, &camera, &light_matrix, Some(&light));

    device.clear_commands();
    shader.update_uniforms(&mut device, &Matrix4::identity(), &material, &pass);

    let commands = device.commands();
    assert_eq!(uniform_values(commands, "M_specularPower"), [UniformValue::Float(16.0)]);
    assert_eq!(uniform_values(commands, "M_dispMapBias"), [UniformValue::Float(0.0)]);
    assert_eq!(uniform_values(commands, "L_intensity"), [UniformValue::Float(3.0)]);
    assert_eq!(
        uniform_values(commands, "L_color"),
        [UniformValue::Vec3(Vector3::new(0.2, 0.4, 0.6))]
    );
}

#[test]
fn unresolvable_uniforms_are_skipped() {
    init_logging();
    let mut device = HeadlessDevice::new();
    let shader = program(
        &mut device,
        &[
            ("R_missing", UniformType::Float),
            ("L_color", UniformType::Vec3),
            ("noPrefix", UniformType::Int),
            ("T_model", UniformType::Mat4),
        ],
    );

    let store = UniformStore::new();
    let camera = Camera::default();
    let light_matrix = Matrix4::identity();
    let pass = PassUniforms::new(&store, &camera, &light_matrix, None);

    device.clear_commands();
    shader.update_uniforms(&mut device, &Matrix4::identity(), &Material::builder().name("m").build(), &pass);

    let set: Vec<_> = device
        .commands()
        .iter()
        .filter_map(|c| match c {
            DeviceCommand::SetUniform { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(set, ["T_model"]);
}

#[test]
fn bind_uses_the_program() {
    let mut device = HeadlessDevice::new();
    let shader = program(&mut device, &[]);

    shader.bind(&mut device);

    assert_eq!(device.current_program(), Some(shader.program()));
    assert_eq!(device.program_name(shader.program()), Some("test-program"));
    assert_eq!(shader.name(), "test-program");
    assert!(device.surface_size().width > 0);
}
