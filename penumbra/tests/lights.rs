mod common;

use common::*;
use nalgebra::{UnitQuaternion, Vector3};
use penumbra::components::{Attenuation, DirectionalLight, PointLight, SpotLight};
use penumbra::rendering::lights::{Light, ShadowSettings};
use penumbra::rendering::uniform::UniformValue;
use penumbra::rendering::LightManager;
use penumbra::utils::{attenuation_range, orthographic, perspective_lh};

#[test]
fn point_light_never_casts_shadows() {
    let mut engine = engine();
    let light = point_light(&mut engine);

    assert!(light.shadow_info().is_none());
    assert_eq!(light.shader().name(), PointLight::SHADER);
}

#[test]
fn point_light_range_follows_attenuation() {
    let mut engine = engine();
    let shader = shader(&mut engine, PointLight::SHADER);
    let light = PointLight::new(
        shader,
        Vector3::new(0.5, 1.0, 0.25),
        2.0,
        Attenuation::new(1.0, 0.5, 0.25),
    );

    assert_eq!(light.range(), attenuation_range(1.0, 0.5, 0.25, 2.0, 1.0));
    assert_eq!(light.uniform("range"), Some(UniformValue::Float(light.range())));
    assert_eq!(
        light.uniform("attenuationExponent"),
        Some(UniformValue::Float(0.25))
    );
    assert_eq!(
        light.uniform("color"),
        Some(UniformValue::Vec3(Vector3::new(0.5, 1.0, 0.25)))
    );
    assert_eq!(light.uniform("cutoff"), None);
}

#[test]
fn point_light_reports_its_position() {
    let mut engine = engine();
    let mut light = point_light(&mut engine);
    light.transform_mut().set_position(1.0, 2.0, 3.0);

    assert_eq!(
        light.uniform("position"),
        Some(UniformValue::Vec3(Vector3::new(1.0, 2.0, 3.0)))
    );
}

#[test]
fn spot_light_cutoff_and_projection() {
    let mut engine = engine();
    let angle = 60f32.to_radians();
    let shader = shader(&mut engine, SpotLight::SHADER);
    let light = SpotLight::new(
        shader,
        Vector3::new(1.0, 1.0, 1.0),
        1.0,
        Attenuation::default(),
        angle,
    )
    .with_shadows(ShadowSettings::with_tier(tier(7)));

    assert!((light.cutoff() - (angle / 2.0).cos()).abs() < 1e-6);
    assert_eq!(light.uniform("cutoff"), Some(UniformValue::Float(light.cutoff())));

    let shadow = light.shadow_info().unwrap();
    assert!(!shadow.flip_faces());
    assert_eq!(shadow.tier(), tier(7));
    assert_eq!(
        *shadow.projection(),
        perspective_lh(angle, 1.0, 0.1, light.range())
    );
}

#[test]
fn spot_light_shadow_camera_is_the_light_itself() {
    let mut engine = engine();
    let mut light = spot_light(&mut engine, ShadowSettings::with_tier(tier(4)));
    let rotation = UnitQuaternion::from_euler_angles(0.2, 0.4, 0.0);
    light.transform_mut().set_position(4.0, 5.0, 6.0);
    light.transform_mut().set_rotation(rotation);

    let pose = light.shadow_camera_transform(&Vector3::new(100.0, 0.0, 0.0), &UnitQuaternion::identity());
    assert_eq!(pose.position, Vector3::new(4.0, 5.0, 6.0));
    assert_eq!(pose.rotation, rotation);
}

#[test]
fn directional_light_shadow_is_flipped_orthographic() {
    let mut engine = engine();
    let settings = ShadowSettings::builder()
        .tier(tier(9))
        .softness(2.0)
        .light_bleed_reduction(0.4)
        .build();
    let shader = shader(&mut engine, DirectionalLight::SHADER);
    let light = DirectionalLight::new(shader, Vector3::new(1.0, 1.0, 1.0), 0.5)
        .with_shadows(settings, 20.0);

    let shadow = light.shadow_info().unwrap();
    assert!(shadow.flip_faces());
    assert_eq!(shadow.softness(), 2.0);
    assert_eq!(shadow.light_bleed_reduction(), 0.4);
    assert_eq!(shadow.min_variance(), 0.00002);
    assert_eq!(light.half_shadow_area(), 10.0);
    assert_eq!(
        *shadow.projection(),
        orthographic(-10.0, 10.0, -10.0, 10.0, -10.0, 10.0)
    );
}

#[test]
fn directional_shadow_camera_snaps_to_texels() {
    let mut engine = engine();
    // 80 units over 8 texels: one texel is 10 units wide
    let light = directional_light(&mut engine, ShadowSettings::with_tier(tier(3)));

    let pose = light.shadow_camera_transform(
        &Vector3::new(13.0, -4.0, 0.5),
        &UnitQuaternion::identity(),
    );

    assert!((pose.position - Vector3::new(10.0, -10.0, 40.5)).norm() < 1e-4);
    assert_eq!(pose.rotation, UnitQuaternion::identity());
}

#[test]
fn directional_shadow_camera_snaps_in_light_space() {
    let mut engine = engine();
    let mut light = directional_light(&mut engine, ShadowSettings::with_tier(tier(3)));
    let rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 90f32.to_radians());
    light.transform_mut().set_rotation(rotation);

    let pose = light.shadow_camera_transform(&Vector3::new(3.0, 0.0, 0.0), &UnitQuaternion::identity());
    let light_space = rotation.inverse() * pose.position;

    assert!((light_space.x / 10.0 - (light_space.x / 10.0).round()).abs() < 1e-4);
    assert!((light_space.y / 10.0 - (light_space.y / 10.0).round()).abs() < 1e-4);
    assert_eq!(pose.rotation, rotation);
}

#[test]
fn directional_light_points_along_forward() {
    let mut engine = engine();
    let mut light = directional_light(&mut engine, ShadowSettings::with_tier(tier(3)));
    light
        .transform_mut()
        .set_rotation(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 90f32.to_radians()));

    let Some(UniformValue::Vec3(direction)) = light.uniform("direction") else {
        panic!("directional light has no direction");
    };
    assert!((direction - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-5);
}

#[test]
fn light_manager_keeps_insertion_order() {
    let mut engine = engine();
    let mut manager = LightManager::new();

    let first = manager.insert(Box::new(point_light(&mut engine)));
    let second = manager.insert(Box::new(spot_light(&mut engine, ShadowSettings::with_tier(tier(2)))));
    let third = manager.insert(Box::new(point_light(&mut engine)));

    assert_eq!(manager.handles(), [first, second, third]);
    assert!(manager.remove(second).is_some());
    assert_eq!(manager.handles(), [first, third]);
    assert!(!manager.contains_key(second));
    assert!(manager.remove(second).is_none());

    let order: Vec<_> = manager.iter().map(|(handle, _)| handle).collect();
    assert_eq!(order, [first, third]);
    assert_eq!(manager.nth(1).map(|l| l.shader().name()), Some(PointLight::SHADER));
    assert!(manager.nth(2).is_none());
}
