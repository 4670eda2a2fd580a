mod common;

use common::*;
use penumbra::rendering::lights::{ShadowSettings, ShadowTier};
use penumbra::rendering::shadow_map::{MAX_SHADOW_TIERS, SHADOW_MAP_FORMAT};
use penumbra::rendering::{
    DeviceCommand, EngineConfig, HeadlessDevice, RenderDevice, RenderError, RenderingEngine,
    ShadowMapBank,
};
use winit::dpi::PhysicalSize;

#[test]
fn tier_maps_to_bank_index() {
    assert!(ShadowTier::new(0).is_none());
    assert_eq!(tier(1).bank_index(), 0);
    assert_eq!(tier(10).bank_index(), 9);
    assert_eq!(tier(1).resolution(), 2);
    assert_eq!(tier(10).resolution(), 1024);
}

#[test]
fn bank_pairs_map_and_scratch_of_equal_size() {
    let mut device = HeadlessDevice::new();
    let bank = ShadowMapBank::new(&mut device, 4).unwrap();

    assert_eq!(bank.len(), 4);
    for (index, slot) in bank.iter().enumerate() {
        let side = 2u32 << index;
        let size = PhysicalSize::new(side, side);

        assert_eq!(slot.tier().bank_index(), index);
        assert_eq!(slot.size(), size);
        assert_eq!(device.texture_size(slot.map()), Some(size));
        assert_eq!(device.texture_size(slot.scratch()), Some(size));
        assert_ne!(slot.map(), slot.scratch());
    }

    assert!(device.commands().iter().all(|c| match c {
        DeviceCommand::CreateTexture { format, .. } => *format == SHADOW_MAP_FORMAT,
        _ => true,
    }));
}

#[test]
fn bank_supports_only_allocated_tiers() {
    let mut device = HeadlessDevice::new();
    let bank = ShadowMapBank::new(&mut device, 3).unwrap();

    assert!(bank.supports(tier(1)));
    assert!(bank.supports(tier(3)));
    assert!(!bank.supports(tier(4)));
    assert!(bank.slot(tier(4)).is_none());
    assert_eq!(bank.max_tier(), 3);
}

#[test]
fn bank_rejects_invalid_tier_counts() {
    let mut device = HeadlessDevice::new();

    assert!(matches!(
        ShadowMapBank::new(&mut device, 0),
        Err(RenderError::InvalidShadowTierCount { tiers: 0, .. })
    ));
    assert!(matches!(
        ShadowMapBank::new(&mut device, MAX_SHADOW_TIERS + 1),
        Err(RenderError::InvalidShadowTierCount { .. })
    ));
    assert_eq!(device.texture_count(), 0);
}

#[test]
fn engine_allocates_configured_tiers() {
    let engine = engine_with(EngineConfig::builder().shadow_tiers(6).build());
    assert_eq!(engine.shadow_maps().len(), 6);

    let default = engine_with(EngineConfig::default());
    assert_eq!(default.shadow_maps().len(), 10);
}

#[test]
fn program_failure_surfaces_at_construction() {
    let mut device = HeadlessDevice::new();
    device.fail_program("shadowMapGenerator");

    let result = RenderingEngine::new(device);
    assert!(matches!(result, Err(RenderError::Device { .. })));
}

#[test]
fn add_light_rejects_tier_beyond_bank() {
    let mut engine = engine_with(EngineConfig::builder().shadow_tiers(5).build());

    let too_big = directional_light(&mut engine, ShadowSettings::with_tier(tier(6)));
    let result = engine.add_light(Box::new(too_big));
    assert!(matches!(
        result,
        Err(RenderError::UnsupportedShadowTier {
            tier: 6,
            available: 5
        })
    ));

    let largest = directional_light(&mut engine, ShadowSettings::with_tier(tier(5)));
    assert!(engine.add_light(Box::new(largest)).is_ok());
    assert_eq!(engine.lights().len(), 1);
}

#[test]
#[should_panic(expected = "out of range")]
fn render_panics_on_tier_changed_beyond_bank() {
    let mut engine = engine_with(EngineConfig::builder().shadow_tiers(5).build());
    let light = spot_light(&mut engine, ShadowSettings::with_tier(tier(5)));
    let handle = engine.add_light(Box::new(light)).unwrap();

    engine
        .light_mut(handle)
        .unwrap()
        .shadow_info_mut()
        .unwrap()
        .set_settings(ShadowSettings::with_tier(tier(7)));

    let camera = penumbra::components::Camera::default();
    engine.render(&RecordingScene::new(), &camera);
}
