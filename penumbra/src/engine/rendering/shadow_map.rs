use crate::rendering::device::TextureDescriptor;
use crate::rendering::error::*;
use crate::rendering::lights::ShadowTier;
use crate::rendering::{RenderDevice, TextureHandle};
use log::debug;
use snafu::{ResultExt, ensure};
use wgpu::{FilterMode, TextureFormat};
use winit::dpi::PhysicalSize;

/// Largest tier a bank may hold: 8192x8192 maps.
pub const MAX_SHADOW_TIERS: u8 = 13;

/// Variance maps store depth and depth squared.
pub const SHADOW_MAP_FORMAT: TextureFormat = TextureFormat::Rg32Float;

/// The variance map of one tier, plus a scratch map of the same size the
/// blur ping-pongs through.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadowMapSlot {
    tier: ShadowTier,
    map: TextureHandle,
    scratch: TextureHandle,
    size: PhysicalSize<u32>,
}

impl ShadowMapSlot {
    pub fn tier(&self) -> ShadowTier {
        self.tier
    }

    pub fn map(&self) -> TextureHandle {
        self.map
    }

    /// Contents are undefined outside of a blur.
    pub fn scratch(&self) -> TextureHandle {
        self.scratch
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }
}

/// One [`ShadowMapSlot`] for every tier from `1` up to the bank's size.
#[derive(Debug, Clone)]
pub struct ShadowMapBank {
    slots: Vec<ShadowMapSlot>,
}

impl ShadowMapBank {
    pub fn new(device: &mut dyn RenderDevice, tiers: u8) -> Result<Self> {
        ensure!(
            (1..=MAX_SHADOW_TIERS).contains(&tiers),
            InvalidShadowTierCountErr {
                tiers,
                max: MAX_SHADOW_TIERS
            }
        );

        let mut slots = Vec::with_capacity(tiers as usize);
        for tier in (1..=tiers).filter_map(ShadowTier::new) {
            let resolution = tier.resolution();
            let size = PhysicalSize::new(resolution, resolution);

            let map = create_shadow_texture(device, "Shadow Map", size)?;
            let scratch = create_shadow_texture(device, "Shadow Map Scratch", size)?;

            slots.push(ShadowMapSlot {
                tier,
                map,
                scratch,
                size,
            });
        }

        debug!("Allocated {} shadow map tiers", slots.len());

        Ok(ShadowMapBank { slots })
    }

    /// Whether lights of this tier can be rendered.
    pub fn supports(&self, tier: ShadowTier) -> bool {
        tier.bank_index() < self.slots.len()
    }

    pub fn slot(&self, tier: ShadowTier) -> Option<&ShadowMapSlot> {
        self.slots.get(tier.bank_index())
    }

    /// The lowest tier's slot. Bound as the shadow sampler for lights without
    /// shadows so shaders always have something to sample.
    pub fn first(&self) -> &ShadowMapSlot {
        &self.slots[0]
    }

    /// The highest tier in this bank.
    pub fn max_tier(&self) -> u8 {
        self.slots.len() as u8
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShadowMapSlot> {
        self.slots.iter()
    }
}

fn create_shadow_texture(
    device: &mut dyn RenderDevice,
    label: &str,
    size: PhysicalSize<u32>,
) -> Result<TextureHandle> {
    device
        .create_texture(&TextureDescriptor {
            label,
            size,
            format: SHADOW_MAP_FORMAT,
            filter: FilterMode::Linear,
            clamp: true,
        })
        .context(DeviceErr { what: "shadow map" })
}
