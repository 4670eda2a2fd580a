use crate::rendering::device::TextureDescriptor;
use crate::rendering::error::*;
use crate::rendering::{RenderDevice, TextureHandle};
use snafu::ResultExt;
use wgpu::{FilterMode, TextureFormat};
use winit::dpi::PhysicalSize;

pub const OFFSCREEN_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;

/// A color target the size of the window. Filters read from it and it
/// backs the offscreen frame.
#[derive(Debug)]
pub struct OffscreenSurface {
    texture: TextureHandle,
    size: PhysicalSize<u32>,
}

impl OffscreenSurface {
    pub fn new(device: &mut dyn RenderDevice, size: PhysicalSize<u32>) -> Result<Self> {
        let size = PhysicalSize::new(size.width.max(1), size.height.max(1));
        let texture = device
            .create_texture(&TextureDescriptor {
                label: "Offscreen Texture",
                size,
                format: OFFSCREEN_FORMAT,
                filter: FilterMode::Nearest,
                clamp: false,
            })
            .context(DeviceErr {
                what: "offscreen texture",
            })?;

        Ok(OffscreenSurface { texture, size })
    }

    pub fn recreate(&mut self, device: &mut dyn RenderDevice, size: PhysicalSize<u32>) -> Result<()> {
        let new = Self::new(device, size)?;
        device.destroy_texture(self.texture);
        *self = new;
        Ok(())
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }
}
