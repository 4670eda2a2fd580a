//! Named pipeline states for the passes of a frame.
//!
//! Passes never toggle individual depth/blend/cull flags. They pick one of
//! the presets below through a [`PipelineScope`], which puts
//! [`PipelineState::OPAQUE`] back when the pass ends.

use crate::rendering::RenderDevice;
use std::ops::{Deref, DerefMut};
use wgpu::{BlendComponent, BlendFactor, BlendOperation, BlendState, CompareFunction, Face, FrontFace};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PipelineState {
    pub depth_compare: CompareFunction,
    pub depth_write: bool,
    pub cull_mode: Option<Face>,
    pub blend: Option<BlendState>,
}

pub const ADDITIVE_COMPONENT: BlendComponent = BlendComponent {
    src_factor: BlendFactor::One,
    dst_factor: BlendFactor::One,
    operation: BlendOperation::Add,
};

/// `one, one` blending on color and alpha.
pub const ADDITIVE_BLENDING: BlendState = BlendState {
    color: ADDITIVE_COMPONENT,
    alpha: ADDITIVE_COMPONENT,
};

impl PipelineState {
    /// The resting state between passes: depth tested and written, back
    /// faces culled, no blending.
    pub const OPAQUE: PipelineState = PipelineState {
        depth_compare: CompareFunction::Less,
        depth_write: true,
        cull_mode: Some(Face::Back),
        blend: None,
    };

    /// Shadow casting for lights whose geometry should be rendered with
    /// reversed winding.
    pub const SHADOW_FLIPPED: PipelineState = PipelineState {
        cull_mode: Some(Face::Front),
        ..Self::OPAQUE
    };

    /// Adds one light on top of the ambient pass. Only fragments that are
    /// exactly the front-most surface from the ambient pass pass the depth
    /// test, so every visible point is lit once per light.
    pub const LIGHT_ACCUMULATE: PipelineState = PipelineState {
        depth_compare: CompareFunction::Equal,
        depth_write: false,
        cull_mode: Some(Face::Back),
        blend: Some(ADDITIVE_BLENDING),
    };

    pub const fn shadow_caster(flip_faces: bool) -> PipelineState {
        if flip_faces {
            Self::SHADOW_FLIPPED
        } else {
            Self::OPAQUE
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::OPAQUE
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobalState {
    pub front_face: FrontFace,
    pub depth_clamp: bool,
}

impl Default for GlobalState {
    fn default() -> Self {
        GlobalState {
            front_face: FrontFace::Cw,
            depth_clamp: true,
        }
    }
}

/// Applies a [`PipelineState`] for as long as it lives and restores
/// [`PipelineState::OPAQUE`] when dropped.
pub struct PipelineScope<'a> {
    device: &'a mut dyn RenderDevice,
}

impl<'a> PipelineScope<'a> {
    pub fn enter(device: &'a mut dyn RenderDevice, state: &PipelineState) -> Self {
        device.set_pipeline_state(state);
        PipelineScope { device }
    }
}

impl<'a> Deref for PipelineScope<'a> {
    type Target = dyn RenderDevice + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.device
    }
}

impl DerefMut for PipelineScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.device
    }
}

impl Drop for PipelineScope<'_> {
    fn drop(&mut self) {
        self.device.set_pipeline_state(&PipelineState::OPAQUE);
    }
}
