use crate::rendering::DeviceError;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum RenderError {
    #[snafu(display("Creating the {what} failed: {source}"))]
    Device {
        what: &'static str,
        source: DeviceError,
    },

    #[snafu(display("A shadow map bank needs between 1 and {max} tiers, not {tiers}"))]
    InvalidShadowTierCount { tiers: u8, max: u8 },

    #[snafu(display("Shadow tier {tier} is not available, the highest tier is {available}"))]
    UnsupportedShadowTier { tier: u8, available: u8 },

    #[snafu(display("No light is registered under this handle"))]
    UnknownLight,
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
