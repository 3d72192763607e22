//! Display colors for each region role.

use crate::canvas::ColorTag;
use crate::color::{parse_color, unpack_rgb, ColorError};
use crate::config::PaletteConfig;
use image::Rgba;

/// Resolved display colors. Only the renderer cares about these; fill
/// engines compare [`ColorTag`]s, never display colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub boundary: Rgba<u8>,
    pub fill: Rgba<u8>,
    pub seed: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba([255, 255, 255, 255]),
            boundary: Rgba([0, 0, 255, 255]),
            fill: Rgba([0, 255, 0, 255]),
            seed: Rgba([0, 0, 255, 255]),
        }
    }
}

impl Palette {
    /// Parse every entry of a `[palette]` config section.
    pub fn from_config(config: &PaletteConfig) -> Result<Self, ColorError> {
        Ok(Self {
            background: parse_color(&config.background)?,
            boundary: parse_color(&config.boundary)?,
            fill: parse_color(&config.fill)?,
            seed: parse_color(&config.seed)?,
        })
    }

    pub fn color_of(&self, tag: ColorTag) -> Rgba<u8> {
        match tag {
            ColorTag::Background => self.background,
            ColorTag::Boundary => self.boundary,
            ColorTag::Fill => self.fill,
            ColorTag::Seed => self.seed,
            ColorTag::Other(rgb) => unpack_rgb(rgb),
        }
    }
}
