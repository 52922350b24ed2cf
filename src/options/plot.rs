use serde::{Deserialize, Serialize};

use crate::cloud::CloudStyle;

/// Point appearance and render-mode options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotOptions {
    /// Base point size (slider units, 1-100).
    pub point_size: f32,
    /// Point opacity in percent (10-100).
    pub opacity: u8,
    /// Draw points as world-space geometric primitives instead of
    /// fixed-pixel sprites. Slower, but works on GL stacks without
    /// point-sprite support.
    pub compat_mode: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            point_size: 15.0,
            opacity: 100,
            compat_mode: true,
        }
    }
}

impl PlotOptions {
    /// Encoding style for the scene encoder.
    #[must_use]
    pub fn style(&self) -> CloudStyle {
        CloudStyle {
            point_size: self.point_size,
            opacity: self.opacity,
            compat_mode: self.compat_mode,
        }
    }
}
