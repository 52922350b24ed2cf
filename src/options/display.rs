use serde::{Deserialize, Serialize};

/// Scene display toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Whether to show the ground grid.
    pub show_grid: bool,
    /// Whether to show the axis item.
    pub show_axes: bool,
    /// Whether to show tick labels with raw-unit values.
    pub show_ticks: bool,
    /// White background instead of the default dark one.
    pub white_background: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_axes: true,
            show_ticks: false,
            white_background: false,
        }
    }
}
