//! Scene glue: tick labels, background, grid/axis toggles, camera.
//!
//! Thin declarative layer over the render backend. Tick labels are the
//! only piece with real content: they invert the axis normalization so
//! the fixed grid positions read in raw data units.

use glam::Vec3;

use crate::backend::RenderBackend;
use crate::camera::Camera;
use crate::data::Table;
use crate::mapping::{Axis, AXIS_EXTENT};

use super::ScatterEngine;

/// Tick labels sit just outside the scene cube.
const TICK_OFFSET: f32 = -(AXIS_EXTENT + 1.0);

/// Normalized positions that carry a tick label.
const TICK_POSITIONS: [f32; 3] = [-AXIS_EXTENT, 0.0, AXIS_EXTENT];

/// Label text for a raw-unit tick value. Large magnitudes switch to
/// scientific notation.
fn format_tick(value: f32) -> String {
    if value.abs() > 1000.0 {
        format!("{value:.1e}")
    } else {
        format!("{value:.1}")
    }
}

/// World position of a tick label on one axis.
fn tick_position(axis: Axis, along: f32) -> Vec3 {
    match axis {
        Axis::X => Vec3::new(along, TICK_OFFSET, TICK_OFFSET),
        Axis::Y => Vec3::new(TICK_OFFSET, along, TICK_OFFSET),
        Axis::Z => Vec3::new(TICK_OFFSET, TICK_OFFSET, along),
    }
}

impl<T: Table, B: RenderBackend> ScatterEngine<T, B> {
    /// Regenerate the tick-label items from the current axis ranges.
    pub(crate) fn update_ticks(&mut self) {
        for id in self.items.ticks.drain(..) {
            self.backend.remove_item(id);
        }
        if !self.options.display.show_ticks {
            return;
        }

        // Text contrasts with the background.
        let color = if self.options.display.white_background {
            [0.0, 0.0, 0.0]
        } else {
            [1.0, 1.0, 1.0]
        };

        for axis in Axis::ALL {
            let range = self.view.ranges.get(axis);
            for &along in &TICK_POSITIONS {
                let label = format_tick(range.denormalize(along));
                let id = self.backend.add_text(
                    tick_position(axis, along),
                    &label,
                    color,
                );
                self.items.ticks.push(id);
            }
        }
    }

    /// Apply the background theme, then refresh everything whose color
    /// depends on it (tick text, halo glow).
    pub(crate) fn update_background(&mut self) {
        self.backend
            .set_background(self.options.display.white_background);
        self.update_ticks();
        self.update_highlight();
        self.backend.request_redraw();
    }

    /// Push grid/axis visibility to the backend.
    pub(crate) fn update_scene_elements(&mut self) {
        self.backend.set_grid_visible(self.options.display.show_grid);
        self.backend.set_axes_visible(self.options.display.show_axes);
        self.backend.request_redraw();
    }

    /// Reset the camera to the default orbit view.
    pub fn reset_camera(&mut self) {
        self.backend.set_camera(&Camera::default());
        self.backend.request_redraw();
    }
}
