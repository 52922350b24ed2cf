//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation — whether triggered by a mouse event, a
//! GUI control, or a programmatic call — is represented as a
//! [`PlotCommand`]. Consumers construct commands and pass them to
//! [`ScatterEngine::execute`](super::ScatterEngine::execute).

use glam::Vec2;

use crate::backend::RenderBackend;
use crate::data::Table;
use crate::mapping::Axis;

use super::ScatterEngine;

/// A discrete or parameterized operation the engine can perform.
///
/// The engine never cares *how* a command was triggered — mouse, GUI,
/// or API all look identical:
///
/// ```ignore
/// engine.execute(PlotCommand::SetTicksVisible(true));
/// engine.execute(PlotCommand::Click { pos, toggle: false });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PlotCommand {
    // ── Attribute assignment ────────────────────────────────────────
    /// Map a column (or nothing) onto a spatial axis.
    SetAxis {
        /// Which spatial axis to reassign.
        axis: Axis,
        /// Column name, or `None` to unassign.
        attr: Option<String>,
    },
    /// Map a column (or nothing) onto point color.
    SetColorAttr(Option<String>),
    /// Map a column (or nothing) onto point size.
    SetSizeAttr(Option<String>),

    // ── Appearance ──────────────────────────────────────────────────
    /// Change the base point size (clamped to 1-100).
    SetPointSize(f32),
    /// Change the point opacity percentage (clamped to 10-100).
    SetOpacity(u8),
    /// Switch between pixel sprites and world-space primitives.
    SetCompatMode(bool),

    // ── Display toggles ─────────────────────────────────────────────
    /// Show or hide the ground grid.
    SetGridVisible(bool),
    /// Show or hide the axis item.
    SetAxesVisible(bool),
    /// Show or hide tick labels.
    SetTicksVisible(bool),
    /// Switch between white and dark backgrounds.
    SetWhiteBackground(bool),

    // ── Interaction ─────────────────────────────────────────────────
    /// Reset the camera to the default orbit view.
    ResetCamera,
    /// Drop the whole selection.
    ClearSelection,
    /// Mouse click at a screen position; `toggle` is the multi-select
    /// modifier state.
    Click {
        /// Cursor position in viewport pixels.
        pos: Vec2,
        /// Whether the multi-select modifier is held.
        toggle: bool,
    },
    /// Cursor moved; updates the hovered row for tooltips.
    Hover {
        /// Cursor position in viewport pixels.
        pos: Vec2,
    },
}

impl<T: Table, B: RenderBackend> ScatterEngine<T, B> {
    /// Execute one command to completion.
    ///
    /// Returns `true` when the selection (and therefore the committed
    /// output) changed, so hosts know to re-pull
    /// [`commit`](Self::commit).
    pub fn execute(&mut self, command: PlotCommand) -> bool {
        match command {
            PlotCommand::SetAxis { axis, attr } => {
                match axis {
                    Axis::X => self.axes.x = attr,
                    Axis::Y => self.axes.y = attr,
                    Axis::Z => self.axes.z = attr,
                }
                self.replot();
                false
            }
            PlotCommand::SetColorAttr(attr) => {
                self.axes.color = attr;
                self.replot();
                false
            }
            PlotCommand::SetSizeAttr(attr) => {
                self.axes.size = attr;
                self.replot();
                false
            }
            PlotCommand::SetPointSize(size) => {
                self.options.plot.point_size = size.clamp(1.0, 100.0);
                self.replot();
                false
            }
            PlotCommand::SetOpacity(opacity) => {
                self.options.plot.opacity = opacity.clamp(10, 100);
                self.replot();
                false
            }
            PlotCommand::SetCompatMode(compat) => {
                self.options.plot.compat_mode = compat;
                self.replot();
                false
            }
            PlotCommand::SetGridVisible(visible) => {
                self.options.display.show_grid = visible;
                self.update_scene_elements();
                false
            }
            PlotCommand::SetAxesVisible(visible) => {
                self.options.display.show_axes = visible;
                self.update_scene_elements();
                false
            }
            PlotCommand::SetTicksVisible(visible) => {
                self.options.display.show_ticks = visible;
                self.update_ticks();
                self.backend.request_redraw();
                false
            }
            PlotCommand::SetWhiteBackground(white) => {
                self.options.display.white_background = white;
                self.update_background();
                false
            }
            PlotCommand::ResetCamera => {
                self.reset_camera();
                false
            }
            PlotCommand::ClearSelection => {
                let changed = self.view.selection.clear();
                if changed {
                    self.update_highlight();
                }
                changed
            }
            PlotCommand::Click { pos, toggle } => self.handle_click(pos, toggle),
            PlotCommand::Hover { pos } => {
                self.view.hovered = self.picked_row(pos);
                false
            }
        }
    }
}
