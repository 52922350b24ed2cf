//! The widget core: replot, picking, selection, and output.
//!
//! [`ScatterEngine`] owns the view state (cloud, axis ranges,
//! selection, status line) and mutates it only through named handlers,
//! so every mutation site is auditable. It is generic over the data
//! source ([`Table`]) and the rendering boundary ([`RenderBackend`]);
//! everything runs synchronously inside the calling event turn.

mod command;
mod interaction;
mod ticks;

pub use command::PlotCommand;
pub use interaction::Tooltip;

use crate::backend::{ItemId, RenderBackend};
use crate::camera::Camera;
use crate::cloud::{self, PlotAxes, PointCloud};
use crate::data::Table;
use crate::error::StrewError;
use crate::mapping::AxisRanges;
use crate::options::Options;
use crate::selection::Selection;
use crate::session::SessionState;

/// All mutable view state, consolidated in one place.
#[derive(Debug, Default)]
struct ViewState {
    /// Current visible cloud, if the last replot succeeded.
    cloud: Option<PointCloud>,
    /// Raw value ranges behind the spatial axes.
    ranges: AxisRanges,
    /// Persistent row selection.
    selection: Selection,
    /// Row currently under the cursor, if any.
    hovered: Option<usize>,
    /// Human-readable widget status line.
    status: String,
}

/// Backend item handles the engine currently owns.
#[derive(Debug, Default)]
struct RenderItems {
    /// The main point-cloud item.
    points: Option<ItemId>,
    /// The selection-highlight item (halo + core layers).
    highlight: Option<ItemId>,
    /// Tick-label text items.
    ticks: Vec<ItemId>,
}

/// Core engine of the 3D scatter widget.
pub struct ScatterEngine<T: Table, B: RenderBackend> {
    backend: B,
    table: Option<T>,
    axes: PlotAxes,
    options: Options,
    view: ViewState,
    items: RenderItems,
}

impl<T: Table, B: RenderBackend> ScatterEngine<T, B> {
    /// Engine with default options over a fresh backend.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, Options::default())
    }

    /// Engine with explicit options (e.g. a loaded preset).
    pub fn with_options(backend: B, options: Options) -> Self {
        let mut engine = Self {
            backend,
            table: None,
            axes: PlotAxes::default(),
            options,
            view: ViewState {
                status: "No Data".to_owned(),
                ..ViewState::default()
            },
            items: RenderItems::default(),
        };
        engine.backend.set_camera(&Camera::default());
        engine.update_scene_elements();
        engine
            .backend
            .set_background(engine.options.display.white_background);
        engine
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Current data table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&T> {
        self.table.as_ref()
    }

    /// Current attribute assignment.
    #[must_use]
    pub fn axes(&self) -> &PlotAxes {
        &self.axes
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.view.status
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.view.selection
    }

    /// Current visible cloud, if the last replot succeeded.
    #[must_use]
    pub fn cloud(&self) -> Option<&PointCloud> {
        self.view.cloud.as_ref()
    }

    /// Raw value ranges behind the spatial axes.
    #[must_use]
    pub fn ranges(&self) -> AxisRanges {
        self.view.ranges
    }

    /// The rendering backend (e.g. for host-side resize handling).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ── Data flow ───────────────────────────────────────────────────

    /// Replace the source table.
    ///
    /// Clears the selection (old row indices are meaningless against
    /// new data), prunes attribute assignments the new table does not
    /// know, auto-assigns empty spatial axes to the first columns, and
    /// replots. The committed output is invalidated — hosts should
    /// re-pull [`commit`](Self::commit).
    pub fn set_data(&mut self, table: Option<T>) {
        self.table = table;
        let _ = self.view.selection.clear();
        self.view.hovered = None;
        self.prune_stale_axes();
        self.auto_assign_axes();
        log::info!(
            "data set: {} rows",
            self.table.as_ref().map_or(0, |t| t.n_rows())
        );
        self.replot();
    }

    /// Rebuild the point cloud and hand it to the backend.
    ///
    /// Never propagates an error: failures clear the plot and land in
    /// the status line.
    pub fn replot(&mut self) {
        self.clear_plot_items();
        self.view.hovered = None;

        if let Err(e) = self.try_replot() {
            self.view.cloud = None;
            self.view.status = format!("Status: {e}");
            log::warn!("replot failed: {e}");
        }

        self.update_ticks();
        self.backend.request_redraw();
    }

    /// The fallible part of a replot.
    fn try_replot(&mut self) -> Result<(), StrewError> {
        let table = self
            .table
            .as_ref()
            .ok_or(StrewError::ConfigurationIncomplete)?;
        if self.axes.assigned_spatial() < 2 {
            return Err(StrewError::ConfigurationIncomplete);
        }

        let style = self.options.plot.style();
        let (cloud, ranges) = cloud::build_cloud(table, &self.axes, &style)?;

        let px_mode = !self.options.plot.compat_mode;
        self.items.points = Some(self.backend.add_points(&cloud, px_mode));
        self.backend.set_camera_center(cloud.centroid());

        self.view.status = format!(
            "Points: {} | Mode: {}",
            cloud.len(),
            if self.options.plot.compat_mode {
                "Compat"
            } else {
                "Normal"
            }
        );
        log::debug!(
            "replot: {} of {} rows visible",
            cloud.len(),
            table.n_rows()
        );

        self.view.cloud = Some(cloud);
        self.view.ranges = ranges;
        self.update_highlight();
        Ok(())
    }

    /// Tear down the cloud and highlight items (idempotent removes).
    fn clear_plot_items(&mut self) {
        if let Some(id) = self.items.points.take() {
            self.backend.remove_item(id);
        }
        if let Some(id) = self.items.highlight.take() {
            self.backend.remove_item(id);
        }
    }

    /// Drop attribute assignments the current table does not know.
    fn prune_stale_axes(&mut self) {
        let Some(table) = &self.table else { return };
        for slot in [
            &mut self.axes.x,
            &mut self.axes.y,
            &mut self.axes.z,
            &mut self.axes.color,
            &mut self.axes.size,
        ] {
            if let Some(name) = slot {
                if table.variable(name).is_none() {
                    *slot = None;
                }
            }
        }
    }

    /// Fill unassigned axes from the table's leading columns, and the
    /// color slot from the first categorical column.
    fn auto_assign_axes(&mut self) {
        let Some(table) = &self.table else { return };
        let variables = table.variables();

        let spatial = [&mut self.axes.x, &mut self.axes.y, &mut self.axes.z];
        for (slot, variable) in spatial.into_iter().zip(variables) {
            if slot.is_none() {
                *slot = Some(variable.name.clone());
            }
        }

        if self.axes.color.is_none() {
            self.axes.color = variables
                .iter()
                .find(|v| v.is_categorical())
                .map(|v| v.name.clone());
        }
    }

    // ── Session persistence ─────────────────────────────────────────

    /// Snapshot the persistable per-session state.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        SessionState::capture(&self.view.selection)
    }

    /// Restore a previously captured session snapshot.
    pub fn restore_session(&mut self, state: &SessionState) {
        state.apply(&mut self.view.selection);
        self.update_highlight();
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::backend::testing::RecordingBackend;
    use crate::data::MemTable;
    use crate::mapping::Axis;

    /// 150 rows over three continuous attributes with raw ranges
    /// [0, 10], [0, 5], [0, 3]; row 0 is the all-minimum corner, row
    /// 149 the all-maximum one.
    fn scenario_table() -> MemTable {
        let n = 150;
        let ramp = |top: f32| -> Vec<f32> {
            (0..n).map(|i| i as f32 / (n - 1) as f32 * top).collect()
        };
        let mut t = MemTable::new();
        t.push_continuous("a", ramp(10.0)).unwrap();
        t.push_continuous("b", ramp(5.0)).unwrap();
        t.push_continuous("c", ramp(3.0)).unwrap();
        t
    }

    fn live_engine(
        table: MemTable,
    ) -> ScatterEngine<MemTable, RecordingBackend> {
        let mut engine = ScatterEngine::new(RecordingBackend::with_live_view());
        engine.set_data(Some(table));
        engine
    }

    /// Screen pixel of a visible point, for synthesized clicks.
    fn screen_of(
        engine: &ScatterEngine<MemTable, RecordingBackend>,
        visible: usize,
    ) -> Vec2 {
        let point = engine.cloud().map_or(Vec3::ZERO, |c| c.positions[visible]);
        engine.backend.screen_of(point)
    }

    #[test]
    fn scenario_150_rows_maps_corners_to_cube_corners() {
        let engine = live_engine(scenario_table());
        let cloud = engine.cloud().unwrap();
        assert_eq!(cloud.len(), 150);
        assert_eq!(cloud.positions[0], Vec3::new(-10.0, -10.0, -10.0));
        assert_eq!(cloud.positions[149], Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(engine.ranges().x.max, 10.0);
        assert_eq!(engine.ranges().y.max, 5.0);
        assert_eq!(engine.ranges().z.max, 3.0);
        assert_eq!(engine.status(), "Points: 150 | Mode: Compat");
    }

    #[test]
    fn no_data_reports_configuration_incomplete() {
        let engine: ScatterEngine<MemTable, _> =
            ScatterEngine::new(RecordingBackend::default());
        assert!(engine.cloud().is_none());
        assert_eq!(engine.status(), "No Data");
    }

    #[test]
    fn zero_axes_assigned_builds_no_cloud() {
        let mut engine = live_engine(scenario_table());
        for axis in Axis::ALL {
            let _ = engine.execute(PlotCommand::SetAxis { axis, attr: None });
        }
        assert!(engine.cloud().is_none());
        assert_eq!(engine.status(), "Status: no data or axes missing");
        assert!(engine.backend.point_items().is_empty());
    }

    #[test]
    fn click_selects_and_commits_the_row() {
        let mut engine = live_engine(scenario_table());
        let pos = screen_of(&engine, 42);

        assert!(engine.execute(PlotCommand::Click { pos, toggle: false }));
        assert_eq!(engine.commit(), Some(vec![42]));
        // Main cloud plus the two-layer highlight item.
        assert_eq!(engine.backend.point_items().len(), 2);
    }

    #[test]
    fn toggle_click_accumulates_and_releases() {
        let mut engine = live_engine(scenario_table());
        let first = screen_of(&engine, 10);
        let second = screen_of(&engine, 120);

        let _ = engine.execute(PlotCommand::Click {
            pos: first,
            toggle: false,
        });
        let _ = engine.execute(PlotCommand::Click {
            pos: second,
            toggle: true,
        });
        assert_eq!(engine.commit(), Some(vec![10, 120]));

        // Toggling the same row again removes it.
        let _ = engine.execute(PlotCommand::Click {
            pos: second,
            toggle: true,
        });
        assert_eq!(engine.commit(), Some(vec![10]));
    }

    #[test]
    fn empty_click_clears_and_withdraws_output() {
        let mut engine = live_engine(scenario_table());
        let _ = engine.execute(PlotCommand::Click {
            pos: screen_of(&engine, 5),
            toggle: false,
        });
        let _ = engine.execute(PlotCommand::Click {
            pos: screen_of(&engine, 7),
            toggle: true,
        });
        assert_eq!(engine.commit(), Some(vec![5, 7]));

        // Far corner of the viewport, nowhere near any point.
        let changed = engine.execute(PlotCommand::Click {
            pos: Vec2::new(2.0, 2.0),
            toggle: false,
        });
        assert!(changed);
        assert!(engine.selection().is_empty());
        assert_eq!(engine.commit(), None);
        // The highlight item is gone, only the main cloud remains.
        assert_eq!(engine.backend.point_items().len(), 1);
    }

    #[test]
    fn empty_click_with_modifier_keeps_selection() {
        let mut engine = live_engine(scenario_table());
        let _ = engine.execute(PlotCommand::Click {
            pos: screen_of(&engine, 5),
            toggle: false,
        });
        let changed = engine.execute(PlotCommand::Click {
            pos: Vec2::new(2.0, 2.0),
            toggle: true,
        });
        assert!(!changed);
        assert_eq!(engine.commit(), Some(vec![5]));
    }

    #[test]
    fn selection_survives_replot() {
        let mut engine = live_engine(scenario_table());
        let _ = engine.execute(PlotCommand::Click {
            pos: screen_of(&engine, 42),
            toggle: false,
        });

        let _ = engine.execute(PlotCommand::SetPointSize(30.0));
        assert_eq!(engine.commit(), Some(vec![42]));
        // Highlight was rebuilt alongside the new cloud.
        assert_eq!(engine.backend.point_items().len(), 2);
    }

    #[test]
    fn new_data_clears_the_selection() {
        let mut engine = live_engine(scenario_table());
        let _ = engine.execute(PlotCommand::Click {
            pos: screen_of(&engine, 42),
            toggle: false,
        });
        assert!(engine.commit().is_some());

        engine.set_data(Some(scenario_table()));
        assert_eq!(engine.commit(), None);
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn oversized_cloud_disables_picking() {
        let n = 60_000;
        let mut t = MemTable::new();
        t.push_continuous("a", (0..n).map(|i| i as f32).collect())
            .unwrap();
        t.push_continuous("b", (0..n).map(|i| i as f32).collect())
            .unwrap();
        let mut engine = live_engine(t);
        assert_eq!(engine.cloud().map(PointCloud::len), Some(60_000));

        let pos = screen_of(&engine, 0);
        let changed = engine.execute(PlotCommand::Click { pos, toggle: true });
        assert!(!changed);
        assert_eq!(engine.commit(), None);

        let _ = engine.execute(PlotCommand::Hover { pos });
        assert!(engine.hovered_tooltip().is_none());
    }

    #[test]
    fn dead_view_degrades_picking_silently() {
        let mut engine = live_engine(scenario_table());
        engine.backend.transform = None;

        let changed = engine.execute(PlotCommand::Click {
            pos: Vec2::new(400.0, 300.0),
            toggle: false,
        });
        // No transform → no pick → plain click clears (empty) selection.
        assert!(!changed);
        assert_eq!(engine.commit(), None);
    }

    #[test]
    fn auto_assignment_fills_axes_and_categorical_color() {
        let mut t = scenario_table();
        t.push_categorical(
            "cls",
            vec!["u".into(), "v".into()],
            vec![[10, 20, 30], [40, 50, 60]],
            vec![0.0; 150],
        )
        .unwrap();
        let engine = live_engine(t);
        assert_eq!(engine.axes().x.as_deref(), Some("a"));
        assert_eq!(engine.axes().y.as_deref(), Some("b"));
        assert_eq!(engine.axes().z.as_deref(), Some("c"));
        assert_eq!(engine.axes().color.as_deref(), Some("cls"));
    }

    #[test]
    fn stale_axes_are_pruned_on_new_data() {
        let mut engine = live_engine(scenario_table());
        let _ = engine.execute(PlotCommand::SetAxis {
            axis: Axis::Z,
            attr: Some("c".into()),
        });

        let mut other = MemTable::new();
        other.push_continuous("p", vec![1.0, 2.0]).unwrap();
        other.push_continuous("q", vec![3.0, 4.0]).unwrap();
        engine.set_data(Some(other));

        assert_eq!(engine.axes().x.as_deref(), Some("p"));
        assert_eq!(engine.axes().y.as_deref(), Some("q"));
        assert_eq!(engine.axes().z, None);
        assert!(engine.cloud().is_some());
    }

    #[test]
    fn session_round_trip_restores_selection() {
        let mut engine = live_engine(scenario_table());
        let _ = engine.execute(PlotCommand::Click {
            pos: screen_of(&engine, 9),
            toggle: false,
        });
        let _ = engine.execute(PlotCommand::Click {
            pos: screen_of(&engine, 17),
            toggle: true,
        });
        let snapshot = engine.session_state();

        let mut fresh = live_engine(scenario_table());
        fresh.restore_session(&snapshot);
        assert_eq!(fresh.commit(), Some(vec![9, 17]));
        // Restoring also rebuilds the highlight payload.
        assert_eq!(fresh.backend.point_items().len(), 2);
    }

    #[test]
    fn commit_subset_matches_the_selection() {
        let mut engine = live_engine(scenario_table());
        for (visible, toggle) in [(30, false), (4, true), (99, true)] {
            let _ = engine.execute(PlotCommand::Click {
                pos: screen_of(&engine, visible),
                toggle,
            });
        }
        let rows = engine.commit().unwrap();
        assert_eq!(rows, vec![4, 30, 99]);

        let subset = engine.table().unwrap().subset(&rows);
        assert_eq!(subset.n_rows(), 3);
        let a = subset.column("a").unwrap();
        let full = engine.table().unwrap().column("a").unwrap();
        assert_eq!(a, vec![full[4], full[30], full[99]]);
    }
}
