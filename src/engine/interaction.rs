//! Hover, click, and output handling.
//!
//! Picking is best-effort by design: a missing camera transform or an
//! oversized cloud silently degrades to "nothing picked" — the user
//! sees no error, the click just lands on empty space.

use glam::Vec2;

use crate::backend::RenderBackend;
use crate::cloud;
use crate::data::Table;
use crate::picking;

use super::ScatterEngine;

/// Structured tooltip content for the row under the cursor. The host
/// decides how to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Source row index.
    pub row: usize,
    /// Whether the row is currently selected.
    pub selected: bool,
    /// `(attribute, display value)` pairs for every assigned attribute,
    /// deduplicated, in x/y/z/color/size order.
    pub fields: Vec<(String, String)>,
}

impl<T: Table, B: RenderBackend> ScatterEngine<T, B> {
    /// Visible-cloud index of the point under a screen position.
    fn pick_visible(&self, pos: Vec2) -> Option<usize> {
        let cloud = self.view.cloud.as_ref()?;
        let transform = self.backend.camera_transform()?;
        picking::pick_nearest(
            &cloud.positions,
            &transform,
            pos,
            picking::DEFAULT_PICK_RADIUS,
        )
    }

    /// Source row index of the point under a screen position.
    pub(crate) fn picked_row(&self, pos: Vec2) -> Option<usize> {
        let cloud = self.view.cloud.as_ref()?;
        self.pick_visible(pos)
            .and_then(|i| cloud.row_index.get(i).copied())
    }

    /// Apply a click at a screen position to the selection.
    ///
    /// Returns `true` when the selection changed.
    pub(crate) fn handle_click(&mut self, pos: Vec2, toggle: bool) -> bool {
        let row = self.picked_row(pos);
        let changed = self.view.selection.apply_click(row, toggle);
        log::debug!(
            "click at ({:.0}, {:.0}): picked {row:?}, {} rows selected",
            pos.x,
            pos.y,
            self.view.selection.len()
        );
        self.update_highlight();
        changed
    }

    /// Rebuild the selection-highlight render item.
    pub(crate) fn update_highlight(&mut self) {
        if let Some(id) = self.items.highlight.take() {
            self.backend.remove_item(id);
        }

        let Some(cloud) = &self.view.cloud else {
            self.backend.request_redraw();
            return;
        };
        let halo = cloud::highlight_cloud(
            cloud,
            &self.view.selection,
            self.options.display.white_background,
        );
        if let Some(halo) = halo {
            let px_mode = !self.options.plot.compat_mode;
            self.items.highlight =
                Some(self.backend.add_points(&halo, px_mode));
        }
        self.backend.request_redraw();
    }

    /// Row currently under the cursor (updated by
    /// [`PlotCommand::Hover`](super::PlotCommand::Hover)).
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.view.hovered
    }

    /// Tooltip content for the hovered row, if any.
    #[must_use]
    pub fn hovered_tooltip(&self) -> Option<Tooltip> {
        self.tooltip_for_row(self.view.hovered?)
    }

    /// Tooltip content for the row under a screen position, if any.
    #[must_use]
    pub fn tooltip_at(&self, pos: Vec2) -> Option<Tooltip> {
        self.tooltip_for_row(self.picked_row(pos)?)
    }

    fn tooltip_for_row(&self, row: usize) -> Option<Tooltip> {
        let table = self.table.as_ref()?;
        let fields = self
            .axes
            .assigned_unique()
            .into_iter()
            .map(|name| {
                let value = table
                    .cell_text(row, name)
                    .unwrap_or_else(|| "?".to_owned());
                (name.to_owned(), value)
            })
            .collect();
        Some(Tooltip {
            row,
            selected: self.view.selection.contains(row),
            fields,
        })
    }

    /// Current output: the selected rows in ascending order, or `None`
    /// for "no selection" (the explicit absence-of-output signal).
    #[must_use]
    pub fn commit(&self) -> Option<Vec<usize>> {
        let _ = self.table.as_ref()?;
        if self.view.selection.is_empty() {
            return None;
        }
        Some(self.view.selection.sorted_rows())
    }
}
