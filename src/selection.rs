//! Persistent, togglable selection of source rows.
//!
//! The selection is a set of row indices into the *source table*, not
//! into the visible cloud — it survives replots and re-encodes
//! unchanged, and is cleared only when the table itself is replaced.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// The user's current pick: a set of selected row indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    rows: FxHashSet<usize>,
}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `row` is selected.
    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    /// Drop the whole selection. Returns `true` if it was non-empty.
    pub fn clear(&mut self) -> bool {
        if self.rows.is_empty() {
            false
        } else {
            self.rows.clear();
            true
        }
    }

    /// Apply one click transition.
    ///
    /// | picked  | toggle | effect                          |
    /// |---------|--------|---------------------------------|
    /// | row R   | yes    | R flips in/out of the set       |
    /// | row R   | no     | selection becomes exactly `{R}` |
    /// | nothing | yes    | unchanged                       |
    /// | nothing | no     | selection cleared               |
    ///
    /// Returns `true` when the set changed.
    pub fn apply_click(&mut self, picked: Option<usize>, toggle: bool) -> bool {
        match (picked, toggle) {
            (Some(row), true) => {
                if !self.rows.remove(&row) {
                    let _ = self.rows.insert(row);
                }
                true
            }
            (Some(row), false) => {
                let unchanged = self.rows.len() == 1 && self.contains(row);
                self.rows.clear();
                let _ = self.rows.insert(row);
                !unchanged
            }
            (None, true) => false,
            (None, false) => self.clear(),
        }
    }

    /// Selected rows in ascending order — the output commit order.
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.rows.iter().copied().collect();
        rows.sort_unstable();
        rows
    }

    /// Replace the selection wholesale (session restore).
    pub fn restore(&mut self, rows: &[usize]) {
        self.rows = rows.iter().copied().collect();
    }
}
