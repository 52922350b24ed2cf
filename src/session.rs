//! Session persistence.
//!
//! The selection set is the only state that survives a save/reload
//! cycle; everything else (point cloud, axis ranges) is derived and
//! rebuilt from inputs. Stored as JSON so hosts can embed it in their
//! own workspace files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StrewError;
use crate::selection::Selection;

/// Snapshot of the per-session state worth persisting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// Selected row indices, ascending.
    pub selection: Vec<usize>,
}

impl SessionState {
    /// Snapshot the current selection.
    #[must_use]
    pub fn capture(selection: &Selection) -> Self {
        Self {
            selection: selection.sorted_rows(),
        }
    }

    /// Write the snapshot back into a live selection.
    pub fn apply(&self, selection: &mut Selection) {
        selection.restore(&self.selection);
    }

    /// Parse a snapshot from its JSON form.
    ///
    /// # Errors
    ///
    /// [`StrewError::SessionParse`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, StrewError> {
        serde_json::from_str(json)
            .map_err(|e| StrewError::SessionParse(e.to_string()))
    }

    /// Serialize the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// [`StrewError::SessionParse`] on serialization failure.
    pub fn to_json(&self) -> Result<String, StrewError> {
        serde_json::to_string(self)
            .map_err(|e| StrewError::SessionParse(e.to_string()))
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// [`StrewError::Io`] on read failure, [`StrewError::SessionParse`]
    /// on malformed JSON.
    pub fn load(path: &Path) -> Result<Self, StrewError> {
        let content = std::fs::read_to_string(path).map_err(StrewError::Io)?;
        Self::from_json(&content)
    }

    /// Save the snapshot to a JSON file.
    ///
    /// # Errors
    ///
    /// [`StrewError::Io`] on write failure,
    /// [`StrewError::SessionParse`] on serialization failure.
    pub fn save(&self, path: &Path) -> Result<(), StrewError> {
        let content = self.to_json()?;
        std::fs::write(path, content).map_err(StrewError::Io)
    }
}
