//! Centralized plot options with TOML preset support.
//!
//! All tweakable settings (point appearance, display toggles)
//! consolidate here. Options serialize to/from TOML so a host can keep
//! named presets on disk.

mod display;
mod plot;

use std::path::Path;

pub use display::DisplayOptions;
pub use plot::PlotOptions;
use serde::{Deserialize, Serialize};

use crate::error::StrewError;

/// Top-level options container. All sub-structs use `#[serde(default)]`
/// so partial TOML files (e.g. only overriding `[display]`) work
/// correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Point appearance and render-mode options.
    pub plot: PlotOptions,
    /// Scene display toggles.
    pub display: DisplayOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`StrewError::Io`] on read failure, [`StrewError::OptionsParse`]
    /// on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, StrewError> {
        let content = std::fs::read_to_string(path).map_err(StrewError::Io)?;
        toml::from_str(&content)
            .map_err(|e| StrewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`StrewError::Io`] on write failure,
    /// [`StrewError::OptionsParse`] on serialization failure.
    pub fn save(&self, path: &Path) -> Result<(), StrewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StrewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StrewError::Io)?;
        }
        std::fs::write(path, content).map_err(StrewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
