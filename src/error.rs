//! Crate-level error types.

use std::fmt;

/// Errors produced by the strew crate.
///
/// Everything here is recoverable: replot and click handling catch these
/// at their entry points and surface them as a status string rather than
/// propagating further.
#[derive(Debug)]
pub enum StrewError {
    /// No data, or fewer than two spatial axes assigned.
    ConfigurationIncomplete,
    /// The combined axis validity mask selected zero rows.
    NoValidPoints,
    /// An assigned column could not be read from the source table.
    ColumnRead(String),
    /// A table was assembled from columns of inconsistent shape.
    TableShape(String),
    /// The render backend failed or is unavailable.
    Backend(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Session state parsing/serialization failure.
    SessionParse(String),
}

impl fmt::Display for StrewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationIncomplete => {
                write!(f, "no data or axes missing")
            }
            Self::NoValidPoints => write!(f, "0 valid points"),
            Self::ColumnRead(name) => {
                write!(f, "error reading column '{name}'")
            }
            Self::TableShape(msg) => write!(f, "table shape error: {msg}"),
            Self::Backend(msg) => write!(f, "render backend error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::SessionParse(msg) => {
                write!(f, "session parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for StrewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StrewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
