use serde::{Deserialize, Serialize};

use crate::error::StrewError;

/// Missing-value display text, matching the convention of the upstream
/// data tools this widget plugs into.
const MISSING_TEXT: &str = "?";

/// The two attribute kinds the encoder dispatches on.
///
/// Categorical variables carry their category names and a fixed-order
/// color palette; a row's cell value is the category index (as a float,
/// NaN for missing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarKind {
    /// Numeric attribute; cell values are used directly.
    Continuous,
    /// Discrete attribute with named categories.
    Categorical {
        /// Category names, indexed by cell value.
        values: Vec<String>,
        /// Per-category RGB palette (0-255), same order as `values`.
        palette: Vec<[u8; 3]>,
    },
}

/// A named column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Column name, unique within a table.
    pub name: String,
    /// Continuous or categorical.
    pub kind: VarKind,
}

impl Variable {
    /// Continuous variable descriptor.
    #[must_use]
    pub fn continuous(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: VarKind::Continuous,
        }
    }

    /// Categorical variable descriptor with category names and palette.
    #[must_use]
    pub fn categorical(
        name: &str,
        values: Vec<String>,
        palette: Vec<[u8; 3]>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            kind: VarKind::Categorical { values, palette },
        }
    }

    /// Whether this variable is categorical.
    #[must_use]
    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, VarKind::Categorical { .. })
    }

    /// Whether this variable is continuous.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self.kind, VarKind::Continuous)
    }
}

/// Contract the engine consumes a tabular data source through.
///
/// Categorical columns are exposed as category indices (NaN for
/// missing), so every column reads as a `Vec<f32>` regardless of kind.
pub trait Table {
    /// Number of rows.
    fn n_rows(&self) -> usize;

    /// All column descriptors, in table order.
    fn variables(&self) -> &[Variable];

    /// Descriptor for a named column, if present.
    fn variable(&self, name: &str) -> Option<&Variable>;

    /// A full column as floats.
    ///
    /// # Errors
    ///
    /// Returns [`StrewError::ColumnRead`] when the column is absent or
    /// cannot be materialized.
    fn column(&self, name: &str) -> Result<Vec<f32>, StrewError>;

    /// Display text for one cell (tooltips). `None` when either the row
    /// or the column does not exist.
    fn cell_text(&self, row: usize, name: &str) -> Option<String>;
}

/// Column-major in-memory table.
///
/// Columns are pushed one at a time; the first column fixes the row
/// count and later pushes must match it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemTable {
    variables: Vec<Variable>,
    columns: Vec<Vec<f32>>,
}

impl MemTable {
    /// Empty table with no columns and no rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a continuous column.
    ///
    /// # Errors
    ///
    /// Returns [`StrewError::TableShape`] when the column length does
    /// not match the existing row count.
    pub fn push_continuous(
        &mut self,
        name: &str,
        values: Vec<f32>,
    ) -> Result<(), StrewError> {
        self.push_column(Variable::continuous(name), values)
    }

    /// Append a categorical column of category codes.
    ///
    /// # Errors
    ///
    /// Returns [`StrewError::TableShape`] when the column length does
    /// not match the existing row count.
    pub fn push_categorical(
        &mut self,
        name: &str,
        categories: Vec<String>,
        palette: Vec<[u8; 3]>,
        codes: Vec<f32>,
    ) -> Result<(), StrewError> {
        self.push_column(Variable::categorical(name, categories, palette), codes)
    }

    fn push_column(
        &mut self,
        variable: Variable,
        values: Vec<f32>,
    ) -> Result<(), StrewError> {
        if !self.columns.is_empty() && values.len() != self.n_rows() {
            return Err(StrewError::TableShape(format!(
                "column '{}' has {} rows, table has {}",
                variable.name,
                values.len(),
                self.n_rows()
            )));
        }
        self.variables.push(variable);
        self.columns.push(values);
        Ok(())
    }

    /// New table restricted to the given rows, in the given order.
    /// Unknown row indices are skipped.
    #[must_use]
    pub fn subset(&self, rows: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|col| {
                rows.iter()
                    .filter_map(|&r| col.get(r).copied())
                    .collect::<Vec<f32>>()
            })
            .collect();
        Self {
            variables: self.variables.clone(),
            columns,
        }
    }
}

impl Table for MemTable {
    fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    fn column(&self, name: &str) -> Result<Vec<f32>, StrewError> {
        self.variables
            .iter()
            .position(|v| v.name == name)
            .and_then(|i| self.columns.get(i).cloned())
            .ok_or_else(|| StrewError::ColumnRead(name.to_owned()))
    }

    fn cell_text(&self, row: usize, name: &str) -> Option<String> {
        let idx = self.variables.iter().position(|v| v.name == name)?;
        let value = *self.columns.get(idx)?.get(row)?;

        if value.is_nan() {
            return Some(MISSING_TEXT.to_owned());
        }
        match &self.variables[idx].kind {
            VarKind::Continuous => Some(format!("{value}")),
            VarKind::Categorical { values, .. } => Some(
                values
                    .get(value as usize)
                    .map_or(MISSING_TEXT, String::as_str)
                    .to_owned(),
            ),
        }
    }
}
