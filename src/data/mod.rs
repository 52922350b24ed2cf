//! Source-table boundary: variable descriptors, the [`Table`] contract,
//! and the bundled in-memory implementation.
//!
//! The engine only ever talks to a [`Table`]; hosts with their own data
//! layer implement the trait, everyone else (and the test suite) uses
//! [`MemTable`].

mod table;

pub use table::{MemTable, Table, VarKind, Variable};
