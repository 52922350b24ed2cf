// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Allowances — encoding and screen-space math casts are intentional
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

//! Core engine for interactive 3D scatter-plot exploration.
//!
//! Strew turns a table of records into a navigable 3D point cloud: three
//! attributes map to spatial coordinates, optional attributes to color
//! and size, and screen-space picking maintains a togglable selection
//! whose rows form the filtered output subset.
//!
//! # Key entry points
//!
//! - [`engine::ScatterEngine`] - the widget core driving replot,
//!   picking, selection, and output
//! - [`data::Table`] - the source-table contract (with
//!   [`data::MemTable`] as the bundled implementation)
//! - [`backend::RenderBackend`] - the rendering boundary the engine
//!   draws through
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything is single-threaded and event-driven: a
//! [`PlotCommand`](engine::PlotCommand) enters the engine, runs to
//! completion, and leaves the point cloud, axis ranges, and selection in
//! a consistent state. Rendering and windowing stay outside the crate —
//! the engine only hands payloads across the [`backend`] boundary and
//! reads the camera transform back for picking.

pub mod backend;
pub mod camera;
pub mod cloud;
pub mod data;
pub mod engine;
pub mod error;
pub mod input;
pub mod mapping;
pub mod options;
pub mod picking;
pub mod selection;
pub mod session;
