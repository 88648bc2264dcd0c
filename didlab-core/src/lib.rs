//! didlab core — panel domain types, loading, pivot aggregation, series.
//!
//! Everything here is pure data work: read the observation panel, split it
//! into exposure groups, collapse each group to per-unit pre/post means,
//! and derive the daily descriptive series the figures plot. The only I/O
//! is reading the input CSV; artifact writing lives in `didlab-runner`.

pub mod data;
pub mod domain;
pub mod pivot;
pub mod series;

pub use data::{load_panel, LoadError, Panel};
pub use pivot::{pivot_group, GroupPivot};
