//! Report renderers for rated license records.
//!
//! - [`terminal`]: colored table with a tier summary; respects `--quiet`.
//! - [`spreadsheet`]: CSV export with fixed `Package,License,Rating` columns.

pub mod spreadsheet;
pub mod terminal;
