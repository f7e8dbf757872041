//! License string normalization and risk rating.
//!
//! - [`spdx`]: the static tier table and the mapping of common non-SPDX
//!   spellings to canonical identifiers.
//! - [`classifier`]: entry point for raw registry strings, including SPDX
//!   `OR`/`AND`/`WITH` expressions.

pub mod classifier;
pub mod spdx;

pub use classifier::{classify, Classification};
