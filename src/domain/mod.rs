//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the in-memory tabular [`Dataset`] produced by the loader
//! - per-column storage (`Column`, `ColumnValues`)
//! - the well-known column names of the source spreadsheet

pub mod types;

pub use types::*;
