//! Run reporting: descriptive-statistics tables and the end-of-run summary.

pub mod format;

pub use format::*;
