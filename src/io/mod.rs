//! Input/output helpers.
//!
//! - CSV ingest + column typing (`ingest`)
//! - summary CSV export (`summary`)

pub mod ingest;
pub mod summary;

pub use ingest::*;
pub use summary::*;
