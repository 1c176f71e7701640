//! Data acquisition.
//!
//! - remote spreadsheet download (`remote`)
//! - synthetic sample CSV generation (`sample`)

pub mod remote;
pub mod sample;

pub use remote::*;
pub use sample::*;
