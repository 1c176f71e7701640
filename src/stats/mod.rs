//! Descriptive statistics: moments, quantiles, and kernel density.

pub mod density;
pub mod describe;
pub mod quartiles;

pub use density::*;
pub use describe::*;
pub use quartiles::*;
