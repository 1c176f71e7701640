//! Regression fitting.
//!
//! Responsibilities:
//!
//! - clean and pair the x/y observations
//! - solve the cubic least-squares problem
//! - evaluate the fitted curve on an evenly spaced prediction grid

pub mod regression;

pub use regression::*;
