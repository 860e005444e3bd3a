//! Hedging analytics
//!
//! Implements:
//! - Delta hedge recommendation (futures trade that flattens net delta)
//! - Hedge optimizer (min-cost basket hitting Greek-neutrality targets)
//! - Named scenario ladder over target subsets

pub mod delta;
pub mod optimizer;

pub use delta::*;
pub use optimizer::*;
