//! Portfolio analytics
//!
//! Implements:
//! - Aggregation: net Greeks, market value, and P&L for a mixed book
//! - Per-position breakdown rows
//! - Shock replay: full repricing under spot/vol/time bumps

pub mod aggregate;
pub mod shock;

pub use aggregate::*;
pub use shock::*;
