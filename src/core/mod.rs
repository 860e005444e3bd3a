//! Core data types for hedgelab
//!
//! Defines fundamental types:
//! - MarketState: immutable pricing snapshot
//! - OptionSpec / Instrument / Position: the book
//! - Greeks / PortfolioGreeks: per-unit and net sensitivities
//! - HedgeError: error taxonomy

pub mod error;
pub mod greeks;
pub mod market;
pub mod position;

pub use error::*;
pub use greeks::*;
pub use market::*;
pub use position::*;
