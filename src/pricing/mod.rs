//! Pricing models
//!
//! Closed-form Black-Scholes for European options, plus the futures
//! degenerate case. Everything here is a pure function of an immutable
//! [`crate::core::MarketState`].

pub mod black_scholes;

pub use black_scholes::*;
