//! # hedgelab - Options Hedging Analytics
//!
//! A library for options-portfolio risk: per-position Black-Scholes Greeks,
//! portfolio aggregation, delta-hedge recommendation, shock-scenario P&L
//! replay, and a constrained hedge optimizer.
//!
//! ## Key Components
//!
//! - **Pricing**: Closed-form Black-Scholes price and Greeks for European
//!   calls/puts; degenerate constant-delta rule for futures
//! - **Portfolio**: Quantity-weighted net Greeks, mark-to-market value, and
//!   P&L against trade-price cost basis; shock replay via full repricing
//! - **Hedging**: Delta-neutralizing futures recommendation and a bounded
//!   min-cost optimizer over a static hedge-instrument menu
//!
//! ## Usage
//!
//! ```rust
//! use hedgelab::prelude::*;
//!
//! let market = MarketState::new(70.0, 0.35, 0.0, 30.0 / 365.0);
//! let book = vec![
//!     Position::option(10_000.0, OptionSpec::call(70.0), 2.10),
//!     Position::futures(-2_000.0, 70.0),
//! ];
//!
//! let net = aggregate(&book, &market).unwrap();
//! let hedge = recommend_delta_hedge(net.delta, 1.0);
//! println!("{:?} {:.0} futures", hedge.action, hedge.quantity);
//! ```
//!
//! ## Conventions
//!
//! - Per-unit Greeks are always long-basis; direction comes from the signed
//!   position quantity, never from a separate flag
//! - Futures mark-to-market is entry-relative: P&L = quantity * (spot - entry)
//! - Core vega/theta are raw annualized; vol-point and per-day rescales are
//!   reporting accessors
//! - Time to expiry is floored at a small epsilon; every other invalid input
//!   fails with a typed error

pub mod core;
pub mod hedging;
pub mod portfolio;
pub mod pricing;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        Greeks, HedgeError, HedgeResult, Instrument, MarketState, OptionKind, OptionSpec,
        PortfolioGreeks, Position, MIN_TIME_TO_EXPIRY,
    };

    // Pricing
    pub use crate::pricing::{
        futures_greeks, instrument_greeks, norm_cdf, norm_pdf, price_and_greeks,
    };

    // Portfolio
    pub use crate::portfolio::{
        aggregate, position_breakdown, shock_pnl, PositionReport, ShockReport, ShockScenario,
    };

    // Hedging
    pub use crate::hedging::{
        optimize_hedge, recommend_delta_hedge, run_scenarios, standard_scenarios, GreekExposure,
        GreekResidual, HedgeAction, HedgeInstrument, HedgeRecommendation, HedgeScenario,
        HedgeSolution, HedgeTargets, OptimizerConfig, ScenarioOutcome,
    };
}

// Re-export main types at crate root
pub use crate::core::{HedgeError, HedgeResult};
pub use crate::hedging::{HedgeSolution, HedgeTargets, OptimizerConfig};
