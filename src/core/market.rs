//! Market state snapshot
//!
//! A `MarketState` is an immutable snapshot of the pricing inputs shared by
//! every position in a book: spot, implied volatility, risk-free rate, and
//! time to expiry. Every evaluation takes a fresh snapshot; nothing is
//! mutated in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{HedgeError, HedgeResult};

/// Floor on time-to-expiry, in years.
///
/// Clamping T at (or past) expiry keeps the Black-Scholes formula
/// well-defined. This is the only silent input correction in the crate;
/// every other out-of-domain input is rejected.
pub const MIN_TIME_TO_EXPIRY: f64 = 1e-6;

/// Immutable market snapshot for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    /// Spot price of the underlying (currency per unit).
    pub spot: f64,
    /// Annualized implied volatility as a decimal (0.35 = 35%).
    pub volatility: f64,
    /// Annualized risk-free rate as a decimal.
    pub rate: f64,
    /// Time to expiry in years, floored at [`MIN_TIME_TO_EXPIRY`].
    pub time_to_expiry: f64,
}

impl MarketState {
    /// Create a snapshot. Time to expiry is clamped to the epsilon floor;
    /// all other fields are validated by [`MarketState::validate`] at the
    /// pricing boundary.
    pub fn new(spot: f64, volatility: f64, rate: f64, time_to_expiry: f64) -> Self {
        Self {
            spot,
            volatility,
            rate,
            time_to_expiry: time_to_expiry.max(MIN_TIME_TO_EXPIRY),
        }
    }

    /// Create a snapshot with time to expiry derived from calendar dates.
    pub fn with_expiry_date(
        spot: f64,
        volatility: f64,
        rate: f64,
        valuation: NaiveDate,
        expiry: NaiveDate,
    ) -> Self {
        let years = (expiry - valuation).num_days() as f64 / 365.0;
        Self::new(spot, volatility, rate, years)
    }

    /// Check that spot and volatility are strictly positive.
    ///
    /// Non-positive volatility puts the formula outside its domain and must
    /// fail loudly rather than be divided through.
    pub fn validate(&self) -> HedgeResult<()> {
        if !(self.spot > 0.0) {
            return Err(HedgeError::invalid_market_input(
                "spot",
                self.spot,
                "> 0",
            ));
        }
        if !(self.volatility > 0.0) {
            return Err(HedgeError::invalid_market_input(
                "volatility",
                self.volatility,
                "> 0",
            ));
        }
        Ok(())
    }

    /// Derived snapshot with shifted spot/volatility and elapsed time.
    ///
    /// The time shift clamps at the epsilon floor; a volatility shift that
    /// drives volatility non-positive is caught by `validate` when the
    /// shocked snapshot is priced.
    pub fn bumped(&self, spot_shift: f64, vol_shift: f64, years_elapsed: f64) -> Self {
        Self::new(
            self.spot + spot_shift,
            self.volatility + vol_shift,
            self.rate,
            self.time_to_expiry - years_elapsed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_clamp() {
        let m = MarketState::new(70.0, 0.35, 0.0, -0.5);
        assert_eq!(m.time_to_expiry, MIN_TIME_TO_EXPIRY);

        let m = MarketState::new(70.0, 0.35, 0.0, 0.0);
        assert_eq!(m.time_to_expiry, MIN_TIME_TO_EXPIRY);
    }

    #[test]
    fn test_validate() {
        assert!(MarketState::new(70.0, 0.35, 0.05, 0.25).validate().is_ok());

        let err = MarketState::new(70.0, -0.1, 0.05, 0.25).validate();
        match err {
            Err(HedgeError::InvalidMarketInput { field, .. }) => {
                assert_eq!(field, "volatility")
            }
            other => panic!("expected InvalidMarketInput, got {:?}", other),
        }

        let err = MarketState::new(0.0, 0.35, 0.05, 0.25).validate();
        match err {
            Err(HedgeError::InvalidMarketInput { field, .. }) => assert_eq!(field, "spot"),
            other => panic!("expected InvalidMarketInput, got {:?}", other),
        }
    }

    #[test]
    fn test_with_expiry_date() {
        let valuation = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2025, 2, 19).unwrap();
        let m = MarketState::with_expiry_date(70.0, 0.35, 0.0, valuation, expiry);
        assert!((m.time_to_expiry - 30.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_bumped() {
        let m = MarketState::new(70.0, 0.35, 0.0, 30.0 / 365.0);
        let shocked = m.bumped(2.5, -0.05, 1.0 / 365.0);
        assert!((shocked.spot - 72.5).abs() < 1e-12);
        assert!((shocked.volatility - 0.30).abs() < 1e-12);
        assert!((shocked.time_to_expiry - 29.0 / 365.0).abs() < 1e-12);
    }
}
