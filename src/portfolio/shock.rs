//! Shock scenario replay
//!
//! Re-prices a book under a bumped market snapshot (spot move, vol move,
//! elapsed time) and reports the P&L against the base snapshot. Both
//! evaluations go through the same full aggregation, so the shock P&L is
//! exact repricing, not a Greek approximation, and the entry cost cannot be
//! double-counted.

use serde::{Deserialize, Serialize};

use crate::core::{HedgeResult, MarketState, PortfolioGreeks, Position};

use super::aggregate;

/// A market shock expressed as absolute shifts from the base snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShockScenario {
    /// Absolute spot shift (same currency as spot)
    pub spot_shift: f64,
    /// Absolute volatility shift, decimal (-0.05 = vol down 5 points)
    pub vol_shift: f64,
    /// Calendar days elapsed before revaluation
    pub days_elapsed: f64,
}

impl ShockScenario {
    pub fn spot(spot_shift: f64) -> Self {
        Self {
            spot_shift,
            ..Default::default()
        }
    }

    pub fn new(spot_shift: f64, vol_shift: f64, days_elapsed: f64) -> Self {
        Self {
            spot_shift,
            vol_shift,
            days_elapsed,
        }
    }

    /// The shocked snapshot. A vol shift below zero vol is rejected when the
    /// shocked market is priced; elapsed time clamps at the expiry floor.
    pub fn apply(&self, base: &MarketState) -> MarketState {
        base.bumped(self.spot_shift, self.vol_shift, self.days_elapsed / 365.0)
    }
}

/// Result of replaying one shock against a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShockReport {
    pub scenario: ShockScenario,
    /// Book P&L at the base snapshot
    pub base: PortfolioGreeks,
    /// Book P&L at the shocked snapshot
    pub shocked: PortfolioGreeks,
    /// shocked P&L minus base P&L
    pub pnl_change: f64,
}

/// Re-price the book under `scenario` and report the resulting P&L move.
pub fn shock_pnl(
    positions: &[Position],
    market: &MarketState,
    scenario: ShockScenario,
) -> HedgeResult<ShockReport> {
    let base = aggregate(positions, market)?;
    let shocked = aggregate(positions, &scenario.apply(market))?;

    Ok(ShockReport {
        scenario,
        pnl_change: shocked.pnl - base.pnl,
        base,
        shocked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HedgeError, OptionSpec, Position};
    use crate::pricing::price_and_greeks;

    fn market() -> MarketState {
        MarketState::new(70.0, 0.35, 0.0, 30.0 / 365.0)
    }

    #[test]
    fn test_null_shock_is_flat() {
        let book = [
            Position::option(100.0, OptionSpec::call(70.0), 2.0),
            Position::futures(-45.0, 70.0),
        ];
        let report = shock_pnl(&book, &market(), ShockScenario::default()).unwrap();
        assert!(report.pnl_change.abs() < 1e-12);
    }

    #[test]
    fn test_spot_shock_matches_reprice() {
        // Shock P&L must equal quantity * (shocked mark - base mark),
        // with no entry-cost term sneaking back in.
        let m = market();
        let spec = OptionSpec::call(70.0);
        let book = [Position::option(100.0, spec, 5.0)];

        let scenario = ShockScenario::spot(3.0);
        let report = shock_pnl(&book, &m, scenario).unwrap();

        let base_mark = price_and_greeks(&m, &spec).unwrap().price;
        let shocked_mark = price_and_greeks(&scenario.apply(&m), &spec).unwrap().price;
        let expected = 100.0 * (shocked_mark - base_mark);
        assert!((report.pnl_change - expected).abs() < 1e-9);
    }

    #[test]
    fn test_short_futures_hedge_pins_pnl() {
        // Short futures at entry 70, spot back at 70: exactly zero P&L.
        let book = [Position::futures(-54.0, 70.0)];
        let report = shock_pnl(&book, &market(), ShockScenario::default()).unwrap();
        assert!(report.shocked.pnl.abs() < 1e-12);

        // Spot up two dollars: short loses 2/unit.
        let report = shock_pnl(&book, &market(), ShockScenario::spot(2.0)).unwrap();
        assert!((report.pnl_change - (-108.0)).abs() < 1e-9);
    }

    #[test]
    fn test_long_call_gains_on_rally() {
        let book = [Position::option(100.0, OptionSpec::call(70.0), 2.0)];
        let up = shock_pnl(&book, &market(), ShockScenario::spot(5.0)).unwrap();
        let down = shock_pnl(&book, &market(), ShockScenario::spot(-5.0)).unwrap();
        assert!(up.pnl_change > 0.0);
        assert!(down.pnl_change < 0.0);
        // Long gamma: the gain beats the loss for equal moves
        assert!(up.pnl_change + down.pnl_change > 0.0);
    }

    #[test]
    fn test_vol_crush_rejected_past_zero() {
        let book = [Position::option(10.0, OptionSpec::call(70.0), 2.0)];
        let result = shock_pnl(&book, &market(), ShockScenario::new(0.0, -0.40, 0.0));
        assert!(matches!(
            result,
            Err(HedgeError::InvalidMarketInput { field: "volatility", .. })
        ));
    }

    #[test]
    fn test_time_shock_decays_long_options() {
        let book = [Position::option(100.0, OptionSpec::call(70.0), 2.0)];
        let report = shock_pnl(&book, &market(), ShockScenario::new(0.0, 0.0, 7.0)).unwrap();
        assert!(report.pnl_change < 0.0);
    }
}
