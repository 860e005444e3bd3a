//! Greeks and portfolio-level aggregates
//!
//! [`Greeks`] are per-unit, long-basis sensitivities in raw annualized units:
//! vega per 1.00 of volatility, theta per year. The conventional reporting
//! rescales (vega per vol-point, theta per day) are boundary methods, not
//! baked into the core numbers, so aggregation and optimization always work
//! in one consistent unit system.

use serde::{Deserialize, Serialize};

/// Per-unit price and sensitivities for one instrument under one market
/// snapshot, quoted long-basis. Short exposure comes from the signed
/// quantity at aggregation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Mark price per unit. Spot-relative for futures (zero at entry).
    pub price: f64,
    /// dV/dS
    pub delta: f64,
    /// d²V/dS²
    pub gamma: f64,
    /// dV/dσ, per 1.00 change in volatility
    pub vega: f64,
    /// dV/dt, per year (negative = decay)
    pub theta: f64,
}

impl Greeks {
    pub fn new(price: f64, delta: f64, gamma: f64, vega: f64, theta: f64) -> Self {
        Self {
            price,
            delta,
            gamma,
            vega,
            theta,
        }
    }

    /// Scale all fields by a factor (signed quantity, contract size).
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            price: self.price * factor,
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            vega: self.vega * factor,
            theta: self.theta * factor,
        }
    }

    /// Vega per one volatility point (1% move), reporting convention.
    pub fn vega_per_vol_point(&self) -> f64 {
        self.vega / 100.0
    }

    /// Theta per calendar day, reporting convention.
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }
}

/// Quantity-weighted net Greeks and value for a whole book.
///
/// Derived fresh from positions + market on every request, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioGreeks {
    /// Net delta (units of underlying)
    pub delta: f64,
    /// Net gamma
    pub gamma: f64,
    /// Net vega, per 1.00 vol
    pub vega: f64,
    /// Net theta, per year
    pub theta: f64,
    /// Net mark-to-market value
    pub market_value: f64,
    /// Net unrealized P&L: mark-to-market minus cost basis
    pub pnl: f64,
    /// Number of nonzero positions aggregated
    pub positions: usize,
}

impl PortfolioGreeks {
    /// Fold one position into the totals.
    ///
    /// `unit` must be long-basis per-unit Greeks and `quantity` signed;
    /// shorts flip every contribution through the multiplication alone.
    pub fn add_position(&mut self, unit: &Greeks, quantity: f64, cost_basis: f64) {
        self.delta += quantity * unit.delta;
        self.gamma += quantity * unit.gamma;
        self.vega += quantity * unit.vega;
        self.theta += quantity * unit.theta;
        self.market_value += quantity * unit.price;
        self.pnl += quantity * (unit.price - cost_basis);
        self.positions += 1;
    }

    pub fn is_flat(&self, tolerance: f64) -> bool {
        self.delta.abs() <= tolerance
            && self.gamma.abs() <= tolerance
            && self.vega.abs() <= tolerance
            && self.theta.abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        let g = Greeks::new(2.0, 0.5, 0.04, 11.0, -8.0);
        let s = g.scale(-2.0);
        assert_eq!(s.price, -4.0);
        assert_eq!(s.delta, -1.0);
        assert_eq!(s.gamma, -0.08);
        assert_eq!(s.vega, -22.0);
        assert_eq!(s.theta, 16.0);
    }

    #[test]
    fn test_reporting_rescales() {
        let g = Greeks::new(0.0, 0.0, 0.0, 25.0, -36.5);
        assert!((g.vega_per_vol_point() - 0.25).abs() < 1e-12);
        assert!((g.theta_per_day() - (-0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_long_short_cancel() {
        let unit = Greeks::new(2.5, 0.45, 0.03, 12.0, -9.0);
        let mut net = PortfolioGreeks::default();
        net.add_position(&unit, 100.0, 2.0);
        net.add_position(&unit, -100.0, 2.0);

        assert_eq!(net.delta, 0.0);
        assert_eq!(net.gamma, 0.0);
        assert_eq!(net.vega, 0.0);
        assert_eq!(net.theta, 0.0);
        assert_eq!(net.pnl, 0.0);
        assert_eq!(net.positions, 2);
        assert!(net.is_flat(1e-12));
    }
}
