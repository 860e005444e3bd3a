//! Delta hedge recommendation
//!
//! Turns a net portfolio delta into a futures trade that flattens it. The
//! neutral band is a deliberate tolerance: rounding noise near zero should
//! not chatter between buy and sell recommendations.

use serde::{Deserialize, Serialize};

/// Direction of the recommended futures trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HedgeAction {
    Buy,
    Sell,
    None,
}

/// A recommended futures trade. `quantity` is the unsigned trade size;
/// direction is carried by `action`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeRecommendation {
    pub action: HedgeAction,
    pub quantity: f64,
}

impl HedgeRecommendation {
    /// Signed futures quantity: positive = buy, negative = sell.
    pub fn signed_quantity(&self) -> f64 {
        match self.action {
            HedgeAction::Buy => self.quantity,
            HedgeAction::Sell => -self.quantity,
            HedgeAction::None => 0.0,
        }
    }
}

/// Futures trade that neutralizes `net_delta`.
///
/// The required trade is the negative of net delta: a book that is long
/// delta gets a sell, a book that is short delta gets a buy. Within
/// `neutral_band` of flat, no trade.
pub fn recommend_delta_hedge(net_delta: f64, neutral_band: f64) -> HedgeRecommendation {
    if net_delta.abs() < neutral_band {
        return HedgeRecommendation {
            action: HedgeAction::None,
            quantity: 0.0,
        };
    }

    let required = -net_delta;
    if required > 0.0 {
        HedgeRecommendation {
            action: HedgeAction::Buy,
            quantity: required,
        }
    } else {
        HedgeRecommendation {
            action: HedgeAction::Sell,
            quantity: -required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_delta_sells() {
        let rec = recommend_delta_hedge(500.0, 1.0);
        assert_eq!(rec.action, HedgeAction::Sell);
        assert_eq!(rec.quantity, 500.0);
        assert_eq!(rec.signed_quantity(), -500.0);
    }

    #[test]
    fn test_short_delta_buys() {
        let rec = recommend_delta_hedge(-500.0, 1.0);
        assert_eq!(rec.action, HedgeAction::Buy);
        assert_eq!(rec.quantity, 500.0);
        assert_eq!(rec.signed_quantity(), 500.0);
    }

    #[test]
    fn test_inside_band_holds() {
        let rec = recommend_delta_hedge(0.2, 1.0);
        assert_eq!(rec.action, HedgeAction::None);
        assert_eq!(rec.quantity, 0.0);
        assert_eq!(rec.signed_quantity(), 0.0);
    }

    #[test]
    fn test_band_edge_trades() {
        // The band is strict: |delta| exactly at the band still hedges.
        let rec = recommend_delta_hedge(1.0, 1.0);
        assert_eq!(rec.action, HedgeAction::Sell);
        assert_eq!(rec.quantity, 1.0);
    }

    #[test]
    fn test_hedge_flattens_book() {
        // Applying the signed recommendation as a futures delta must land
        // inside the band.
        for net_delta in [4500.0, -1234.5, 0.7, -0.2] {
            let rec = recommend_delta_hedge(net_delta, 1.0);
            let after = net_delta + rec.signed_quantity();
            assert!(after.abs() < 1.0, "residual {} for {}", after, net_delta);
        }
    }
}
