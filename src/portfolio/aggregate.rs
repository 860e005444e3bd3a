//! Portfolio aggregation
//!
//! Sums position-weighted Greeks across a heterogeneous book of options and
//! futures. Two invariants are enforced structurally:
//!
//! - Direction comes only from the signed quantity times long-basis per-unit
//!   Greeks. There is no separate long/short flag to fall out of sync.
//! - P&L nets the trade price out of the mark, so unrealized P&L is never
//!   conflated with notional exposure.

use serde::{Deserialize, Serialize};

use crate::core::{Greeks, HedgeResult, MarketState, PortfolioGreeks, Position};
use crate::pricing::instrument_greeks;

/// Net Greeks, value, and P&L for a book under one market snapshot.
///
/// An empty book is a valid book: the result is all zeros, not an error.
pub fn aggregate(positions: &[Position], market: &MarketState) -> HedgeResult<PortfolioGreeks> {
    let mut net = PortfolioGreeks::default();

    for position in positions {
        if position.quantity == 0.0 {
            continue;
        }
        let unit = instrument_greeks(market, &position.instrument)?;
        net.add_position(&unit, position.quantity, position.cost_basis());
    }

    Ok(net)
}

/// One row of the per-position view: the per-unit Greeks alongside the
/// position's net delta and P&L.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub quantity: f64,
    /// Long-basis per-unit Greeks for the instrument
    pub unit: Greeks,
    /// quantity * unit delta
    pub net_delta: f64,
    /// quantity * (mark - cost basis)
    pub pnl: f64,
}

/// Per-position breakdown of a book, in input order. Zero-quantity entries
/// are skipped, matching [`aggregate`].
pub fn position_breakdown(
    positions: &[Position],
    market: &MarketState,
) -> HedgeResult<Vec<PositionReport>> {
    let mut rows = Vec::with_capacity(positions.len());

    for position in positions {
        if position.quantity == 0.0 {
            continue;
        }
        let unit = instrument_greeks(market, &position.instrument)?;
        rows.push(PositionReport {
            quantity: position.quantity,
            unit,
            net_delta: position.quantity * unit.delta,
            pnl: position.quantity * (unit.price - position.cost_basis()),
        });
    }

    Ok(rows)
}
