//! Instrument and position definitions
//!
//! A book is a list of [`Position`]s: a signed quantity of either a European
//! option or a futures contract, plus the trade price it was opened at.
//! Direction lives in the sign of the quantity, never in a separate flag, so
//! short-position Greeks are always `quantity * long_basis_greek`.

use serde::{Deserialize, Serialize};

/// Option kind (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionKind::Call => 1.0,
            OptionKind::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }
}

/// European option contract terms. Pure value type; two specs with the same
/// fields are the same contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Strike price
    pub strike: f64,
    /// Call or put
    pub kind: OptionKind,
    /// Units of underlying per position unit (1.0 = quoted per single unit).
    pub contract_size: f64,
}

impl OptionSpec {
    pub fn new(strike: f64, kind: OptionKind) -> Self {
        Self {
            strike,
            kind,
            contract_size: 1.0,
        }
    }

    pub fn with_contract_size(strike: f64, kind: OptionKind, contract_size: f64) -> Self {
        Self {
            strike,
            kind,
            contract_size,
        }
    }

    pub fn call(strike: f64) -> Self {
        Self::new(strike, OptionKind::Call)
    }

    pub fn put(strike: f64) -> Self {
        Self::new(strike, OptionKind::Put)
    }
}

/// A tradeable instrument: an option contract or a futures marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Instrument {
    European(OptionSpec),
    /// Linear futures. Marked relative to the entry price: per-unit value is
    /// `spot - entry_price`, zero at the spot the position was opened at.
    Futures {
        entry_price: f64,
    },
}

/// A signed holding of one instrument.
///
/// `quantity > 0` is long, `< 0` is short. `trade_price` is the per-unit
/// premium paid at open and is the cost basis for option P&L; for futures
/// the entry price lives on the instrument and the basis is already netted
/// into the mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub quantity: f64,
    pub instrument: Instrument,
    pub trade_price: f64,
}

impl Position {
    /// Long/short option opened at `trade_price` per unit.
    pub fn option(quantity: f64, spec: OptionSpec, trade_price: f64) -> Self {
        Self {
            quantity,
            instrument: Instrument::European(spec),
            trade_price,
        }
    }

    /// Long/short futures opened at `entry_price`.
    pub fn futures(quantity: f64, entry_price: f64) -> Self {
        Self {
            quantity,
            instrument: Instrument::Futures { entry_price },
            trade_price: 0.0,
        }
    }

    pub fn is_futures(&self) -> bool {
        matches!(self.instrument, Instrument::Futures { .. })
    }

    /// Per-unit cost basis netted against the mark in P&L.
    /// Futures marks are already entry-relative, so their basis is zero.
    pub fn cost_basis(&self) -> f64 {
        match self.instrument {
            Instrument::European(_) => self.trade_price,
            Instrument::Futures { .. } => 0.0,
        }
    }
}
