//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing (closed form)
//! - Greeks computation (delta, gamma, vega, theta)
//! - Futures degenerate case (delta one, everything else zero)
//!
//! All outputs are per-unit and long-basis; portfolio direction is applied
//! by the aggregator through signed quantities.

use std::f64::consts::PI;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::core::{Greeks, HedgeError, HedgeResult, Instrument, MarketState, OptionKind, OptionSpec};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, vol, time) - vol * time.sqrt()
}

/// Closed-form price and Greeks for a European option under one market
/// snapshot.
///
/// Rejects non-positive spot, volatility, or strike with
/// [`HedgeError::InvalidMarketInput`] naming the violated field. Time to
/// expiry was already floored by [`MarketState::new`]; that clamp is the
/// only silent correction applied anywhere.
pub fn price_and_greeks(market: &MarketState, spec: &OptionSpec) -> HedgeResult<Greeks> {
    market.validate()?;
    if !(spec.strike > 0.0) {
        return Err(HedgeError::invalid_market_input(
            "strike",
            spec.strike,
            "> 0",
        ));
    }

    let (s, k) = (market.spot, spec.strike);
    let (r, vol, time) = (market.rate, market.volatility, market.time_to_expiry);

    let sqrt_t = time.sqrt();
    let d1 = d1(s, k, r, vol, time);
    let d2 = d1 - vol * sqrt_t;
    let df = (-r * time).exp();
    let pdf_d1 = norm_pdf(d1);

    let (price, delta, theta) = match spec.kind {
        OptionKind::Call => {
            let price = s * norm_cdf(d1) - k * df * norm_cdf(d2);
            let delta = norm_cdf(d1);
            let theta = -(s * pdf_d1 * vol) / (2.0 * sqrt_t) - r * k * df * norm_cdf(d2);
            (price, delta, theta)
        }
        OptionKind::Put => {
            let price = k * df * norm_cdf(-d2) - s * norm_cdf(-d1);
            let delta = -norm_cdf(-d1);
            let theta = -(s * pdf_d1 * vol) / (2.0 * sqrt_t) + r * k * df * norm_cdf(-d2);
            (price, delta, theta)
        }
    };

    // Gamma and vega are kind-independent. Raw units here; the /100 and
    // /365 reporting rescales live on Greeks accessors.
    let gamma = pdf_d1 / (s * vol * sqrt_t);
    let vega = s * pdf_d1 * sqrt_t;

    Ok(Greeks::new(price, delta, gamma, vega, theta).scale(spec.contract_size))
}

/// Degenerate Greeks for linear futures: mark = spot - entry (zero at the
/// entry spot, never absolute spot), delta one per long-basis unit, no
/// second-order or vol/time sensitivity.
pub fn futures_greeks(market: &MarketState, entry_price: f64) -> HedgeResult<Greeks> {
    if !(market.spot > 0.0) {
        return Err(HedgeError::invalid_market_input(
            "spot",
            market.spot,
            "> 0",
        ));
    }
    Ok(Greeks::new(market.spot - entry_price, 1.0, 0.0, 0.0, 0.0))
}

/// Per-unit Greeks for any instrument.
pub fn instrument_greeks(market: &MarketState, instrument: &Instrument) -> HedgeResult<Greeks> {
    match instrument {
        Instrument::European(spec) => price_and_greeks(market, spec),
        Instrument::Futures { entry_price } => futures_greeks(market, *entry_price),
    }
}
