//! Error types for hedgelab

use thiserror::Error;

use crate::hedging::HedgeSolution;

#[derive(Error, Debug)]
pub enum HedgeError {
    /// A market or contract input outside its valid domain.
    #[error("invalid market input: {field} = {value} must be {constraint}")]
    InvalidMarketInput {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// A position that cannot be priced.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// The hedge optimizer exhausted its iteration budget. Carries the best
    /// iterate found so callers can inspect its residuals instead of
    /// mistaking it for an exact solution.
    #[error("hedge optimizer did not converge within {iterations} iterations")]
    HedgeNotFound {
        iterations: usize,
        best: Box<HedgeSolution>,
    },
}

pub type HedgeResult<T> = Result<T, HedgeError>;

impl HedgeError {
    pub fn invalid_market_input(
        field: &'static str,
        value: f64,
        constraint: &'static str,
    ) -> Self {
        Self::InvalidMarketInput {
            field,
            value,
            constraint,
        }
    }

    pub fn invalid_position(msg: impl Into<String>) -> Self {
        Self::InvalidPosition(msg.into())
    }
}
