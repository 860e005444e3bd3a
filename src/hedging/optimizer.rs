//! Hedge optimizer
//!
//! Selects quantities of a fixed menu of hedge instruments that drive the
//! chosen Greek exposures to their targets at minimum trading cost. The
//! objective is transaction cost plus a heavily weighted quadratic penalty
//! on the Greek mismatch, minimized by a bounded Nelder-Mead search (same
//! hand-rolled-solver idiom as the IV solvers in this codebase: iteration
//! budget, tolerance, typed error on exhaustion).
//!
//! Gamma and vega mismatches are weighted above delta by default: residual
//! delta is cheap to fix with futures later, residual gamma/vega is not.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{HedgeError, HedgeResult, PortfolioGreeks};

/// A tradeable hedge instrument with fixed per-unit exposures and cost.
/// Static menu entry, immutable configuration; never derived from the
/// user's book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeInstrument {
    pub name: String,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    /// Transaction cost per unit traded (applied to |quantity|)
    pub cost: f64,
}

impl HedgeInstrument {
    /// Linear futures: delta one, no optionality, optional per-unit cost.
    pub fn futures(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            delta: 1.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            cost,
        }
    }

    pub fn option(
        name: impl Into<String>,
        delta: f64,
        gamma: f64,
        vega: f64,
        theta: f64,
        cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            delta,
            gamma,
            vega,
            theta,
            cost,
        }
    }
}

/// Target Greek exposures for the hedge basket. `None` removes that Greek
/// from the objective entirely; it is not a target of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HedgeTargets {
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub vega: Option<f64>,
}

impl HedgeTargets {
    pub fn delta_only(delta: f64) -> Self {
        Self {
            delta: Some(delta),
            ..Default::default()
        }
    }

    /// Targets that flatten the book's delta.
    pub fn neutralize_delta(net: &PortfolioGreeks) -> Self {
        Self::delta_only(-net.delta)
    }

    /// Targets that flatten delta and vega.
    pub fn neutralize_delta_vega(net: &PortfolioGreeks) -> Self {
        Self {
            delta: Some(-net.delta),
            gamma: None,
            vega: Some(-net.vega),
        }
    }

    /// Targets that flatten delta, gamma, and vega.
    pub fn neutralize_all(net: &PortfolioGreeks) -> Self {
        Self {
            delta: Some(-net.delta),
            gamma: Some(-net.gamma),
            vega: Some(-net.vega),
        }
    }

    fn is_empty(&self) -> bool {
        self.delta.is_none() && self.gamma.is_none() && self.vega.is_none()
    }
}

/// Greek exposure of a hedge basket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GreekExposure {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
}

/// Target-minus-achieved residual, per targeted Greek.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GreekResidual {
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub vega: Option<f64>,
}

impl GreekResidual {
    /// Largest targeted residual in absolute value.
    pub fn max_abs(&self) -> f64 {
        [self.delta, self.gamma, self.vega]
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, r| acc.max(r.abs()))
    }
}

/// Solver configuration: penalty weights, bounds, iteration budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Symmetric quantity bound per instrument: x in [-bound, +bound].
    /// Must be wide enough not to bind in the common case; a binding bound
    /// produces a basket that only looks neutral.
    pub bound: f64,
    pub weight_delta: f64,
    pub weight_gamma: f64,
    pub weight_vega: f64,
    /// Overall scale on the Greek penalty relative to cost, so near-exact
    /// matching dominates cost minimization.
    pub penalty_scale: f64,
    pub max_iterations: usize,
    /// Relative tolerance on the objective spread at convergence.
    pub tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            bound: 100_000.0,
            weight_delta: 1.0,
            weight_gamma: 100.0,
            weight_vega: 10.0,
            penalty_scale: 1e6,
            max_iterations: 2_000,
            tolerance: 1e-10,
        }
    }
}

/// A solved hedge basket with its realized exposures and residuals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeSolution {
    /// Signed quantity per instrument, aligned with the input menu.
    pub quantities: Vec<f64>,
    pub achieved: GreekExposure,
    pub residual: GreekResidual,
    /// Total transaction cost of the basket.
    pub cost: f64,
    pub iterations: usize,
}

fn basket_exposure(x: &Array1<f64>, instruments: &[HedgeInstrument]) -> GreekExposure {
    let mut exposure = GreekExposure::default();
    for (xi, inst) in x.iter().zip(instruments) {
        exposure.delta += xi * inst.delta;
        exposure.gamma += xi * inst.gamma;
        exposure.vega += xi * inst.vega;
    }
    exposure
}

fn basket_cost(x: &Array1<f64>, instruments: &[HedgeInstrument]) -> f64 {
    x.iter()
        .zip(instruments)
        .map(|(xi, inst)| xi.abs() * inst.cost)
        .sum()
}

fn objective(
    x: &Array1<f64>,
    instruments: &[HedgeInstrument],
    targets: &HedgeTargets,
    config: &OptimizerConfig,
) -> f64 {
    let exposure = basket_exposure(x, instruments);
    let mut penalty = 0.0;
    if let Some(t) = targets.delta {
        let miss = exposure.delta - t;
        penalty += config.weight_delta * miss * miss;
    }
    if let Some(t) = targets.gamma {
        let miss = exposure.gamma - t;
        penalty += config.weight_gamma * miss * miss;
    }
    if let Some(t) = targets.vega {
        let miss = exposure.vega - t;
        penalty += config.weight_vega * miss * miss;
    }
    basket_cost(x, instruments) + config.penalty_scale * penalty
}

fn solution_at(
    x: &Array1<f64>,
    instruments: &[HedgeInstrument],
    targets: &HedgeTargets,
    iterations: usize,
) -> HedgeSolution {
    let achieved = basket_exposure(x, instruments);
    HedgeSolution {
        quantities: x.to_vec(),
        residual: GreekResidual {
            delta: targets.delta.map(|t| t - achieved.delta),
            gamma: targets.gamma.map(|t| t - achieved.gamma),
            vega: targets.vega.map(|t| t - achieved.vega),
        },
        achieved,
        cost: basket_cost(x, instruments),
        iterations,
    }
}

/// Minimum-cost hedge basket achieving the targeted Greeks.
///
/// Bounded Nelder-Mead over one quantity per instrument. Exhausting the
/// iteration budget is surfaced as [`HedgeError::HedgeNotFound`] carrying
/// the best iterate and its residuals; it is never passed off as an exact
/// solution.
pub fn optimize_hedge(
    targets: &HedgeTargets,
    instruments: &[HedgeInstrument],
    config: &OptimizerConfig,
) -> HedgeResult<HedgeSolution> {
    if instruments.is_empty() {
        return Err(HedgeError::invalid_position("empty hedge instrument menu"));
    }
    if targets.is_empty() {
        return Err(HedgeError::invalid_position(
            "no Greek targets set for hedge optimization",
        ));
    }

    let n = instruments.len();
    let clamp = |x: Array1<f64>| x.mapv(|v| v.clamp(-config.bound, config.bound));
    let f = |x: &Array1<f64>| objective(x, instruments, targets, config);

    // Initial simplex around the zero basket.
    let step = 0.1 * config.bound.max(1.0);
    let mut vertices: Vec<Array1<f64>> = Vec::with_capacity(n + 1);
    vertices.push(Array1::zeros(n));
    for i in 0..n {
        let mut v = Array1::zeros(n);
        v[i] = step;
        vertices.push(clamp(v));
    }
    let mut values: Vec<f64> = vertices.iter().map(|v| f(v)).collect();

    // Standard Nelder-Mead coefficients
    let (alpha, gamma, rho, sigma) = (1.0, 2.0, 0.5, 0.5);
    let x_tol = config.tolerance.sqrt();

    for iteration in 0..config.max_iterations {
        // Order vertices best..worst
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap());
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        // Convergence: objective spread and simplex diameter both collapsed
        let f_spread = values[worst] - values[best];
        let diameter = vertices
            .iter()
            .map(|v| {
                (v - &vertices[best])
                    .iter()
                    .fold(0.0_f64, |acc, d| acc.max(d.abs()))
            })
            .fold(0.0_f64, f64::max);
        let x_scale = 1.0 + vertices[best].iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if f_spread <= config.tolerance * (1.0 + values[best].abs()) && diameter <= x_tol * x_scale
        {
            debug!(
                iterations = iteration,
                objective = values[best],
                "hedge optimizer converged"
            );
            return Ok(solution_at(&vertices[best], instruments, targets, iteration));
        }

        // Centroid of all vertices except the worst
        let mut centroid = Array1::<f64>::zeros(n);
        for &i in order.iter().take(n) {
            centroid = centroid + &vertices[i];
        }
        centroid = centroid / n as f64;

        // Reflection
        let reflected = clamp(&centroid + &((&centroid - &vertices[worst]) * alpha));
        let f_reflected = f(&reflected);

        if f_reflected < values[best] {
            // Expansion
            let expanded = clamp(&centroid + &((&reflected - &centroid) * gamma));
            let f_expanded = f(&expanded);
            if f_expanded < f_reflected {
                vertices[worst] = expanded;
                values[worst] = f_expanded;
            } else {
                vertices[worst] = reflected;
                values[worst] = f_reflected;
            }
            continue;
        }

        if f_reflected < values[second_worst] {
            vertices[worst] = reflected;
            values[worst] = f_reflected;
            continue;
        }

        // Contraction: outside toward the reflected point if it improved on
        // the worst, inside toward the worst vertex otherwise
        let contracted = if f_reflected < values[worst] {
            clamp(&centroid + &((&reflected - &centroid) * rho))
        } else {
            clamp(&centroid + &((&vertices[worst] - &centroid) * rho))
        };
        let f_contracted = f(&contracted);
        if f_contracted < values[worst].min(f_reflected) {
            vertices[worst] = contracted;
            values[worst] = f_contracted;
            continue;
        }

        // Shrink toward the best vertex
        let best_vertex = vertices[best].clone();
        for i in 0..=n {
            if i == best {
                continue;
            }
            vertices[i] = clamp(&best_vertex + &((&vertices[i] - &best_vertex) * sigma));
            values[i] = f(&vertices[i]);
        }
    }

    let best = values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap_or(0);
    let best_effort = solution_at(
        &vertices[best],
        instruments,
        targets,
        config.max_iterations,
    );
    warn!(
        max_iterations = config.max_iterations,
        max_residual = best_effort.residual.max_abs(),
        "hedge optimizer exhausted its iteration budget"
    );
    Err(HedgeError::HedgeNotFound {
        iterations: config.max_iterations,
        best: Box::new(best_effort),
    })
}

/// A named optimization run with its own target subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeScenario {
    pub name: String,
    pub targets: HedgeTargets,
}

impl HedgeScenario {
    pub fn new(name: impl Into<String>, targets: HedgeTargets) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }
}

/// The conventional scenario ladder for a book: delta-only, delta+vega,
/// full delta+gamma+vega.
pub fn standard_scenarios(net: &PortfolioGreeks) -> Vec<HedgeScenario> {
    vec![
        HedgeScenario::new("delta-neutral", HedgeTargets::neutralize_delta(net)),
        HedgeScenario::new("delta-vega-neutral", HedgeTargets::neutralize_delta_vega(net)),
        HedgeScenario::new("delta-gamma-vega-neutral", HedgeTargets::neutralize_all(net)),
    ]
}

/// Outcome of one named scenario.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: HedgeResult<HedgeSolution>,
}

/// Run each scenario through the same solve with its own targets.
pub fn run_scenarios(
    scenarios: &[HedgeScenario],
    instruments: &[HedgeInstrument],
    config: &OptimizerConfig,
) -> Vec<ScenarioOutcome> {
    scenarios
        .iter()
        .map(|scenario| ScenarioOutcome {
            name: scenario.name.clone(),
            result: optimize_hedge(&scenario.targets, instruments, config),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<HedgeInstrument> {
        vec![
            HedgeInstrument::futures("futures", 0.0),
            HedgeInstrument::option("atm-straddle", 0.0, 0.08, 22.0, -5.0, 0.5),
        ]
    }

    #[test]
    fn test_futures_only_delta_neutral() {
        // Book with net delta 4500 (10000 units at 0.45): the hedge is
        // short 4500 futures at zero cost.
        let targets = HedgeTargets::delta_only(-4500.0);
        let instruments = vec![HedgeInstrument::futures("futures", 0.0)];
        let solution =
            optimize_hedge(&targets, &instruments, &OptimizerConfig::default()).unwrap();

        assert!((solution.quantities[0] + 4500.0).abs() < 1.0);
        assert!(solution.residual.delta.unwrap().abs() < 1.0);
        assert_eq!(solution.cost, 0.0);
        assert!(solution.residual.gamma.is_none());
        assert!(solution.residual.vega.is_none());
    }

    #[test]
    fn test_delta_vega_uses_both_instruments() {
        let targets = HedgeTargets {
            delta: Some(-2000.0),
            gamma: None,
            vega: Some(-1100.0),
        };
        let solution =
            optimize_hedge(&targets, &menu(), &OptimizerConfig::default()).unwrap();

        // Straddle is the only vega source: -1100/22 = -50 units
        assert!((solution.quantities[1] + 50.0).abs() < 1.0);
        // Futures absorb the remaining delta (straddle has none here)
        assert!((solution.quantities[0] + 2000.0).abs() < 2.0);
        assert!(solution.residual.max_abs() < 2.0);
        assert!(solution.cost > 0.0);
    }

    #[test]
    fn test_untargeted_greek_ignored() {
        // Delta-only targets leave the straddle untouched: trading it only
        // adds cost without reducing the penalty.
        let targets = HedgeTargets::delta_only(-1000.0);
        let solution =
            optimize_hedge(&targets, &menu(), &OptimizerConfig::default()).unwrap();
        assert!(solution.quantities[1].abs() < 5.0);
        assert!((solution.quantities[0] + 1000.0).abs() < 5.0);
    }

    #[test]
    fn test_empty_menu_rejected() {
        let result = optimize_hedge(
            &HedgeTargets::delta_only(-100.0),
            &[],
            &OptimizerConfig::default(),
        );
        assert!(matches!(result, Err(HedgeError::InvalidPosition(_))));
    }

    #[test]
    fn test_no_targets_rejected() {
        let result =
            optimize_hedge(&HedgeTargets::default(), &menu(), &OptimizerConfig::default());
        assert!(matches!(result, Err(HedgeError::InvalidPosition(_))));
    }

    #[test]
    fn test_budget_exhaustion_carries_best_iterate() {
        let config = OptimizerConfig {
            max_iterations: 2,
            ..Default::default()
        };
        let result = optimize_hedge(
            &HedgeTargets::delta_only(-4500.0),
            &[HedgeInstrument::futures("futures", 0.0)],
            &config,
        );
        match result {
            Err(HedgeError::HedgeNotFound { iterations, best }) => {
                assert_eq!(iterations, 2);
                assert_eq!(best.quantities.len(), 1);
                // Best effort is reported honestly: residual is nonzero
                assert!(best.residual.delta.unwrap().abs() > 0.0);
            }
            other => panic!("expected HedgeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_standard_scenarios_ladder() {
        let net = PortfolioGreeks {
            delta: 4500.0,
            gamma: 12.0,
            vega: 800.0,
            ..Default::default()
        };
        let scenarios = standard_scenarios(&net);
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].targets, HedgeTargets::delta_only(-4500.0));
        assert!(scenarios[1].targets.vega.is_some() && scenarios[1].targets.gamma.is_none());
        assert_eq!(scenarios[2].targets.gamma, Some(-12.0));

        let outcomes = run_scenarios(&scenarios, &menu(), &OptimizerConfig::default());
        assert_eq!(outcomes.len(), 3);
        let delta_only = outcomes[0].result.as_ref().unwrap();
        assert!(delta_only.residual.delta.unwrap().abs() < 1.0);
    }

    #[test]
    fn test_residual_max_abs() {
        let residual = GreekResidual {
            delta: Some(-0.5),
            gamma: None,
            vega: Some(2.0),
        };
        assert_eq!(residual.max_abs(), 2.0);
        assert_eq!(GreekResidual::default().max_abs(), 0.0);
    }
}
