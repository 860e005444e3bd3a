//! hedgelab CLI
//!
//! Walks a sample options/futures book through the full analytics chain:
//! per-position Greeks, net portfolio Greeks, delta-hedge recommendation,
//! shock replay, and the hedge-optimizer scenario ladder.

use hedgelab::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("hedgelab - Options Hedging Analytics");
    println!("====================================\n");

    // Market snapshot: $70 spot, 35% vol, 30 days out
    let market = MarketState::new(70.0, 0.35, 0.0, 30.0 / 365.0);
    println!("Market:");
    println!("  Spot: ${:.2}", market.spot);
    println!("  Vol: {:.1}%", market.volatility * 100.0);
    println!("  Rate: {:.1}%", market.rate * 100.0);
    println!("  Expiry: {:.0} days\n", market.time_to_expiry * 365.0);

    // Sample book: long calls, short puts, a short futures leg
    let book = vec![
        Position::option(10_000.0, OptionSpec::call(72.0), 1.45),
        Position::option(-5_000.0, OptionSpec::put(68.0), 1.30),
        Position::futures(-2_000.0, 70.0),
    ];

    println!("Positions:");
    match position_breakdown(&book, &market) {
        Ok(rows) => {
            for (i, row) in rows.iter().enumerate() {
                println!(
                    "  {}: qty {:+.0}  delta/unit {:+.3}  net delta {:+.0}  P&L ${:+.0}",
                    i + 1,
                    row.quantity,
                    row.unit.delta,
                    row.net_delta,
                    row.pnl
                );
            }
        }
        Err(e) => {
            eprintln!("pricing failed: {}", e);
            return;
        }
    }

    let net = match aggregate(&book, &market) {
        Ok(net) => net,
        Err(e) => {
            eprintln!("aggregation failed: {}", e);
            return;
        }
    };
    println!("\nNet Greeks:");
    println!("  Delta: {:+.0}", net.delta);
    println!("  Gamma: {:+.2}", net.gamma);
    println!("  Vega:  {:+.0} (per vol point: {:+.1})", net.vega, net.vega / 100.0);
    println!("  Theta: {:+.0}/yr (per day: {:+.1})", net.theta, net.theta / 365.0);
    println!("  P&L:   ${:+.0}", net.pnl);

    // Delta hedge recommendation
    let hedge = recommend_delta_hedge(net.delta, 1.0);
    match hedge.action {
        HedgeAction::None => println!("\nDelta hedge: book is already neutral"),
        action => println!(
            "\nDelta hedge: {:?} {:.0} futures",
            action, hedge.quantity
        ),
    }

    // Shock replay
    println!("\nShock scenarios:");
    for scenario in [
        ShockScenario::spot(2.0),
        ShockScenario::spot(-2.0),
        ShockScenario::new(0.0, 0.05, 0.0),
        ShockScenario::new(0.0, 0.0, 7.0),
    ] {
        match shock_pnl(&book, &market, scenario) {
            Ok(report) => println!(
                "  spot {:+.1}  vol {:+.2}  days {:+.0}  ->  P&L change ${:+.0}",
                scenario.spot_shift,
                scenario.vol_shift,
                scenario.days_elapsed,
                report.pnl_change
            ),
            Err(e) => println!("  scenario failed: {}", e),
        }
    }

    // Hedge optimizer scenario ladder
    let menu = vec![
        HedgeInstrument::futures("futures", 0.0),
        HedgeInstrument::option("atm-straddle", 0.0, 0.08, 22.0, -5.0, 0.5),
        HedgeInstrument::option("otm-call", 0.25, 0.03, 9.0, -2.0, 0.2),
    ];

    println!("\nHedge optimizer:");
    for outcome in run_scenarios(&standard_scenarios(&net), &menu, &OptimizerConfig::default()) {
        match outcome.result {
            Ok(solution) => {
                println!("  {}:", outcome.name);
                for (inst, qty) in menu.iter().zip(&solution.quantities) {
                    println!("    {:<14} {:+.1}", inst.name, qty);
                }
                println!(
                    "    cost ${:.2}, max residual {:.3}, {} iterations",
                    solution.cost,
                    solution.residual.max_abs(),
                    solution.iterations
                );
                if let Ok(json) = serde_json::to_string(&solution.residual) {
                    println!("    residuals: {}", json);
                }
            }
            Err(e) => println!("  {}: {}", outcome.name, e),
        }
    }
}
