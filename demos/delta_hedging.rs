//! Example: delta hedging a small options book
//!
//! Run with: cargo run --example delta_hedging

use hedgelab::prelude::*;

fn main() {
    // Market snapshot
    let spot = 70.0;
    let vol = 0.35; // 35% implied vol
    let rate = 0.0;
    let days = 30.0;
    let market = MarketState::new(spot, vol, rate, days / 365.0);

    println!("=== Delta Hedging Walkthrough ===\n");
    println!("Spot:   ${:.2}", spot);
    println!("Vol:    {:.1}%", vol * 100.0);
    println!("Expiry: {:.0} days\n", days);

    // Long 10,000 ATM calls, opened at the current mark
    let call = OptionSpec::call(70.0);
    let mark = price_and_greeks(&market, &call).unwrap();
    let book = vec![Position::option(10_000.0, call, mark.price)];

    println!("Book: long 10,000 calls at ${:.2} strike", call.strike);
    println!("Per-unit delta: {:.4}", mark.delta);
    println!("Per-unit gamma: {:.5}", mark.gamma);
    println!(
        "Per-unit theta: {:.4}/day\n",
        mark.theta_per_day()
    );

    // Net Greeks and the recommended hedge
    let net = aggregate(&book, &market).unwrap();
    println!("Net delta: {:+.0}", net.delta);

    let hedge = recommend_delta_hedge(net.delta, 1.0);
    println!("Hedge: {:?} {:.0} futures\n", hedge.action, hedge.quantity);

    // Apply the hedge as a futures position at the current spot
    let mut hedged = book.clone();
    hedged.push(Position::futures(hedge.signed_quantity(), spot));
    let hedged_net = aggregate(&hedged, &market).unwrap();
    println!("Hedged net delta: {:+.2}", hedged_net.delta);
    println!("Hedged net gamma: {:+.2} (unchanged: futures carry none)\n", hedged_net.gamma);

    // Shock the spot both ways: the hedged book is long gamma, so both
    // moves profit at first order zero
    println!("=== Spot Shocks on the Hedged Book ===\n");
    for shift in [-3.0, -1.0, 1.0, 3.0] {
        let report = shock_pnl(&hedged, &market, ShockScenario::spot(shift)).unwrap();
        println!("  spot {:+.1}: P&L change ${:+.0}", shift, report.pnl_change);
    }

    // Gamma/vega need optionality: run the optimizer ladder over a menu
    println!("\n=== Optimizer Scenario Ladder ===\n");
    let menu = vec![
        HedgeInstrument::futures("futures", 0.0),
        HedgeInstrument::option("atm-straddle", 0.0, 0.08, 22.0, -5.0, 0.5),
    ];
    for outcome in run_scenarios(&standard_scenarios(&net), &menu, &OptimizerConfig::default()) {
        match outcome.result {
            Ok(s) => println!(
                "  {:<24} qty {:?}  cost ${:.2}  max residual {:.3}",
                outcome.name,
                s.quantities.iter().map(|q| q.round()).collect::<Vec<_>>(),
                s.cost,
                s.residual.max_abs()
            ),
            Err(e) => println!("  {:<24} failed: {}", outcome.name, e),
        }
    }
}
