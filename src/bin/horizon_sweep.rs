//! Project a portfolio over a range of horizons and compare closing figures
//!
//! Each horizon is an independent run, executed in parallel.

use anyhow::{Context, Result};
use clap::Parser;
use portfolio_projection::ScenarioRunner;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "horizon-sweep", about = "Compare closing figures across projection horizons")]
struct Args {
    /// Portfolio definition (JSON)
    portfolio: PathBuf,

    /// Shortest horizon, in years
    #[arg(long, default_value_t = 1)]
    from: u32,

    /// Longest horizon, in years (defaults to the portfolio's horizon)
    #[arg(long)]
    to: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let runner = ScenarioRunner::from_json_path(&args.portfolio)
        .with_context(|| format!("failed to load portfolio {}", args.portfolio.display()))?;

    let to = args.to.unwrap_or(runner.portfolio().horizon_years);
    let horizons: Vec<u32> = (args.from..=to).collect();

    let start = Instant::now();
    let results = runner.run_horizons(&horizons);
    log::info!("Projected {} horizons in {:?}", horizons.len(), start.elapsed());

    println!(
        "{:>5} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Years", "CashAvailable", "CashInvested", "CashProfit", "Equity", "Profit"
    );
    println!("{}", "-".repeat(80));

    for (years, result) in horizons.iter().zip(results) {
        let summary = result.with_context(|| format!("{} year horizon rejected", years))?.summary();
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            years,
            summary.final_cash_available,
            summary.final_cash_invested,
            summary.final_cash_profit,
            summary.final_equity,
            summary.final_profit,
        );
    }

    Ok(())
}
