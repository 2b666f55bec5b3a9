//! Portfolio Projection CLI
//!
//! Loads a portfolio definition, projects it and writes the selected columns

use anyhow::{Context, Result};
use clap::Parser;
use portfolio_projection::{
    portfolio::load_portfolio,
    projection::{
        default_columns, write_csv, write_json, write_labelled_csv, Column, GroupBy, ProjectionEngine,
    },
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portfolio-projection", about = "Project a portfolio of investments and loans month by month")]
struct Cli {
    /// Portfolio definition (JSON)
    portfolio: PathBuf,

    /// Override the portfolio's horizon, in years
    #[arg(short, long)]
    years: Option<u32>,

    /// Row granularity: months or years (defaults to the portfolio's setting)
    #[arg(short, long)]
    group_by: Option<GroupBy>,

    /// Comma separated column paths, e.g. time.years,summary.cash_profit
    #[arg(short, long)]
    columns: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the full report as JSON instead of CSV
    #[arg(long)]
    json: bool,

    /// Add a row of display labels above the CSV header
    #[arg(long, conflicts_with = "json")]
    labels: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let portfolio = load_portfolio(&cli.portfolio)
        .with_context(|| format!("failed to load portfolio {}", cli.portfolio.display()))?;

    let mut config = portfolio.config();
    if let Some(years) = cli.years {
        config.horizon_years = years;
    }
    if let Some(group_by) = cli.group_by {
        config.group_by = group_by;
    }

    let engine = ProjectionEngine::new(config);
    let result = engine
        .project(&portfolio.investments, &portfolio.loans)
        .context("projection rejected")?;
    let group_by = engine.config().group_by;

    let columns = match &cli.columns {
        Some(paths) => Column::parse_list(paths)?,
        None => default_columns(&portfolio.investments, &portfolio.loans),
    };

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("unable to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if cli.json {
        write_json(&mut writer, &result, group_by)?;
    } else if cli.labels {
        write_labelled_csv(&mut writer, &result, &columns, group_by)?;
    } else {
        write_csv(&mut writer, &result, &columns, group_by)?;
    }
    writer.flush()?;

    // Summary goes to stderr so stdout stays machine readable
    let summary = result.summary();
    eprintln!("\nSummary ({} months):", summary.total_months);
    eprintln!("  Cash Out Value:  {:>14.2}", summary.final_cash_out_value);
    eprintln!("  Remaining Debt:  {:>14.2}", summary.final_remaining_debt);
    eprintln!("  Cash Available:  {:>14.2}", summary.final_cash_available);
    eprintln!("  Cash Invested:   {:>14.2}", summary.final_cash_invested);
    eprintln!("  Cash Profit:     {:>14.2}", summary.final_cash_profit);
    eprintln!("  Equity:          {:>14.2}", summary.final_equity);
    eprintln!("  Profit:          {:>14.2}", summary.final_profit);
    match summary.debt_free_month {
        Some(month) => eprintln!("  Debt free from month {}", month),
        None => eprintln!("  Debt outstanding at end of horizon (peak {:.2})", summary.peak_remaining_debt),
    }

    Ok(())
}
