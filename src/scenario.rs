//! Scenario runner for batch projections
//!
//! Each projection owns its entity states, so independent scenarios are run
//! in parallel with no shared mutable data.

use rayon::prelude::*;
use std::path::Path;

use crate::error::{PortfolioError, ProjectionError};
use crate::portfolio::{load_portfolio, Portfolio};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Runs projections for a base portfolio and variations of it
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_json_path("portfolio.json")?;
///
/// // Compare the same portfolio over several horizons
/// for result in runner.run_horizons(&[5, 10, 25]) {
///     println!("{:.2}", result?.summary().final_cash_profit);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_portfolio: Portfolio,
}

impl ScenarioRunner {
    pub fn new(base_portfolio: Portfolio) -> Self {
        Self { base_portfolio }
    }

    /// Create runner by loading the base portfolio from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, PortfolioError> {
        Ok(Self::new(load_portfolio(path)?))
    }

    /// Project the base portfolio over its own horizon
    pub fn run(&self) -> Result<ProjectionResult, ProjectionError> {
        ProjectionEngine::project_portfolio(&self.base_portfolio)
    }

    /// Project the base portfolio over a different horizon
    pub fn run_with_horizon(&self, horizon_years: u32) -> Result<ProjectionResult, ProjectionError> {
        let config = ProjectionConfig {
            horizon_years,
            ..self.base_portfolio.config()
        };
        ProjectionEngine::new(config)
            .project(&self.base_portfolio.investments, &self.base_portfolio.loans)
    }

    /// Project the base portfolio over each horizon, in input order
    pub fn run_horizons(&self, horizons: &[u32]) -> Vec<Result<ProjectionResult, ProjectionError>> {
        log::info!("Running {} horizons in parallel", horizons.len());

        horizons
            .par_iter()
            .map(|&years| self.run_with_horizon(years))
            .collect()
    }

    /// Project the base portfolio after applying each variation to a copy of it
    pub fn run_variations<F>(&self, count: usize, vary: F) -> Vec<Result<ProjectionResult, ProjectionError>>
    where
        F: Fn(usize, &mut Portfolio) + Sync,
    {
        let portfolios: Vec<Portfolio> = (0..count)
            .map(|index| {
                let mut portfolio = self.base_portfolio.clone();
                vary(index, &mut portfolio);
                portfolio
            })
            .collect();

        run_batch(&portfolios)
    }

    /// Get reference to the base portfolio
    pub fn portfolio(&self) -> &Portfolio {
        &self.base_portfolio
    }
}

/// Project many independent portfolios in parallel, results in input order
pub fn run_batch(portfolios: &[Portfolio]) -> Vec<Result<ProjectionResult, ProjectionError>> {
    log::info!("Running {} portfolios in parallel", portfolios.len());

    portfolios
        .par_iter()
        .map(ProjectionEngine::project_portfolio)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{InterestRate, Investment, Loan};
    use crate::projection::GroupBy;

    fn test_portfolio() -> Portfolio {
        Portfolio {
            horizon_years: 10,
            group_by: GroupBy::Years,
            investments: vec![Investment::new("fund", "Fund", 10_000.0)
                .with_monthly_contribution(200.0)
                .with_growth_rate(InterestRate::effective(5.0))],
            loans: vec![Loan::new("loan", "Loan", 5_000.0, InterestRate::nominal(6.0), 3, 160.0)],
        }
    }

    #[test]
    fn test_scenario_runner_horizons() {
        let runner = ScenarioRunner::new(test_portfolio());
        let results = runner.run_horizons(&[1, 5, 10]);

        assert_eq!(results.len(), 3);
        let lengths: Vec<usize> = results.iter().map(|r| r.as_ref().unwrap().snapshots.len()).collect();
        assert_eq!(lengths, vec![13, 61, 121]);
    }

    #[test]
    fn test_variations_higher_growth_more_value() {
        let runner = ScenarioRunner::new(test_portfolio());
        let rates = [2.0, 5.0, 8.0];

        let results = runner.run_variations(rates.len(), |index, portfolio| {
            portfolio.investments[0].growth_rate = InterestRate::effective(rates[index]);
        });

        let finals: Vec<f64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().summary().final_cash_out_value)
            .collect();
        assert!(finals[0] < finals[1] && finals[1] < finals[2]);
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let portfolios = vec![test_portfolio(), Portfolio { horizon_years: 2, ..test_portfolio() }];
        let batch = run_batch(&portfolios);

        for (portfolio, result) in portfolios.iter().zip(&batch) {
            assert_eq!(result, &ProjectionEngine::project_portfolio(portfolio));
        }
    }

    #[test]
    fn test_invalid_horizon_reported_per_scenario() {
        let runner = ScenarioRunner::new(test_portfolio());
        let results = runner.run_horizons(&[0, 1]);

        assert_eq!(results[0], Err(ProjectionError::InvalidHorizon { years: 0 }));
        assert!(results[1].is_ok());
    }
}
