//! Core projection engine for monthly portfolio projections

use std::collections::HashSet;

use crate::error::ProjectionError;
use crate::portfolio::{Investment, Loan, Portfolio};
use super::investment::InvestmentState;
use super::loan::LoanState;
use super::snapshot::{Aggregates, GroupBy, PeriodSnapshot, ProjectionResult};

/// Default horizon in years
pub const DEFAULT_HORIZON_YEARS: u32 = 25;

/// Longest horizon a projection accepts
pub const MAX_HORIZON_YEARS: u32 = 1_000;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Number of whole years to project
    pub horizon_years: u32,

    /// Granularity results are presented at
    pub group_by: GroupBy,
}

impl ProjectionConfig {
    pub fn with_horizon(horizon_years: u32) -> Self {
        Self {
            horizon_years,
            ..Self::default()
        }
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    /// Number of monthly advances, excluding the opening period
    pub fn projection_months(&self) -> u32 {
        self.horizon_years.saturating_mul(12)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            group_by: GroupBy::default(),
        }
    }
}

/// Reject inputs the engine cannot project
///
/// Results are addressed by entity id, so ids must be unique within the
/// investments and within the loans. An investment and a loan may share one.
pub fn validate_inputs(
    horizon_years: u32,
    investments: &[Investment],
    loans: &[Loan],
) -> Result<(), ProjectionError> {
    if horizon_years == 0 || horizon_years > MAX_HORIZON_YEARS {
        return Err(ProjectionError::InvalidHorizon { years: horizon_years });
    }

    let mut seen = HashSet::new();
    for investment in investments {
        if !seen.insert(investment.id.as_str()) {
            return Err(ProjectionError::DuplicateInvestmentId(investment.id.clone()));
        }
    }

    seen.clear();
    for loan in loans {
        if !seen.insert(loan.id.as_str()) {
            return Err(ProjectionError::DuplicateLoanId(loan.id.clone()));
        }
    }

    Ok(())
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run projection for a set of investments and loans
    ///
    /// Produces `horizon_years * 12 + 1` snapshots: the opening state followed
    /// by one snapshot per month. Every call starts from fresh entity states,
    /// so identical inputs always give identical output.
    pub fn project(
        &self,
        investments: &[Investment],
        loans: &[Loan],
    ) -> Result<ProjectionResult, ProjectionError> {
        validate_inputs(self.config.horizon_years, investments, loans)?;

        log::debug!(
            "Projecting {} investments and {} loans over {} years",
            investments.len(),
            loans.len(),
            self.config.horizon_years
        );

        let mut investment_states: Vec<InvestmentState> =
            investments.iter().map(InvestmentState::from_investment).collect();
        let mut loan_states: Vec<LoanState> = loans.iter().map(LoanState::from_loan).collect();

        let mut result = ProjectionResult::new(self.config.horizon_years);
        result.snapshots.reserve(self.config.projection_months() as usize + 1);

        for month_index in 0..=self.config.projection_months() {
            let year_index = month_index / 12;

            if month_index > 0 {
                for (state, investment) in investment_states.iter_mut().zip(investments) {
                    state.advance_month(investment);
                }

                for (state, loan) in loan_states.iter_mut().zip(loans) {
                    if loan.is_active(year_index) {
                        state.advance_month(loan.interest_rate.monthly_percentage, loan.monthly_payment);
                    } else if month_index % 12 == 0 && year_index == loan.term.saturating_add(1) {
                        log::trace!("Loan {} reached the end of its {} year term", loan.id, loan.term);
                    }
                }
            }

            result.add_snapshot(Self::snapshot(
                month_index,
                investments,
                &investment_states,
                loans,
                &loan_states,
            ));
        }

        Ok(result)
    }

    /// Run projection for a loaded portfolio, using the portfolio's own horizon
    pub fn project_portfolio(portfolio: &Portfolio) -> Result<ProjectionResult, ProjectionError> {
        Self::new(portfolio.config()).project(&portfolio.investments, &portfolio.loans)
    }

    fn snapshot(
        month_index: u32,
        investments: &[Investment],
        investment_states: &[InvestmentState],
        loans: &[Loan],
        loan_states: &[LoanState],
    ) -> PeriodSnapshot {
        let year_index = month_index / 12;

        PeriodSnapshot {
            month_index,
            year_index,
            month_ordinal: month_index + 1,
            year_ordinal: year_index + 1,
            investments: investment_states
                .iter()
                .zip(investments)
                .map(|(state, investment)| state.snapshot(investment))
                .collect(),
            loans: loan_states
                .iter()
                .zip(loans)
                .map(|(state, loan)| state.snapshot(loan))
                .collect(),
            aggregates: Aggregates::compute(investment_states, loan_states),
        }
    }
}

/// Project `horizon_years` of monthly snapshots for the given entities
pub fn run(
    horizon_years: u32,
    investments: &[Investment],
    loans: &[Loan],
) -> Result<Vec<PeriodSnapshot>, ProjectionError> {
    ProjectionEngine::new(ProjectionConfig::with_horizon(horizon_years))
        .project(investments, loans)
        .map(|result| result.snapshots)
}
