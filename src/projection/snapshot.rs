//! Output structures for projections

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::investment::InvestmentState;
use super::loan::LoanState;

/// One investment's figures at the end of a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSnapshot {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub initial_purchase_fee: f64,
    pub initial_purchase_price: f64,
    pub total_contributed: f64,
    pub interest_accrued: f64,
    pub monthly_maintenance_cost: f64,
    pub maintenance_cash_spent: f64,
    pub cash_out_fee_amount: f64,
    pub cash_out_value: f64,
}

/// One loan's figures at the end of a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub debt: f64,
    pub paid: f64,
    pub interest_accrued: f64,
}

/// Portfolio-wide figures, recomputed from the entity states every period
///
/// Two presentations of the same state are carried: the cash view
/// (`cash_available`, `cash_invested`, `cash_profit`) and the accrual view
/// (`equity`, `profit`). `cash_spent` counts the opening deposit once rather
/// than netting loan principal against later repayments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aggregates {
    pub total_cash_out_value: f64,
    pub remaining_debt: f64,
    pub cash_available: f64,
    pub cash_invested: f64,
    pub cash_profit: f64,
    pub equity: f64,
    pub profit: f64,
    pub cash_spent: f64,
}

impl Aggregates {
    pub fn compute(investments: &[InvestmentState], loans: &[LoanState]) -> Self {
        let total_cash_out_value: f64 = investments.iter().map(|i| i.current_cash_out_value).sum();
        let remaining_debt: f64 = loans.iter().map(|l| l.debt).sum();

        let purchase_price: f64 = investments.iter().map(|i| i.initial_purchase_price).sum();
        let contributed: f64 = investments.iter().map(|i| i.total_contributed).sum();
        let maintenance: f64 = investments.iter().map(|i| i.maintenance_cash_spent).sum();
        let borrowed: f64 = loans.iter().map(|l| l.initial_amount).sum();
        let repaid: f64 = loans.iter().map(|l| l.paid).sum();

        let cash_available = total_cash_out_value - remaining_debt;
        let cash_invested = (purchase_price + contributed + maintenance + repaid - borrowed).max(0.0);

        let profit = investments.iter().map(InvestmentState::net_return).sum::<f64>()
            - loans.iter().map(LoanState::cost).sum::<f64>();

        let initial_deposit = (purchase_price - borrowed).max(0.0);

        Self {
            total_cash_out_value,
            remaining_debt,
            cash_available,
            cash_invested,
            cash_profit: cash_available - cash_invested,
            equity: total_cash_out_value - remaining_debt,
            profit,
            cash_spent: initial_deposit + contributed + maintenance + repaid,
        }
    }
}

/// State of the whole portfolio at the end of one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    /// Months elapsed (0 = opening state)
    pub month_index: u32,

    /// Whole years elapsed
    pub year_index: u32,

    /// 1-based month counter for display
    pub month_ordinal: u32,

    /// 1-based year counter for display
    pub year_ordinal: u32,

    pub investments: Vec<InvestmentSnapshot>,
    pub loans: Vec<LoanSnapshot>,
    pub aggregates: Aggregates,
}

impl PeriodSnapshot {
    pub fn investment(&self, id: &str) -> Option<&InvestmentSnapshot> {
        self.investments.iter().find(|i| i.id == id)
    }

    pub fn loan(&self, id: &str) -> Option<&LoanSnapshot> {
        self.loans.iter().find(|l| l.id == id)
    }
}

/// Time granularity for viewing a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Every month
    Months,
    /// The opening state and the state after each whole year
    #[default]
    Years,
}

impl GroupBy {
    pub fn includes(&self, month_index: u32) -> bool {
        match self {
            GroupBy::Months => true,
            GroupBy::Years => month_index % 12 == 0,
        }
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "months" | "month" => Ok(GroupBy::Months),
            "years" | "year" => Ok(GroupBy::Years),
            other => Err(format!("unknown grouping: {} (expected months or years)", other)),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Months => write!(f, "months"),
            GroupBy::Years => write!(f, "years"),
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Horizon the projection was run over
    pub horizon_years: u32,

    /// One snapshot per period, period 0 first
    pub snapshots: Vec<PeriodSnapshot>,
}

impl ProjectionResult {
    pub fn new(horizon_years: u32) -> Self {
        Self {
            horizon_years,
            snapshots: Vec::new(),
        }
    }

    /// Add a snapshot
    pub fn add_snapshot(&mut self, snapshot: PeriodSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Snapshots at the requested granularity
    pub fn grouped(&self, group_by: GroupBy) -> impl Iterator<Item = &PeriodSnapshot> {
        self.snapshots
            .iter()
            .filter(move |snapshot| group_by.includes(snapshot.month_index))
    }

    /// Closing snapshot
    pub fn last(&self) -> Option<&PeriodSnapshot> {
        self.snapshots.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let closing = self.last().map(|s| s.aggregates).unwrap_or_default();

        let peak_remaining_debt = self
            .snapshots
            .iter()
            .map(|s| s.aggregates.remaining_debt)
            .fold(0.0, f64::max);

        let debt_free_month = self
            .snapshots
            .iter()
            .find(|s| s.aggregates.remaining_debt <= 0.0)
            .map(|s| s.month_index);

        ProjectionSummary {
            total_months: self.snapshots.len().saturating_sub(1) as u32,
            final_cash_out_value: closing.total_cash_out_value,
            final_remaining_debt: closing.remaining_debt,
            final_cash_available: closing.cash_available,
            final_cash_invested: closing.cash_invested,
            final_cash_profit: closing.cash_profit,
            final_equity: closing.equity,
            final_profit: closing.profit,
            peak_remaining_debt,
            debt_free_month,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub final_cash_out_value: f64,
    pub final_remaining_debt: f64,
    pub final_cash_available: f64,
    pub final_cash_invested: f64,
    pub final_cash_profit: f64,
    pub final_equity: f64,
    pub final_profit: f64,
    pub peak_remaining_debt: f64,
    /// First month index with no outstanding debt
    pub debt_free_month: Option<u32>,
}
