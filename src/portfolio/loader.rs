//! Load portfolios from JSON files
//!
//! Rates in a file may omit `monthly_percentage`; it is then derived from
//! `yearly_percentage` according to the rate's `type`. A file that supplies
//! both keeps the monthly value as given.

use super::{Fee, FeeType, InterestRate, InterestRateType, Investment, Loan};
use crate::error::PortfolioError;
use crate::projection::{validate_inputs, GroupBy, ProjectionConfig, DEFAULT_HORIZON_YEARS};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}

/// A complete, validated set of projection inputs
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub horizon_years: u32,
    /// Preferred presentation granularity
    pub group_by: GroupBy,
    pub investments: Vec<Investment>,
    pub loans: Vec<Loan>,
}

impl Portfolio {
    /// Projection settings carried by the portfolio
    pub fn config(&self) -> ProjectionConfig {
        ProjectionConfig::with_horizon(self.horizon_years).with_group_by(self.group_by)
    }
}

/// Raw file layout
#[derive(Debug, Deserialize)]
struct PortfolioFile {
    #[serde(default = "default_horizon_years")]
    horizon_years: u32,
    #[serde(default)]
    group_by: GroupBy,
    #[serde(default)]
    investments: Vec<InvestmentRow>,
    #[serde(default)]
    loans: Vec<LoanRow>,
}

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "type", default = "default_rate_type")]
    rate_type: InterestRateType,
    #[serde(default)]
    yearly_percentage: f64,
    #[serde(default)]
    monthly_percentage: Option<f64>,
}

fn default_rate_type() -> InterestRateType {
    InterestRateType::Effective
}

impl RateRow {
    fn to_rate(&self) -> InterestRate {
        match self.monthly_percentage {
            Some(monthly_percentage) => InterestRate {
                rate_type: self.rate_type,
                yearly_percentage: self.yearly_percentage,
                monthly_percentage,
            },
            None => InterestRate::from_yearly(self.rate_type, self.yearly_percentage),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeeRow {
    #[serde(rename = "type")]
    fee_type: FeeType,
    #[serde(default)]
    value: f64,
    #[serde(default)]
    growth_rate: Option<RateRow>,
}

impl FeeRow {
    fn to_fee(&self) -> Fee {
        Fee {
            fee_type: self.fee_type,
            value: self.value,
            growth_rate: self.growth_rate.as_ref().map(RateRow::to_rate),
        }
    }
}

fn to_fee_or_none(row: Option<&FeeRow>) -> Fee {
    row.map_or_else(Fee::none, FeeRow::to_fee)
}

fn to_rate_or_zero(row: Option<&RateRow>) -> InterestRate {
    row.map_or_else(InterestRate::zero, RateRow::to_rate)
}

#[derive(Debug, Deserialize)]
struct InvestmentRow {
    id: String,
    #[serde(default)]
    name: Option<String>,
    initial_value: f64,
    #[serde(default)]
    purchase_fee: Option<FeeRow>,
    #[serde(default)]
    monthly_contribution: f64,
    #[serde(default)]
    growth_rate: Option<RateRow>,
    #[serde(default)]
    maintenance_cost: Option<RateRow>,
    #[serde(default)]
    cash_out_fee: Option<FeeRow>,
}

impl InvestmentRow {
    fn to_investment(self) -> Investment {
        Investment {
            name: self.name.clone().unwrap_or_else(|| self.id.clone()),
            initial_value: self.initial_value,
            purchase_fee: to_fee_or_none(self.purchase_fee.as_ref()),
            monthly_contribution: self.monthly_contribution,
            growth_rate: to_rate_or_zero(self.growth_rate.as_ref()),
            maintenance_cost: to_rate_or_zero(self.maintenance_cost.as_ref()),
            cash_out_fee: to_fee_or_none(self.cash_out_fee.as_ref()),
            id: self.id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoanRow {
    id: String,
    #[serde(default)]
    name: Option<String>,
    amount: f64,
    #[serde(default)]
    interest_rate: Option<RateRow>,
    term: u32,
    monthly_payment: f64,
}

impl LoanRow {
    fn to_loan(self) -> Loan {
        Loan {
            name: self.name.clone().unwrap_or_else(|| self.id.clone()),
            amount: self.amount,
            interest_rate: to_rate_or_zero(self.interest_rate.as_ref()),
            term: self.term,
            monthly_payment: self.monthly_payment,
            id: self.id,
        }
    }
}

impl PortfolioFile {
    fn to_portfolio(self) -> Result<Portfolio, PortfolioError> {
        let portfolio = Portfolio {
            horizon_years: self.horizon_years,
            group_by: self.group_by,
            investments: self.investments.into_iter().map(InvestmentRow::to_investment).collect(),
            loans: self.loans.into_iter().map(LoanRow::to_loan).collect(),
        };

        validate_inputs(portfolio.horizon_years, &portfolio.investments, &portfolio.loans)?;

        log::debug!(
            "Loaded portfolio: {} investments, {} loans, {} years",
            portfolio.investments.len(),
            portfolio.loans.len(),
            portfolio.horizon_years
        );

        Ok(portfolio)
    }
}

/// Load a portfolio from a JSON file
pub fn load_portfolio<P: AsRef<Path>>(path: P) -> Result<Portfolio, PortfolioError> {
    let file = File::open(path)?;
    load_portfolio_from_reader(BufReader::new(file))
}

/// Load a portfolio from any reader (e.g. string buffer, stdin)
pub fn load_portfolio_from_reader<R: std::io::Read>(reader: R) -> Result<Portfolio, PortfolioError> {
    let file: PortfolioFile = serde_json::from_reader(reader)?;
    file.to_portfolio()
}

/// Load a portfolio from a JSON string
pub fn load_portfolio_from_str(json: &str) -> Result<Portfolio, PortfolioError> {
    let file: PortfolioFile = serde_json::from_str(json)?;
    file.to_portfolio()
}
