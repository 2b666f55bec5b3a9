//! Running state of a single investment during projection

use crate::maths::{add_percentage, percentage_of};
use crate::portfolio::{FeeType, Investment};
use super::snapshot::InvestmentSnapshot;

/// State of an investment at the end of a projection month
///
/// Maintenance and cash-out charges are billed in arrears: the amounts held here
/// were priced against the previous month's closing value and are charged on the
/// next advance before being repriced.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentState {
    /// Purchase fee paid at inception
    pub initial_purchase_fee: f64,

    /// Initial value plus purchase fee
    pub initial_purchase_price: f64,

    /// Current market value of the position
    pub value: f64,

    /// Cumulative monthly contributions
    pub total_contributed: f64,

    /// Cumulative growth credited to the position
    pub interest_accrued: f64,

    /// Cumulative maintenance charges paid
    pub maintenance_cash_spent: f64,

    /// Maintenance charge due on the next advance
    pub current_monthly_maintenance_cost: f64,

    /// Fee payable if the position were sold now
    pub current_cash_out_fee_amount: f64,

    /// Value net of the cash-out fee
    pub current_cash_out_value: f64,
}

impl InvestmentState {
    /// Initialize state from an investment at projection start
    pub fn from_investment(investment: &Investment) -> Self {
        let value = investment.initial_value;
        let initial_purchase_fee = investment.initial_purchase_fee();
        let current_cash_out_fee_amount = investment.cash_out_fee.amount_for(value);

        Self {
            initial_purchase_fee,
            initial_purchase_price: value + initial_purchase_fee,
            value,
            total_contributed: 0.0,
            interest_accrued: 0.0,
            maintenance_cash_spent: 0.0,
            current_monthly_maintenance_cost: percentage_of(
                value,
                investment.maintenance_cost.monthly_percentage,
            ),
            current_cash_out_fee_amount,
            current_cash_out_value: value - current_cash_out_fee_amount,
        }
    }

    /// Advance one month
    pub fn advance_month(&mut self, investment: &Investment) {
        // Contribution lands before growth so it compounds this month
        self.total_contributed += investment.monthly_contribution;
        self.value += investment.monthly_contribution;

        self.maintenance_cash_spent += self.current_monthly_maintenance_cost;

        let interest = percentage_of(self.value, investment.growth_rate.monthly_percentage);
        self.value += interest;
        self.interest_accrued += interest;

        self.current_monthly_maintenance_cost =
            percentage_of(self.value, investment.maintenance_cost.monthly_percentage);

        self.current_cash_out_fee_amount = match investment.cash_out_fee.fee_type {
            FeeType::Percentage => percentage_of(self.value, investment.cash_out_fee.value),
            FeeType::Flat => add_percentage(
                self.current_cash_out_fee_amount,
                investment.cash_out_fee.monthly_growth_percentage(),
            ),
        };

        self.current_cash_out_value = self.value - self.current_cash_out_fee_amount;
    }

    /// Copy the current figures into an output row
    pub fn snapshot(&self, investment: &Investment) -> InvestmentSnapshot {
        InvestmentSnapshot {
            id: investment.id.clone(),
            name: investment.name.clone(),
            value: self.value,
            initial_purchase_fee: self.initial_purchase_fee,
            initial_purchase_price: self.initial_purchase_price,
            total_contributed: self.total_contributed,
            interest_accrued: self.interest_accrued,
            monthly_maintenance_cost: self.current_monthly_maintenance_cost,
            maintenance_cash_spent: self.maintenance_cash_spent,
            cash_out_fee_amount: self.current_cash_out_fee_amount,
            cash_out_value: self.current_cash_out_value,
        }
    }

    /// Growth net of every fee and running cost charged so far
    pub fn net_return(&self) -> f64 {
        self.interest_accrued
            - self.initial_purchase_fee
            - self.current_cash_out_fee_amount
            - self.maintenance_cash_spent
    }
}
