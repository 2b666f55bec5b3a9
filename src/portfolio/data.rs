//! Investment and loan definitions making up a portfolio

use serde::{Deserialize, Serialize};

use crate::maths::{annual_to_monthly_effective, annual_to_monthly_nominal, percentage_of};

/// How a yearly rate maps onto the monthly rate used in simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestRateType {
    /// Yearly rate divided evenly by 12
    Nominal,
    /// Yearly rate whose monthly equivalent compounds to it exactly (AER)
    Effective,
}

/// An interest (or growth, or cost) rate in percent
///
/// `monthly_percentage` is the value the simulators consume. It is resolved
/// once, when the rate is built, and never re-derived during a projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    #[serde(rename = "type")]
    pub rate_type: InterestRateType,
    pub yearly_percentage: f64,
    pub monthly_percentage: f64,
}

impl InterestRate {
    /// Build a rate from its yearly percentage, deriving the monthly value from `rate_type`
    pub fn from_yearly(rate_type: InterestRateType, yearly_percentage: f64) -> Self {
        let monthly_percentage = match rate_type {
            InterestRateType::Nominal => annual_to_monthly_nominal(yearly_percentage),
            InterestRateType::Effective => annual_to_monthly_effective(yearly_percentage),
        };

        Self {
            rate_type,
            yearly_percentage,
            monthly_percentage,
        }
    }

    pub fn nominal(yearly_percentage: f64) -> Self {
        Self::from_yearly(InterestRateType::Nominal, yearly_percentage)
    }

    pub fn effective(yearly_percentage: f64) -> Self {
        Self::from_yearly(InterestRateType::Effective, yearly_percentage)
    }

    /// A rate of zero
    pub fn zero() -> Self {
        Self::nominal(0.0)
    }

    /// Build a rate from an already-resolved monthly percentage
    pub fn monthly(rate_type: InterestRateType, monthly_percentage: f64) -> Self {
        let yearly_percentage = match rate_type {
            InterestRateType::Nominal => monthly_percentage * 12.0,
            InterestRateType::Effective => ((1.0 + monthly_percentage / 100.0).powi(12) - 1.0) * 100.0,
        };

        Self {
            rate_type,
            yearly_percentage,
            monthly_percentage,
        }
    }
}

impl Default for InterestRate {
    fn default() -> Self {
        Self::zero()
    }
}

/// Whether a fee is charged as a share of a base amount or as a fixed sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Percentage,
    Flat,
}

/// A one-off charge such as a purchase or cash-out fee
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    #[serde(rename = "type")]
    pub fee_type: FeeType,

    /// Percent for percentage fees, currency amount for flat fees
    pub value: f64,

    /// Monthly growth of a flat fee; ignored for percentage fees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<InterestRate>,
}

impl Fee {
    pub fn percentage(value: f64) -> Self {
        Self {
            fee_type: FeeType::Percentage,
            value,
            growth_rate: None,
        }
    }

    pub fn flat(value: f64) -> Self {
        Self {
            fee_type: FeeType::Flat,
            value,
            growth_rate: None,
        }
    }

    /// A flat fee that compounds monthly at `growth_rate`
    pub fn flat_growing(value: f64, growth_rate: InterestRate) -> Self {
        Self {
            fee_type: FeeType::Flat,
            value,
            growth_rate: Some(growth_rate),
        }
    }

    /// No fee at all
    pub fn none() -> Self {
        Self::flat(0.0)
    }

    /// Fee amount when charged against `base`
    ///
    /// Flat fees ignore the base and return their nominal value.
    pub fn amount_for(&self, base: f64) -> f64 {
        match self.fee_type {
            FeeType::Percentage => percentage_of(base, self.value),
            FeeType::Flat => self.value,
        }
    }

    /// Monthly percentage a flat fee grows by (0 when it does not grow)
    pub fn monthly_growth_percentage(&self) -> f64 {
        self.growth_rate.map_or(0.0, |rate| rate.monthly_percentage)
    }
}

impl Default for Fee {
    fn default() -> Self {
        Self::none()
    }
}

/// An asset held for the length of the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Identifier, unique among the investments of one run
    pub id: String,

    pub name: String,

    /// Value at purchase, before the purchase fee
    pub initial_value: f64,

    pub purchase_fee: Fee,

    /// Cash added to the position at the start of every month
    pub monthly_contribution: f64,

    pub growth_rate: InterestRate,

    /// Running cost charged as a percentage of the position's value
    pub maintenance_cost: InterestRate,

    /// Charge applied if the position were sold
    pub cash_out_fee: Fee,
}

impl Investment {
    /// Investment with no fees, contributions, growth or running costs
    pub fn new(id: impl Into<String>, name: impl Into<String>, initial_value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            initial_value,
            purchase_fee: Fee::none(),
            monthly_contribution: 0.0,
            growth_rate: InterestRate::zero(),
            maintenance_cost: InterestRate::zero(),
            cash_out_fee: Fee::none(),
        }
    }

    pub fn with_purchase_fee(mut self, fee: Fee) -> Self {
        self.purchase_fee = fee;
        self
    }

    pub fn with_monthly_contribution(mut self, amount: f64) -> Self {
        self.monthly_contribution = amount;
        self
    }

    pub fn with_growth_rate(mut self, rate: InterestRate) -> Self {
        self.growth_rate = rate;
        self
    }

    pub fn with_maintenance_cost(mut self, rate: InterestRate) -> Self {
        self.maintenance_cost = rate;
        self
    }

    pub fn with_cash_out_fee(mut self, fee: Fee) -> Self {
        self.cash_out_fee = fee;
        self
    }

    /// Purchase fee charged on the initial value
    pub fn initial_purchase_fee(&self) -> f64 {
        self.purchase_fee.amount_for(self.initial_value)
    }

    /// Cash needed to open the position
    pub fn initial_purchase_price(&self) -> f64 {
        self.initial_value + self.initial_purchase_fee()
    }
}

/// A borrowing repaid in fixed monthly instalments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Identifier, unique among the loans of one run
    pub id: String,

    pub name: String,

    /// Principal borrowed
    pub amount: f64,

    pub interest_rate: InterestRate,

    /// Repayment horizon in whole years
    pub term: u32,

    pub monthly_payment: f64,
}

impl Loan {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        interest_rate: InterestRate,
        term: u32,
        monthly_payment: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            interest_rate,
            term,
            monthly_payment,
        }
    }

    /// Whether the loan is still accruing and paying in the given year of the projection
    pub fn is_active(&self, year_index: u32) -> bool {
        year_index <= self.term
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interest_rate_derivation() {
        let nominal = InterestRate::nominal(12.0);
        assert_relative_eq!(nominal.monthly_percentage, 1.0);

        let effective = InterestRate::effective(12.0);
        assert!(effective.monthly_percentage < 1.0);
        assert_relative_eq!(
            (1.0 + effective.monthly_percentage / 100.0).powi(12),
            1.12,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_monthly_constructor_keeps_monthly_value() {
        let rate = InterestRate::monthly(InterestRateType::Effective, 1.0);
        assert_relative_eq!(rate.monthly_percentage, 1.0);
        assert_relative_eq!(rate.yearly_percentage, 12.682503013196977, epsilon = 1e-9);
    }

    #[test]
    fn test_fee_amounts() {
        assert_relative_eq!(Fee::percentage(5.0).amount_for(1000.0), 50.0);
        assert_relative_eq!(Fee::flat(50.0).amount_for(1000.0), 50.0);
        assert_relative_eq!(Fee::flat(50.0).monthly_growth_percentage(), 0.0);
        assert_relative_eq!(
            Fee::flat_growing(50.0, InterestRate::nominal(12.0)).monthly_growth_percentage(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_initial_purchase_price() {
        let investment = Investment::new("house", "House", 1000.0).with_purchase_fee(Fee::flat(50.0));
        assert_relative_eq!(investment.initial_purchase_price(), 1050.0);

        let investment = Investment::new("fund", "Fund", 1000.0).with_purchase_fee(Fee::percentage(2.0));
        assert_relative_eq!(investment.initial_purchase_fee(), 20.0);
    }

    #[test]
    fn test_loan_active_through_term_year() {
        let loan = Loan::new("mortgage", "Mortgage", 1200.0, InterestRate::zero(), 1, 100.0);
        assert!(loan.is_active(0));
        assert!(loan.is_active(1));
        assert!(!loan.is_active(2));
    }

    #[test]
    fn test_fee_json_shape() {
        let fee: Fee = serde_json::from_str(r#"{"type": "percentage", "value": 5}"#).unwrap();
        assert_eq!(fee.fee_type, FeeType::Percentage);
        assert!(fee.growth_rate.is_none());
    }
}
