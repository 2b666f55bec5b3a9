//! Running state of a single loan during projection

use crate::portfolio::Loan;
use super::snapshot::LoanSnapshot;

/// State of a loan at the end of a projection month
#[derive(Debug, Clone, PartialEq)]
pub struct LoanState {
    /// Principal borrowed at inception
    pub initial_amount: f64,

    /// Outstanding balance, never negative
    pub debt: f64,

    /// Cumulative repayments
    pub paid: f64,

    /// Cumulative interest charged
    pub interest_accrued: f64,
}

impl LoanState {
    /// Initialize state from a loan at projection start
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            initial_amount: loan.amount,
            debt: loan.amount,
            paid: 0.0,
            interest_accrued: 0.0,
        }
    }

    /// Advance one month: charge interest, then pay down
    ///
    /// The payment is capped at the outstanding debt. Any excess of
    /// `monthly_payment` over what is owed is not paid and not carried forward.
    pub fn advance_month(&mut self, monthly_interest_pct: f64, monthly_payment: f64) {
        let interest = self.debt * monthly_interest_pct / 100.0;
        self.debt += interest;
        self.interest_accrued += interest;

        let payment = self.debt.min(monthly_payment);
        self.debt -= payment;
        self.paid += payment;
    }

    /// Whether the loan has been repaid in full
    pub fn is_cleared(&self) -> bool {
        self.debt <= 0.0
    }

    /// Total cost of the loan so far: repayments plus interest charged
    pub fn cost(&self) -> f64 {
        self.interest_accrued + self.paid
    }

    pub fn snapshot(&self, loan: &Loan) -> LoanSnapshot {
        LoanSnapshot {
            id: loan.id.clone(),
            name: loan.name.clone(),
            amount: self.initial_amount,
            debt: self.debt,
            paid: self.paid,
            interest_accrued: self.interest_accrued,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::InterestRate;
    use approx::assert_relative_eq;

    fn loan(amount: f64, payment: f64) -> Loan {
        Loan::new("car", "Car loan", amount, InterestRate::nominal(12.0), 1, payment)
    }

    #[test]
    fn test_initial_state() {
        let state = LoanState::from_loan(&loan(1200.0, 200.0));
        assert_relative_eq!(state.debt, 1200.0);
        assert_relative_eq!(state.paid, 0.0);
        assert_relative_eq!(state.interest_accrued, 0.0);
        assert!(!state.is_cleared());
    }

    #[test]
    fn test_interest_charged_before_payment() {
        let mut state = LoanState::from_loan(&loan(1200.0, 200.0));
        state.advance_month(1.0, 200.0);

        assert_relative_eq!(state.interest_accrued, 12.0, epsilon = 1e-12);
        assert_relative_eq!(state.paid, 200.0);
        assert_relative_eq!(state.debt, 1012.0, epsilon = 1e-9);
    }

    #[test]
    fn test_final_payment_capped_at_debt() {
        let mut state = LoanState::from_loan(&loan(100.0, 200.0));
        state.advance_month(1.0, 200.0);

        assert_relative_eq!(state.debt, 0.0);
        assert_relative_eq!(state.paid, 101.0, epsilon = 1e-12);
        assert!(state.is_cleared());

        // A cleared loan accrues nothing further
        state.advance_month(1.0, 200.0);
        assert_relative_eq!(state.debt, 0.0);
        assert_relative_eq!(state.paid, 101.0, epsilon = 1e-12);
        assert_relative_eq!(state.interest_accrued, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cost_includes_interest_and_repayments() {
        let mut state = LoanState::from_loan(&loan(1000.0, 100.0));
        state.advance_month(1.0, 100.0);
        assert_relative_eq!(state.cost(), 110.0, epsilon = 1e-9);
    }
}
