//! Dotted-path addressing of projected fields
//!
//! Every figure in a [`PeriodSnapshot`] has a stable name such as
//! `investment.<id>.value`, `loan.<id>.debt` or `summary.cash_profit`, so a
//! presentation layer can select any subset of columns without knowing the
//! snapshot layout. Entity ids may themselves contain dots: the field is
//! always the segment after the last dot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColumnError;
use crate::portfolio::{Investment, Loan};
use super::snapshot::{InvestmentSnapshot, LoanSnapshot, PeriodSnapshot};

/// Defines a field enum with its path segment and display label
macro_rules! field_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Path segment naming this field
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            /// Human readable column label
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

field_enum!(
    /// Period counters
    TimeField {
        Months => ("months", "Months"),
        Years => ("years", "Years"),
        Month => ("month", "Month"),
        Year => ("year", "Year"),
    }
);

field_enum!(
    /// Per-investment figures
    InvestmentField {
        Value => ("value", "Value"),
        InitialPurchaseFee => ("initial_purchase_fee", "Initial Purchase Fee"),
        InitialPurchasePrice => ("initial_purchase_price", "Initial Purchase Price"),
        TotalContributions => ("total_contributions", "Total Contributions"),
        InterestAccrued => ("interest_accrued", "Interest Accrued"),
        MaintenanceCost => ("maintenance_cost", "Maintenance Cost"),
        MaintenanceCashSpent => ("maintenance_cash_spent", "Maintenance Cash Spent"),
        CashOutFee => ("cash_out_fee", "Cash Out Fee"),
        CashOutValue => ("cash_out_value", "Cash Out Value"),
    }
);

field_enum!(
    /// Per-loan figures
    LoanField {
        Amount => ("amount", "Amount"),
        Debt => ("debt", "Debt"),
        Paid => ("paid", "Paid"),
        InterestAccrued => ("interest_accrued", "Interest Accrued"),
    }
);

field_enum!(
    /// Portfolio-wide figures
    SummaryField {
        CashOutValue => ("cash_out_value", "Cash Out Value"),
        RemainingDebt => ("remaining_debt", "Remaining Debt"),
        CashAvailable => ("cash_available", "Cash Available"),
        CashInvested => ("cash_invested", "Cash Invested"),
        CashProfit => ("cash_profit", "Cash Profit"),
        Equity => ("equity", "Equity"),
        Profit => ("profit", "Profit"),
        CashSpent => ("cash_spent", "Cash Spent"),
    }
);

impl InvestmentField {
    pub fn read(&self, snapshot: &InvestmentSnapshot) -> f64 {
        match self {
            InvestmentField::Value => snapshot.value,
            InvestmentField::InitialPurchaseFee => snapshot.initial_purchase_fee,
            InvestmentField::InitialPurchasePrice => snapshot.initial_purchase_price,
            InvestmentField::TotalContributions => snapshot.total_contributed,
            InvestmentField::InterestAccrued => snapshot.interest_accrued,
            InvestmentField::MaintenanceCost => snapshot.monthly_maintenance_cost,
            InvestmentField::MaintenanceCashSpent => snapshot.maintenance_cash_spent,
            InvestmentField::CashOutFee => snapshot.cash_out_fee_amount,
            InvestmentField::CashOutValue => snapshot.cash_out_value,
        }
    }
}

impl LoanField {
    pub fn read(&self, snapshot: &LoanSnapshot) -> f64 {
        match self {
            LoanField::Amount => snapshot.amount,
            LoanField::Debt => snapshot.debt,
            LoanField::Paid => snapshot.paid,
            LoanField::InterestAccrued => snapshot.interest_accrued,
        }
    }
}

/// A single addressable column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Time(TimeField),
    Investment { id: String, field: InvestmentField },
    Loan { id: String, field: LoanField },
    Summary(SummaryField),
}

impl Column {
    pub fn investment(id: impl Into<String>, field: InvestmentField) -> Self {
        Column::Investment { id: id.into(), field }
    }

    pub fn loan(id: impl Into<String>, field: LoanField) -> Self {
        Column::Loan { id: id.into(), field }
    }

    /// Parse a dotted path such as `loan.mortgage.debt`
    pub fn parse(path: &str) -> Result<Self, ColumnError> {
        let unknown = || ColumnError::Unknown(path.to_string());
        let (group, rest) = path.split_once('.').ok_or_else(unknown)?;

        match group {
            "time" => TimeField::from_key(rest).map(Column::Time).ok_or_else(unknown),
            "summary" => SummaryField::from_key(rest).map(Column::Summary).ok_or_else(unknown),
            "investment" => {
                let (id, key) = split_entity(rest).ok_or_else(unknown)?;
                let field = InvestmentField::from_key(key).ok_or_else(unknown)?;
                Ok(Column::investment(id, field))
            }
            "loan" => {
                let (id, key) = split_entity(rest).ok_or_else(unknown)?;
                let field = LoanField::from_key(key).ok_or_else(unknown)?;
                Ok(Column::loan(id, field))
            }
            _ => Err(unknown()),
        }
    }

    /// Parse a comma separated list of paths, ignoring blanks
    pub fn parse_list(paths: &str) -> Result<Vec<Self>, ColumnError> {
        paths
            .split(',')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(Column::parse)
            .collect()
    }

    /// Dotted path naming this column
    pub fn path(&self) -> String {
        self.to_string()
    }

    /// Group path (everything before the field), e.g. `investment.house`
    pub fn group(&self) -> String {
        match self {
            Column::Time(_) => "time".to_string(),
            Column::Investment { id, .. } => format!("investment.{}", id),
            Column::Loan { id, .. } => format!("loan.{}", id),
            Column::Summary(_) => "summary".to_string(),
        }
    }

    /// Display label, e.g. `Cash Out Value`
    pub fn label(&self) -> &'static str {
        match self {
            Column::Time(field) => field.label(),
            Column::Investment { field, .. } => field.label(),
            Column::Loan { field, .. } => field.label(),
            Column::Summary(field) => field.label(),
        }
    }
}

fn split_entity(rest: &str) -> Option<(&str, &str)> {
    rest.rsplit_once('.').filter(|(id, _)| !id.is_empty())
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Time(field) => write!(f, "time.{}", field.key()),
            Column::Investment { id, field } => write!(f, "investment.{}.{}", id, field.key()),
            Column::Loan { id, field } => write!(f, "loan.{}.{}", id, field.key()),
            Column::Summary(field) => write!(f, "summary.{}", field.key()),
        }
    }
}

impl FromStr for Column {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::parse(s)
    }
}

impl PeriodSnapshot {
    /// Read a column's value; `None` if the column names an entity not in this snapshot
    pub fn value(&self, column: &Column) -> Option<f64> {
        match column {
            Column::Time(field) => {
                let counter = match field {
                    TimeField::Months => self.month_index,
                    TimeField::Years => self.year_index,
                    TimeField::Month => self.month_ordinal,
                    TimeField::Year => self.year_ordinal,
                };
                Some(f64::from(counter))
            }
            Column::Investment { id, field } => self.investment(id).map(|i| field.read(i)),
            Column::Loan { id, field } => self.loan(id).map(|l| field.read(l)),
            Column::Summary(field) => {
                let a = &self.aggregates;
                Some(match field {
                    SummaryField::CashOutValue => a.total_cash_out_value,
                    SummaryField::RemainingDebt => a.remaining_debt,
                    SummaryField::CashAvailable => a.cash_available,
                    SummaryField::CashInvested => a.cash_invested,
                    SummaryField::CashProfit => a.cash_profit,
                    SummaryField::Equity => a.equity,
                    SummaryField::Profit => a.profit,
                    SummaryField::CashSpent => a.cash_spent,
                })
            }
        }
    }
}

/// A labelled group of selectable columns
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub label: String,
    pub columns: Vec<Column>,
}

/// Every addressable column, grouped by time, entity and summary
pub fn column_catalog(investments: &[Investment], loans: &[Loan]) -> Vec<ColumnGroup> {
    let mut groups = Vec::with_capacity(investments.len() + loans.len() + 2);

    groups.push(ColumnGroup {
        label: "Time".to_string(),
        columns: TimeField::ALL.iter().copied().map(Column::Time).collect(),
    });

    for investment in investments {
        groups.push(ColumnGroup {
            label: investment.name.clone(),
            columns: InvestmentField::ALL
                .iter()
                .map(|&field| Column::investment(investment.id.as_str(), field))
                .collect(),
        });
    }

    for loan in loans {
        groups.push(ColumnGroup {
            label: loan.name.clone(),
            columns: LoanField::ALL
                .iter()
                .map(|&field| Column::loan(loan.id.as_str(), field))
                .collect(),
        });
    }

    groups.push(ColumnGroup {
        label: "Summary".to_string(),
        columns: SummaryField::ALL.iter().copied().map(Column::Summary).collect(),
    });

    groups
}

const DEFAULT_INVESTMENT_FIELDS: &[InvestmentField] = &[
    InvestmentField::Value,
    InvestmentField::TotalContributions,
    InvestmentField::MaintenanceCashSpent,
    InvestmentField::CashOutValue,
];

const DEFAULT_LOAN_FIELDS: &[LoanField] = &[LoanField::Debt, LoanField::Paid];

const DEFAULT_SUMMARY_FIELDS: &[SummaryField] = &[
    SummaryField::CashOutValue,
    SummaryField::RemainingDebt,
    SummaryField::CashAvailable,
    SummaryField::CashInvested,
    SummaryField::CashProfit,
];

/// Columns shown when the caller has not chosen any
pub fn default_columns(investments: &[Investment], loans: &[Loan]) -> Vec<Column> {
    let mut columns = vec![Column::Time(TimeField::Years)];

    for investment in investments {
        columns.extend(
            DEFAULT_INVESTMENT_FIELDS
                .iter()
                .map(|&field| Column::investment(investment.id.as_str(), field)),
        );
    }

    for loan in loans {
        columns.extend(
            DEFAULT_LOAN_FIELDS
                .iter()
                .map(|&field| Column::loan(loan.id.as_str(), field)),
        );
    }

    columns.extend(DEFAULT_SUMMARY_FIELDS.iter().copied().map(Column::Summary));
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{Fee, InterestRate};
    use crate::projection::run;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_round_trips_paths() {
        for path in [
            "time.years",
            "investment.house.cash_out_value",
            "loan.mortgage.debt",
            "loan.mortgage.amount",
            "summary.cash_profit",
            "summary.equity",
        ] {
            assert_eq!(Column::parse(path).unwrap().path(), path);
        }
    }

    #[test]
    fn test_parse_dotted_entity_id() {
        let column = Column::parse("investment.uk.house.value").unwrap();
        assert_eq!(column, Column::investment("uk.house", InvestmentField::Value));
        assert_eq!(column.group(), "investment.uk.house");
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        for path in ["", "time", "time.weeks", "investment.value", "loan.car.value", "other.x"] {
            assert_eq!(
                Column::parse(path),
                Err(ColumnError::Unknown(path.to_string())),
                "{} should not parse",
                path
            );
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Column::parse("time.years").unwrap().label(), "Years");
        assert_eq!(Column::parse("loan.car.amount").unwrap().label(), "Amount");
        assert_eq!(
            Column::investment("house", InvestmentField::CashOutValue).label(),
            "Cash Out Value"
        );
        assert_eq!(Column::Summary(SummaryField::CashSpent).label(), "Cash Spent");
    }

    #[test]
    fn test_parse_list() {
        let columns = Column::parse_list("time.month, summary.profit,,").unwrap();
        assert_eq!(
            columns,
            vec![Column::Time(TimeField::Month), Column::Summary(SummaryField::Profit)]
        );
    }

    #[test]
    fn test_value_lookup() {
        let house = Investment::new("house", "House", 1000.0).with_cash_out_fee(Fee::percentage(5.0));
        let loan = Loan::new("mortgage", "Mortgage", 800.0, InterestRate::zero(), 1, 100.0);
        let snapshots = run(1, &[house], &[loan]).unwrap();
        let s = &snapshots[12];

        assert_eq!(s.value(&Column::Time(TimeField::Months)), Some(12.0));
        assert_eq!(s.value(&Column::Time(TimeField::Year)), Some(2.0));
        assert_eq!(
            s.value(&Column::investment("house", InvestmentField::CashOutValue)),
            Some(950.0)
        );
        assert_eq!(s.value(&Column::loan("mortgage", LoanField::Debt)), Some(0.0));
        assert_eq!(s.value(&Column::loan("mortgage", LoanField::Paid)), Some(800.0));
        assert_eq!(s.value(&Column::loan("mortgage", LoanField::Amount)), Some(800.0));
        assert_eq!(s.value(&Column::loan("car", LoanField::Paid)), None);
        assert_relative_eq!(
            s.value(&Column::Summary(SummaryField::CashAvailable)).unwrap(),
            950.0
        );
    }

    #[test]
    fn test_catalog_and_defaults() {
        let investments = vec![Investment::new("house", "House", 1.0)];
        let loans = vec![Loan::new("mortgage", "Mortgage", 1.0, InterestRate::zero(), 1, 1.0)];

        let catalog = column_catalog(&investments, &loans);
        let labels: Vec<&str> = catalog.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Time", "House", "Mortgage", "Summary"]);
        assert_eq!(catalog[1].columns.len(), InvestmentField::ALL.len());
        assert!(catalog[2]
            .columns
            .contains(&Column::loan("mortgage", LoanField::Amount)));

        let defaults: Vec<String> = default_columns(&investments, &loans)
            .iter()
            .map(Column::path)
            .collect();
        assert_eq!(
            defaults,
            vec![
                "time.years",
                "investment.house.value",
                "investment.house.total_contributions",
                "investment.house.maintenance_cash_spent",
                "investment.house.cash_out_value",
                "loan.mortgage.debt",
                "loan.mortgage.paid",
                "summary.cash_out_value",
                "summary.remaining_debt",
                "summary.cash_available",
                "summary.cash_invested",
                "summary.cash_profit",
            ]
        );
    }
}
