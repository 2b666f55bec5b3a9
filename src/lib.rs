//! Portfolio Projection - month-by-month projection of investments and loans
//!
//! This library provides:
//! - Investment and loan definitions with fees and interest rates
//! - Monthly simulation of each entity over a fixed horizon
//! - Portfolio-wide cash and accrual metrics for every period
//! - Dotted-path column addressing and CSV/JSON export
//! - Parallel batch runs over independent scenarios

pub mod error;
pub mod maths;
pub mod portfolio;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ColumnError, PortfolioError, ProjectionError};
pub use portfolio::{Fee, FeeType, InterestRate, InterestRateType, Investment, Loan, Portfolio};
pub use projection::{
    run, Column, GroupBy, PeriodSnapshot, ProjectionConfig, ProjectionEngine, ProjectionResult,
};
pub use scenario::ScenarioRunner;
