//! Portfolio definitions and file loading

mod data;
pub mod loader;

pub use data::{Fee, FeeType, InterestRate, InterestRateType, Investment, Loan};
pub use loader::{load_portfolio, load_portfolio_from_reader, load_portfolio_from_str, Portfolio};
