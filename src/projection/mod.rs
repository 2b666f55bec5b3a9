//! Projection engine for monthly portfolio projections

mod investment;
mod loan;
mod snapshot;
mod engine;
pub mod columns;
pub mod export;

pub use investment::InvestmentState;
pub use loan::LoanState;
pub use snapshot::{
    Aggregates, GroupBy, InvestmentSnapshot, LoanSnapshot, PeriodSnapshot, ProjectionResult,
    ProjectionSummary,
};
pub use engine::{run, validate_inputs, ProjectionConfig, ProjectionEngine, DEFAULT_HORIZON_YEARS, MAX_HORIZON_YEARS};
pub use columns::{column_catalog, default_columns, Column, ColumnGroup};
pub use export::{write_csv, write_json, write_labelled_csv, ProjectionReport, ProjectionTable};
