//! Error types for projections, portfolio loading and column addressing

use thiserror::Error;

/// Reasons a projection run is rejected before it starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("invalid horizon: {years} years (expected 1 to 1000 years)")]
    InvalidHorizon { years: u32 },

    #[error("duplicate investment id: {0}")]
    DuplicateInvestmentId(String),

    #[error("duplicate loan id: {0}")]
    DuplicateLoanId(String),
}

/// Failures reading a portfolio definition
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid portfolio file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// A dotted column path that does not name any projected field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("unknown column: {0}")]
    Unknown(String),
}
