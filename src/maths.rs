//! Percentage helpers for converting annual rates and applying percentages
//!
//! All rates are expressed in percent (e.g. `5.0` for 5%), matching how users
//! enter them. None of these functions trap degenerate input: a rate of -100%
//! or below yields NaN/Infinity, which then propagates through a projection.

/// Convert an annual effective rate (AER) to its compounding monthly equivalent
pub fn annual_to_monthly_effective(annual_pct: f64) -> f64 {
    annual_to_sub_annual_effective(annual_pct, 12.0)
}

/// Convert an annual effective rate to its compounding quarterly equivalent
pub fn annual_to_quarterly_effective(annual_pct: f64) -> f64 {
    annual_to_sub_annual_effective(annual_pct, 4.0)
}

/// Convert an annual effective rate to a daily rate on a 360-day year
pub fn annual_to_daily_effective(annual_pct: f64) -> f64 {
    annual_to_sub_annual_effective(annual_pct, 360.0)
}

/// Convert a nominal annual rate to a monthly rate by simple division
pub fn annual_to_monthly_nominal(annual_pct: f64) -> f64 {
    annual_pct / 12.0
}

/// `pct` percent of `base`
pub fn percentage_of(base: f64, pct: f64) -> f64 {
    base * pct / 100.0
}

/// `base` grown by `pct` percent
pub fn add_percentage(base: f64, pct: f64) -> f64 {
    base * (1.0 + pct / 100.0)
}

fn annual_to_sub_annual_effective(annual_pct: f64, periods: f64) -> f64 {
    ((1.0 + annual_pct / 100.0).powf(1.0 / periods) - 1.0) * 100.0
}
