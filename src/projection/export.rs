//! Tabular export of projection results

use serde::Serialize;
use std::io::Write;

use super::columns::Column;
use super::snapshot::{GroupBy, PeriodSnapshot, ProjectionResult, ProjectionSummary};

/// Selected columns for the snapshots at one granularity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionTable {
    pub columns: Vec<String>,
    pub labels: Vec<String>,
    /// One row per snapshot; `None` where a column names an unknown entity
    pub rows: Vec<Vec<Option<f64>>>,
}

impl ProjectionTable {
    pub fn build(result: &ProjectionResult, columns: &[Column], group_by: GroupBy) -> Self {
        Self {
            columns: columns.iter().map(Column::path).collect(),
            labels: columns.iter().map(|c| c.label().to_string()).collect(),
            rows: result
                .grouped(group_by)
                .map(|snapshot| columns.iter().map(|c| snapshot.value(c)).collect())
                .collect(),
        }
    }
}

/// Full report written as JSON
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport<'a> {
    pub horizon_years: u32,
    pub group_by: GroupBy,
    pub summary: ProjectionSummary,
    pub snapshots: Vec<&'a PeriodSnapshot>,
}

impl<'a> ProjectionReport<'a> {
    pub fn build(result: &'a ProjectionResult, group_by: GroupBy) -> Self {
        Self {
            horizon_years: result.horizon_years,
            group_by,
            summary: result.summary(),
            snapshots: result.grouped(group_by).collect(),
        }
    }
}

/// Write the selected columns as CSV, one header row of column paths
pub fn write_csv<W: Write>(
    writer: W,
    result: &ProjectionResult,
    columns: &[Column],
    group_by: GroupBy,
) -> Result<(), csv::Error> {
    write_table(writer, result, columns, group_by, false)
}

/// As [`write_csv`], with a row of display labels above the path header
pub fn write_labelled_csv<W: Write>(
    writer: W,
    result: &ProjectionResult,
    columns: &[Column],
    group_by: GroupBy,
) -> Result<(), csv::Error> {
    write_table(writer, result, columns, group_by, true)
}

fn write_table<W: Write>(
    writer: W,
    result: &ProjectionResult,
    columns: &[Column],
    group_by: GroupBy,
    with_labels: bool,
) -> Result<(), csv::Error> {
    let table = ProjectionTable::build(result, columns, group_by);
    let mut csv_writer = csv::Writer::from_writer(writer);

    if with_labels {
        csv_writer.write_record(&table.labels)?;
    }
    csv_writer.write_record(&table.columns)?;
    for row in &table.rows {
        csv_writer.write_record(
            row.iter()
                .zip(columns)
                .map(|(value, column)| format_cell(*value, column)),
        )?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn format_cell(value: Option<f64>, column: &Column) -> String {
    match (value, column) {
        (None, _) => String::new(),
        (Some(v), Column::Time(_)) => format!("{:.0}", v),
        (Some(v), _) => format!("{:.2}", v),
    }
}

/// Write the grouped snapshots and summary as pretty-printed JSON
pub fn write_json<W: Write>(
    writer: W,
    result: &ProjectionResult,
    group_by: GroupBy,
) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(writer, &ProjectionReport::build(result, group_by))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{InterestRate, Investment, Loan};
    use crate::projection::columns::{LoanField, SummaryField, TimeField};
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    fn result() -> ProjectionResult {
        let investment = Investment::new("cash", "Cash", 100.0);
        let loan = Loan::new("card", "Card", 60.0, InterestRate::zero(), 1, 10.0);
        ProjectionEngine::new(ProjectionConfig::with_horizon(2))
            .project(&[investment], &[loan])
            .unwrap()
    }

    #[test]
    fn test_table_by_year() {
        let columns = vec![
            Column::Time(TimeField::Year),
            Column::loan("card", LoanField::Debt),
            Column::loan("missing", LoanField::Debt),
        ];
        let table = ProjectionTable::build(&result(), &columns, GroupBy::Years);

        assert_eq!(table.columns, vec!["time.year", "loan.card.debt", "loan.missing.debt"]);
        assert_eq!(table.labels, vec!["Year", "Debt", "Debt"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0], vec![Some(1.0), Some(60.0), None]);
        assert_eq!(table.rows[1], vec![Some(2.0), Some(0.0), None]);
    }

    #[test]
    fn test_csv_output() {
        let mut buffer = Vec::new();
        let columns = vec![Column::Time(TimeField::Months), Column::Summary(SummaryField::CashAvailable)];
        write_csv(&mut buffer, &result(), &columns, GroupBy::Months).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 26);
        assert_eq!(lines[0], "time.months,summary.cash_available");
        assert_eq!(lines[1], "0,40.00");
        assert_eq!(lines[25], "24,100.00");
    }

    #[test]
    fn test_labelled_csv_output() {
        let mut buffer = Vec::new();
        let columns = vec![Column::Time(TimeField::Years), Column::loan("card", LoanField::Amount)];
        write_labelled_csv(&mut buffer, &result(), &columns, GroupBy::Years).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Years,Amount");
        assert_eq!(lines[1], "time.years,loan.card.amount");
        assert_eq!(lines[2], "0,60.00");
    }

    #[test]
    fn test_json_report() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &result(), GroupBy::Years).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(report["horizon_years"], 2);
        assert_eq!(report["group_by"], "years");
        assert_eq!(report["snapshots"].as_array().unwrap().len(), 3);
        assert_eq!(report["summary"]["debt_free_month"], 6);
    }
}
