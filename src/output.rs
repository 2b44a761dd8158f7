//! Output formatting and persistence for summaries.
//!
//! Supports pretty-printing, a JSON report file, and a CSV history of
//! headline figures.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::geo::GeoJoin;
use crate::stats::Summary;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Envelope written by the `summary` command.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub source: &'a str,
    pub state_filter: Option<&'a str>,
    pub summary: &'a Summary,
    pub geo: Option<&'a GeoJoin>,
}

/// Headline figures of one run, one CSV row each.
#[derive(Debug, Serialize)]
pub struct KpiRow<'a> {
    pub timestamp: DateTime<Utc>,
    pub source: &'a str,
    pub state_filter: Option<&'a str>,
    pub rows: usize,
    pub total_schools: usize,
    pub total_teachers: f64,
    pub avg_teachers_per_school: f64,
    pub duplicate_rows: usize,
    pub top_state: Option<&'a str>,
    pub bottom_state: Option<&'a str>,
}

impl<'a> KpiRow<'a> {
    pub fn new(source: &'a str, state_filter: Option<&'a str>, summary: &'a Summary) -> Self {
        KpiRow {
            timestamp: Utc::now(),
            source,
            state_filter,
            rows: summary.rows,
            total_schools: summary.total_schools,
            total_teachers: summary.total_teachers,
            avg_teachers_per_school: summary.avg_teachers_per_school,
            duplicate_rows: summary.quality.duplicate_rows,
            top_state: summary.rankings.states.top.as_ref().map(|t| t.key.as_str()),
            bottom_state: summary.rankings.states.bottom.as_ref().map(|b| b.key.as_str()),
        }
    }
}

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &Summary) {
    debug!("{:#?}", summary);
}

/// Logs a summary as pretty-printed JSON.
pub fn print_json(summary: &Summary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Writes the report as pretty JSON to `path`, replacing any existing file.
pub fn write_report(path: &str, report: &Report) -> Result<()> {
    let body = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, body)?;
    info!(path, "Report written");
    Ok(())
}

/// Appends a [`KpiRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_kpis(path: &str, row: &KpiRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending KPI row");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::parser::parse_table;
    use crate::schema::Schema;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn summary() -> Summary {
        let csv = "State,City,School Name,No of teachers registered\nGoa,Panaji,A,3\nKerala,Kochi,B,7\n";
        Summary::build(&normalize(&parse_table(csv.as_bytes(), &Schema::default()).unwrap()))
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&summary());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&summary()).unwrap();
    }

    #[test]
    fn test_write_report() {
        let path = temp_path("school_reg_analytics_test_report.json");
        let summary = summary();
        let report = Report {
            generated_at: Utc::now(),
            source: "schools.csv",
            state_filter: Some("Goa"),
            summary: &summary,
            geo: None,
        };
        write_report(&path, &report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["state_filter"], "Goa");
        assert_eq!(value["summary"]["total_schools"], 2);
        assert!(value["geo"].is_null());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_report_to_missing_dir_is_io_error() {
        let summary = summary();
        let report = Report {
            generated_at: Utc::now(),
            source: "schools.csv",
            state_filter: None,
            summary: &summary,
            geo: None,
        };
        let err = write_report("/nonexistent/dir/report.json", &report).unwrap_err();
        assert!(matches!(err, crate::error::PipelineError::Io(_)));
    }

    #[test]
    fn test_append_kpis_writes_header_once() {
        let path = temp_path("school_reg_analytics_test_kpis.csv");
        let _ = fs::remove_file(&path);

        let summary = summary();
        let row = KpiRow::new("schools.csv", None, &summary);
        append_kpis(&path, &row).unwrap();
        append_kpis(&path, &row).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("timestamp,"));
        assert!(lines[1].contains(",Kerala,Goa"));

        fs::remove_file(&path).unwrap();
    }
}
