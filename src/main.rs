//! CLI entry point for the school registration analytics tool.
//!
//! Loads a registration CSV, normalizes it, and reports the derived
//! summary, the list of states, or the data-quality audit.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use school_reg_analytics::config::RulesConfig;
use school_reg_analytics::geo::{BoundarySet, DEFAULT_NAME_PROPERTY};
use school_reg_analytics::normalize::normalize;
use school_reg_analytics::output::{KpiRow, Report, append_kpis, print_json, print_pretty, write_report};
use school_reg_analytics::parser::load_table;
use school_reg_analytics::schema::Schema;
use school_reg_analytics::{CanonicalTable, Summary};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "school_reg_analytics")]
#[command(about = "Descriptive analytics over school and teacher registrations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full summary for a registration CSV
    Summary {
        /// Path to the registration CSV
        #[arg(value_name = "CSV")]
        source: String,

        /// Restrict every figure to one state
        #[arg(short, long)]
        state: Option<String>,

        /// JSON file with threshold rules (defaults apply when omitted)
        #[arg(short, long)]
        rules: Option<String>,

        /// GeoJSON boundary collection to join state totals onto
        #[arg(short, long)]
        geojson: Option<String>,

        /// Feature property holding the region name
        #[arg(long, default_value = DEFAULT_NAME_PROPERTY)]
        name_property: String,

        /// Write the JSON report to this file instead of the log
        #[arg(short, long)]
        output: Option<String>,

        /// CSV file to append headline figures to
        #[arg(long)]
        kpi_history: Option<String>,
    },
    /// List the distinct states in a registration CSV
    States {
        #[arg(value_name = "CSV")]
        source: String,
    },
    /// Report duplicate rows and missing fields
    Quality {
        #[arg(value_name = "CSV")]
        source: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/school_reg_analytics.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("school_reg_analytics.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            source,
            state,
            rules,
            geojson,
            name_property,
            output,
            kpi_history,
        } => {
            let mut table = load(&source)?;

            if let Some(ref state) = state {
                table = table.filter_state(state);
                if table.is_empty() {
                    warn!(state = %state, "No rows for state");
                }
            }

            let rules = match rules {
                Some(path) => RulesConfig::load(&path)?,
                None => RulesConfig::default(),
            };

            let summary = Summary::build_with(&table, &rules);

            let geo = match geojson {
                Some(path) => {
                    let boundaries = BoundarySet::load(&path, &name_property)?;
                    let joined = boundaries.join(&summary.aggregates.by_state);
                    if !joined.unmatched_states.is_empty() {
                        warn!(
                            states = ?joined.unmatched_states,
                            "States without a matching boundary"
                        );
                    }
                    Some(joined)
                }
                None => None,
            };

            print_pretty(&summary);

            match output {
                Some(path) => {
                    let report = Report {
                        generated_at: Utc::now(),
                        source: &source,
                        state_filter: state.as_deref(),
                        summary: &summary,
                        geo: geo.as_ref(),
                    };
                    write_report(&path, &report)?;
                }
                None => print_json(&summary)?,
            }

            if let Some(path) = kpi_history {
                append_kpis(&path, &KpiRow::new(&source, state.as_deref(), &summary))?;
            }
        }
        Commands::States { source } => {
            let table = load(&source)?;
            let states = table.states();

            for state in &states {
                info!(state = %state, "State");
            }
            info!(total = states.len(), "State list");
        }
        Commands::Quality { source } => {
            let table = load(&source)?;
            let report = school_reg_analytics::analyzers::audit(&table);

            for field in &report.missing {
                info!(
                    field = field.field.as_str(),
                    column_present = field.column_present,
                    missing = field.missing,
                    "Missing values"
                );
            }
            info!(
                rows = report.rows,
                duplicate_rows = report.duplicate_rows,
                "Data quality summary"
            );
        }
    }

    Ok(())
}

/// Reads and normalizes a registration CSV.
#[tracing::instrument]
fn load(source: &str) -> Result<CanonicalTable> {
    let raw = load_table(source, &Schema::default())?;
    Ok(normalize(&raw))
}
