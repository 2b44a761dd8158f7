//! CSV reader for raw registration tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::schema::{Field, Schema};
use crate::table::ColumnSet;

/// One row exactly as read; blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub state: Option<String>,
    pub city: Option<String>,
    pub school_name: Option<String>,
    pub teacher_count: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub extras: Vec<Option<String>>,
}

/// Rows plus the column layout they were read with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: ColumnSet,
    pub rows: Vec<RawRow>,
}

enum Slot {
    Known(Field),
    Extra(usize),
}

/// Reads a CSV table with a header row.
///
/// # Errors
///
/// Returns [`PipelineError::MissingColumns`] if any required column of
/// `schema` is absent from the header, or [`PipelineError::Csv`] if the
/// input is not readable CSV.
pub fn parse_table<R: Read>(reader: R, schema: &Schema) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut columns = ColumnSet::default();
    let mut slots = Vec::with_capacity(headers.len());

    for header in headers.iter() {
        match schema.column_for_header(header) {
            Some(column) => {
                match column.field {
                    Field::Address => columns.address = true,
                    Field::Pincode => columns.pincode = true,
                    _ => {}
                }
                slots.push(Slot::Known(column.field));
            }
            None => {
                slots.push(Slot::Extra(columns.extras.len()));
                columns.extras.push(header.trim().to_string());
            }
        }
    }

    let missing: Vec<String> = schema
        .required()
        .filter(|c| !headers.iter().any(|h| h.trim() == c.header))
        .map(|c| c.header.clone())
        .collect();
    if !missing.is_empty() {
        warn!(columns = ?missing, "Input is missing required columns");
        return Err(PipelineError::MissingColumns { columns: missing });
    }

    let mut rows = Vec::new();
    let mut overlong = 0usize;
    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow {
            extras: vec![None; columns.extras.len()],
            ..Default::default()
        };

        if record.len() > slots.len() {
            let dropped: Vec<&str> = record.iter().skip(slots.len()).collect();
            warn!(
                line = record.position().map(|p| p.line()),
                ?dropped,
                "Row has more fields than the header; extra fields ignored"
            );
            overlong += 1;
        }

        for (slot, value) in slots.iter().zip(record.iter()) {
            let value = if value.trim().is_empty() {
                None
            } else {
                Some(value.to_string())
            };
            match slot {
                Slot::Known(Field::State) => row.state = value,
                Slot::Known(Field::City) => row.city = value,
                Slot::Known(Field::SchoolName) => row.school_name = value,
                Slot::Known(Field::TeacherCount) => row.teacher_count = value,
                Slot::Known(Field::Address) => row.address = value,
                Slot::Known(Field::Pincode) => row.pincode = value,
                Slot::Extra(i) => row.extras[*i] = value,
            }
        }

        rows.push(row);
    }

    debug!(
        rows = rows.len(),
        has_address = columns.address,
        has_pincode = columns.pincode,
        extra_columns = columns.extras.len(),
        overlong_rows = overlong,
        "Parsed registration table"
    );

    Ok(RawTable { columns, rows })
}

/// Opens `path` and parses it with [`parse_table`].
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_table(path: impl AsRef<Path>, schema: &Schema) -> Result<RawTable> {
    let file = File::open(path.as_ref())?;
    parse_table(file, schema)
}
