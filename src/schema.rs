//! Column descriptor for the registration table.
//!
//! The external contract is the header names; everything downstream refers
//! to columns through [`Field`].

use serde::Serialize;

/// A column the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    State,
    City,
    SchoolName,
    TeacherCount,
    Address,
    Pincode,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::State => "state",
            Field::City => "city",
            Field::SchoolName => "school_name",
            Field::TeacherCount => "teacher_count",
            Field::Address => "address",
            Field::Pincode => "pincode",
        }
    }
}

/// Maps a [`Field`] to its header in the source file.
#[derive(Debug, Clone)]
pub struct Column {
    pub field: Field,
    pub header: String,
    pub required: bool,
}

/// Required and optional columns of the input table.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(vec![
            Column::required(Field::State, "State"),
            Column::required(Field::City, "City"),
            Column::required(Field::SchoolName, "School Name"),
            Column::required(Field::TeacherCount, "No of teachers registered"),
            Column::optional(Field::Address, "Address"),
            Column::optional(Field::Pincode, "Pincode"),
        ])
    }
}

impl Column {
    pub fn required(field: Field, header: &str) -> Self {
        Self {
            field,
            header: header.to_string(),
            required: true,
        }
    }

    pub fn optional(field: Field, header: &str) -> Self {
        Self {
            field,
            header: header.to_string(),
            required: false,
        }
    }
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column describing `field`, if the schema tracks it.
    pub fn column(&self, field: Field) -> Option<&Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Finds the column whose header matches `header`, ignoring surrounding whitespace.
    pub fn column_for_header(&self, header: &str) -> Option<&Column> {
        let header = header.trim();
        self.columns.iter().find(|c| c.header == header)
    }

    pub fn required(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.required)
    }
}
