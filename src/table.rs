//! The canonical registration table shared by every analysis stage.

use serde::Serialize;

use crate::normalize::{normalize, normalize_name};
use crate::parser::{RawRow, RawTable};
use crate::schema::Field;

/// One normalized registration row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub state: Option<String>,
    pub city: Option<String>,
    pub school_name: Option<String>,
    pub teacher_count: f64,
    pub address: Option<String>,
    pub pincode: Option<String>,
    /// Values of source columns outside the schema, in [`ColumnSet::extras`] order.
    pub extras: Vec<Option<String>>,
}

impl Record {
    /// Returns the text value of `field`. `TeacherCount` is numeric and always yields `None`.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::State => self.state.as_deref(),
            Field::City => self.city.as_deref(),
            Field::SchoolName => self.school_name.as_deref(),
            Field::Address => self.address.as_deref(),
            Field::Pincode => self.pincode.as_deref(),
            Field::TeacherCount => None,
        }
    }
}

impl From<&Record> for RawRow {
    fn from(record: &Record) -> Self {
        RawRow {
            state: record.state.clone(),
            city: record.city.clone(),
            school_name: record.school_name.clone(),
            teacher_count: Some(record.teacher_count.to_string()),
            address: record.address.clone(),
            pincode: record.pincode.clone(),
            extras: record.extras.clone(),
        }
    }
}

/// Which columns the source actually carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnSet {
    pub address: bool,
    pub pincode: bool,
    pub extras: Vec<String>,
}

impl ColumnSet {
    /// Required columns are always present once a table has been parsed.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Address => self.address,
            Field::Pincode => self.pincode,
            _ => true,
        }
    }
}

/// Normalized rows in source order. Never mutated after construction;
/// derived views such as [`CanonicalTable::filter_state`] return new tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    columns: ColumnSet,
    records: Vec<Record>,
}

impl CanonicalTable {
    pub(crate) fn new(columns: ColumnSet, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct states, sorted. These are the choices offered when filtering.
    pub fn states(&self) -> Vec<String> {
        let mut states: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.state.clone())
            .collect();
        states.sort();
        states.dedup();
        states
    }

    /// Returns a new table holding only the rows of `state`.
    ///
    /// `state` goes through the same trim/title-case rule as the table, so
    /// `" tamil nadu"` selects `Tamil Nadu`.
    pub fn filter_state(&self, state: &str) -> CanonicalTable {
        let wanted = normalize_name(Some(state));
        let records = self
            .records
            .iter()
            .filter(|r| wanted.is_some() && r.state == wanted)
            .cloned()
            .collect();
        CanonicalTable::new(self.columns.clone(), records)
    }

    /// Runs the normalizer again over this table. A canonical table is a
    /// fixed point, so the result equals `self`.
    pub fn renormalize(&self) -> CanonicalTable {
        let raw = RawTable {
            columns: self.columns.clone(),
            rows: self.records.iter().map(RawRow::from).collect(),
        };
        normalize(&raw)
    }
}

#[cfg(test)]
mod tests {
    use crate::normalize::normalize;
    use crate::parser::parse_table;
    use crate::schema::{Field, Schema};

    const CSV: &str = "\
State,City,School Name,No of teachers registered,Pincode
 kerala ,kochi,st. mary's school,4,682001
TAMIL NADU,chennai,dav school,abc,
Kerala,Kollam,Govt HS,2.5,691001
";

    fn table() -> super::CanonicalTable {
        normalize(&parse_table(CSV.as_bytes(), &Schema::default()).unwrap())
    }

    #[test]
    fn test_states_sorted_distinct() {
        assert_eq!(table().states(), vec!["Kerala", "Tamil Nadu"]);
    }

    #[test]
    fn test_filter_state_normalizes_name() {
        let filtered = table().filter_state("  KERALA");
        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .records()
                .iter()
                .all(|r| r.state.as_deref() == Some("Kerala"))
        );
    }

    #[test]
    fn test_filter_state_unknown_is_empty() {
        let filtered = table().filter_state("Goa");
        assert!(filtered.is_empty());
        assert!(filtered.columns().pincode);
    }

    #[test]
    fn test_renormalize_is_identity() {
        let table = table();
        assert_eq!(table.renormalize(), table);
    }

    #[test]
    fn test_column_set_reports_optional_presence() {
        let table = table();
        assert!(table.columns().has(Field::Pincode));
        assert!(!table.columns().has(Field::Address));
        assert!(table.columns().has(Field::City));
    }
}
