use std::collections::HashSet;

use tracing::debug;

use crate::analyzers::types::{MissingField, QualityReport};
use crate::schema::Field;
use crate::table::{CanonicalTable, Record};

/// Fields whose missing values are reported.
pub const TRACKED_FIELDS: [Field; 3] = [Field::City, Field::Address, Field::Pincode];

type RowKey<'a> = (
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
    u64,
    Option<&'a str>,
    Option<&'a str>,
    &'a [Option<String>],
);

fn row_key(r: &Record) -> RowKey<'_> {
    (
        r.state.as_deref(),
        r.city.as_deref(),
        r.school_name.as_deref(),
        r.teacher_count.to_bits(),
        r.address.as_deref(),
        r.pincode.as_deref(),
        r.extras.as_slice(),
    )
}

/// Counts duplicate rows and missing tracked fields.
///
/// A row is a duplicate when every field, extra columns included, equals
/// an earlier row; the first occurrence is not counted.
pub fn audit(table: &CanonicalTable) -> QualityReport {
    let mut seen = HashSet::with_capacity(table.len());
    let duplicate_rows = table
        .records()
        .iter()
        .filter(|&r| !seen.insert(row_key(r)))
        .count();

    let missing = TRACKED_FIELDS
        .iter()
        .map(|&field| {
            let column_present = table.columns().has(field);
            let missing = if column_present {
                table
                    .records()
                    .iter()
                    .filter(|r| r.text(field).is_none())
                    .count()
            } else {
                0
            };
            MissingField {
                field,
                column_present,
                missing,
            }
        })
        .collect();

    debug!(rows = table.len(), duplicate_rows, "Audited table");

    QualityReport {
        rows: table.len(),
        duplicate_rows,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::parser::parse_table;
    use crate::schema::Schema;

    fn table(csv: &str) -> CanonicalTable {
        normalize(&parse_table(csv.as_bytes(), &Schema::default()).unwrap())
    }

    #[test]
    fn test_duplicates_exclude_first_occurrence() {
        let t = table(
            "\
State,City,School Name,No of teachers registered
Goa,Panaji,A,1
Goa,Panaji,A,1
Goa,Panaji,A,1
Goa,Panaji,B,1
",
        );
        assert_eq!(audit(&t).duplicate_rows, 2);
    }

    #[test]
    fn test_duplicates_compare_after_normalization() {
        let t = table(
            "\
State,City,School Name,No of teachers registered
goa,panaji,a,x
 GOA ,Panaji,A,0
",
        );
        assert_eq!(audit(&t).duplicate_rows, 1);
    }

    #[test]
    fn test_duplicates_consider_extra_columns() {
        let t = table(
            "\
State,City,School Name,No of teachers registered,Board
Goa,Panaji,A,1,CBSE
Goa,Panaji,A,1,ICSE
",
        );
        assert_eq!(audit(&t).duplicate_rows, 0);
    }

    #[test]
    fn test_missing_counts_and_absent_columns() {
        let t = table(
            "\
State,City,School Name,No of teachers registered,Pincode
Goa,,A,1,403001
Goa,Panaji,B,2,
Goa,,C,3,
",
        );
        let report = audit(&t);

        let city = report.missing_for(Field::City).unwrap();
        assert_eq!(city.missing, 2);
        assert!(city.column_present);

        let pincode = report.missing_for(Field::Pincode).unwrap();
        assert_eq!(pincode.missing, 2);

        let address = report.missing_for(Field::Address).unwrap();
        assert_eq!(address.missing, 0);
        assert!(!address.column_present);
    }

    #[test]
    fn test_blank_address_counts_as_missing() {
        let t = table(
            "\
State,City,School Name,No of teachers registered,Address
Goa,Panaji,A,1,\"   \"
Goa,Panaji,B,2,Miramar
",
        );
        assert_eq!(audit(&t).missing_for(Field::Address).unwrap().missing, 1);
    }

    #[test]
    fn test_audit_empty_table() {
        let report = audit(&table("State,City,School Name,No of teachers registered\n"));
        assert_eq!(report.rows, 0);
        assert_eq!(report.duplicate_rows, 0);
    }
}
