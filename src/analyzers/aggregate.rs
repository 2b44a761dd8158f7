use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::analyzers::types::{Group, GroupAggregate, Measure};
use crate::schema::Field;
use crate::table::CanonicalTable;

/// Sums teacher counts per value of `dimension`.
///
/// Groups keep the order in which their keys first appear in the table.
/// Rows with no value for `dimension` are left out, so grouping by the
/// numeric `TeacherCount` field yields an empty aggregate.
pub fn aggregate_by(table: &CanonicalTable, dimension: Field) -> GroupAggregate {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in table.records() {
        let Some(key) = record.text(dimension) else {
            continue;
        };
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                key: key.to_string(),
                value: 0.0,
                rows: 0,
            });
            groups.len() - 1
        });
        groups[slot].value += record.teacher_count;
        groups[slot].rows += 1;
    }

    debug!(dimension = dimension.as_str(), groups = groups.len(), "Aggregated teacher counts");

    GroupAggregate {
        dimension,
        measure: Measure::TeacherSum,
        groups,
    }
}

/// Counts distinct values of `counted` per value of `dimension`, e.g.
/// schools per city. Empty `counted` values are not counted, but the row
/// still creates its group.
pub fn count_distinct_by(table: &CanonicalTable, dimension: Field, counted: Field) -> GroupAggregate {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut seen: Vec<HashSet<&str>> = Vec::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in table.records() {
        let Some(key) = record.text(dimension) else {
            continue;
        };
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                key: key.to_string(),
                value: 0.0,
                rows: 0,
            });
            seen.push(HashSet::new());
            groups.len() - 1
        });
        groups[slot].rows += 1;
        if let Some(value) = record.text(counted) {
            seen[slot].insert(value);
        }
    }

    for (group, values) in groups.iter_mut().zip(&seen) {
        group.value = values.len() as f64;
    }

    debug!(
        dimension = dimension.as_str(),
        counted = counted.as_str(),
        groups = groups.len(),
        "Counted distinct values"
    );

    GroupAggregate {
        dimension,
        measure: Measure::Distinct { field: counted },
        groups,
    }
}
