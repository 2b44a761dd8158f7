//! Data types produced by the analysis stages.

use serde::{Deserialize, Serialize};

use crate::schema::Field;

/// What a [`GroupAggregate`] measures per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Sum of registered teachers.
    TeacherSum,
    /// Number of distinct non-empty values of a field.
    Distinct { field: Field },
}

/// One key of a grouping and its derived value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: String,
    pub value: f64,
    /// Canonical rows that fell into this group.
    pub rows: usize,
}

/// Groups of one dimension, in the order their keys first appear in the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    pub dimension: Field,
    pub measure: Measure,
    pub groups: Vec<Group>,
}

impl GroupAggregate {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of values across all groups.
    pub fn total(&self) -> f64 {
        self.groups.iter().map(|g| g.value).sum()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.groups.iter().find(|g| g.key == key).map(|g| g.value)
    }
}

/// Inclusive threshold predicates over a group value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Threshold {
    Equals { value: f64 },
    Between { min: f64, max: f64 },
    Above { value: f64 },
    AtMost { value: f64 },
}

impl Threshold {
    pub fn matches(&self, v: f64) -> bool {
        match *self {
            Threshold::Equals { value } => v == value,
            Threshold::Between { min, max } => v >= min && v <= max,
            Threshold::Above { value } => v > value,
            Threshold::AtMost { value } => v <= value,
        }
    }
}

/// A named threshold applied to every group of an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub threshold: Threshold,
    /// Also report the matches as a percentage of all groups.
    #[serde(default)]
    pub with_share: bool,
}

impl Rule {
    pub fn new(name: &str, threshold: Threshold) -> Self {
        Self {
            name: name.to_string(),
            threshold,
            with_share: false,
        }
    }

    pub fn with_share(mut self) -> Self {
        self.with_share = true;
        self
    }
}

/// Groups matching one [`Rule`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub rule: String,
    pub threshold: Threshold,
    pub count: usize,
    pub matches: Vec<Group>,
    /// `count / groups * 100`, two decimals. Only set for rules asking for it.
    pub share_pct: Option<f64>,
}

impl ClassificationResult {
    pub fn keys(&self) -> Vec<&str> {
        self.matches.iter().map(|g| g.key.as_str()).collect()
    }
}

/// An extreme of a ranking with its share of the aggregate total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGroup {
    pub key: String,
    pub value: f64,
    pub share_pct: f64,
}

/// Extremes and top/bottom slices of one aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    pub dimension: Field,
    pub total: f64,
    pub top: Option<RankedGroup>,
    pub bottom: Option<RankedGroup>,
    /// Highest groups, descending.
    pub top_n: Vec<(String, f64)>,
    /// Lowest groups, still in descending order.
    pub bottom_n: Vec<(String, f64)>,
}

/// Missing-value count for one tracked field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingField {
    pub field: Field,
    /// `false` when the source had no such column; `missing` is then 0.
    pub column_present: bool,
    pub missing: usize,
}

/// Duplicate rows and missing fields of a canonical table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub rows: usize,
    pub duplicate_rows: usize,
    pub missing: Vec<MissingField>,
}

impl QualityReport {
    pub fn missing_for(&self, field: Field) -> Option<&MissingField> {
        self.missing.iter().find(|m| m.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries_inclusive() {
        let between = Threshold::Between { min: 3.0, max: 10.0 };
        assert!(!between.matches(2.99));
        assert!(between.matches(3.0));
        assert!(between.matches(10.0));
        assert!(!between.matches(10.01));

        let above = Threshold::Above { value: 100.0 };
        assert!(!above.matches(100.0));
        assert!(above.matches(100.5));

        let at_most = Threshold::AtMost { value: 2.0 };
        assert!(at_most.matches(2.0));
        assert!(!at_most.matches(3.0));

        assert!(Threshold::Equals { value: 0.0 }.matches(0.0));
    }

    #[test]
    fn test_threshold_deserialize() {
        let t: Threshold = serde_json::from_str(r#"{"op":"between","min":3,"max":10}"#).unwrap();
        assert_eq!(t, Threshold::Between { min: 3.0, max: 10.0 });
    }

    #[test]
    fn test_aggregate_total_and_get() {
        let agg = GroupAggregate {
            dimension: Field::State,
            measure: Measure::TeacherSum,
            groups: vec![
                Group { key: "Kerala".into(), value: 4.0, rows: 1 },
                Group { key: "Goa".into(), value: 6.0, rows: 2 },
            ],
        };
        assert_eq!(agg.total(), 10.0);
        assert_eq!(agg.get("Goa"), Some(6.0));
        assert_eq!(agg.get("Assam"), None);
    }
}
