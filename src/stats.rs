use serde::Serialize;
use tracing::info;

use crate::analyzers::types::{ClassificationResult, GroupAggregate, QualityReport, RankingResult};
use crate::analyzers::utility::ratio;
use crate::analyzers::{aggregate_by, audit, classify, count_distinct_by, rank};
use crate::config::RulesConfig;
use crate::schema::Field;
use crate::table::CanonicalTable;

/// Groupings computed once per run and shared by every consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub by_state: GroupAggregate,
    pub by_school: GroupAggregate,
    pub by_city: GroupAggregate,
    pub schools_per_city: GroupAggregate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classifications {
    pub schools: Vec<ClassificationResult>,
    pub cities: Vec<ClassificationResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rankings {
    pub states: RankingResult,
    pub schools: RankingResult,
}

/// Everything derived from one canonical table. This is the only value
/// handed to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub total_schools: usize,
    pub total_teachers: f64,
    /// Two decimals; 0.0 when there are no schools.
    pub avg_teachers_per_school: f64,
    pub aggregates: Aggregates,
    pub classifications: Classifications,
    pub rankings: Rankings,
    pub quality: QualityReport,
}

impl Summary {
    /// Builds the summary with the default threshold rules.
    pub fn build(table: &CanonicalTable) -> Self {
        Self::build_with(table, &RulesConfig::default())
    }

    #[tracing::instrument(skip_all, fields(rows = table.len()))]
    pub fn build_with(table: &CanonicalTable, rules: &RulesConfig) -> Self {
        let aggregates = Aggregates {
            by_state: aggregate_by(table, Field::State),
            by_school: aggregate_by(table, Field::SchoolName),
            by_city: aggregate_by(table, Field::City),
            schools_per_city: count_distinct_by(table, Field::City, Field::SchoolName),
        };
        let quality = audit(table);

        let classifications = Classifications {
            schools: classify(&aggregates.by_school, &rules.school),
            cities: classify(&aggregates.schools_per_city, &rules.city),
        };

        let rankings = Rankings {
            states: rank(&aggregates.by_state),
            schools: rank(&aggregates.by_school),
        };

        let total_schools = aggregates.by_school.len();
        let total_teachers: f64 = table.records().iter().map(|r| r.teacher_count).sum();
        let avg_teachers_per_school = ratio(total_teachers, total_schools);

        info!(
            total_schools,
            total_teachers,
            avg_teachers_per_school,
            duplicate_rows = quality.duplicate_rows,
            "Summary built"
        );

        Summary {
            rows: table.len(),
            total_schools,
            total_teachers,
            avg_teachers_per_school,
            aggregates,
            classifications,
            rankings,
            quality,
        }
    }

    /// Looks up a classification by rule name across schools and cities.
    pub fn classification(&self, rule: &str) -> Option<&ClassificationResult> {
        self.classifications
            .schools
            .iter()
            .chain(&self.classifications.cities)
            .find(|c| c.rule == rule)
    }
}
