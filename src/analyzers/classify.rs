use crate::analyzers::types::{ClassificationResult, GroupAggregate, Rule};
use crate::analyzers::utility::share_pct;

/// Applies every rule to every group of `aggregate`.
///
/// Rules are independent: a group may match none, one, or several of them.
/// With the default rules the school aggregate is classified as:
///
/// | Rule           | Predicate            | Share |
/// |----------------|----------------------|-------|
/// | `zero`         | value == 0           | no    |
/// | `mid_range`    | 3 <= value <= 10     | yes   |
/// | `high_outlier` | value > 100          | no    |
///
/// and the schools-per-city aggregate as `low_participation` (value <= 2).
pub fn classify(aggregate: &GroupAggregate, rules: &[Rule]) -> Vec<ClassificationResult> {
    rules.iter().map(|rule| apply_rule(aggregate, rule)).collect()
}

fn apply_rule(aggregate: &GroupAggregate, rule: &Rule) -> ClassificationResult {
    let matches: Vec<_> = aggregate
        .groups
        .iter()
        .filter(|g| rule.threshold.matches(g.value))
        .cloned()
        .collect();

    let share = rule
        .with_share
        .then(|| share_pct(matches.len() as f64, aggregate.len() as f64));

    ClassificationResult {
        rule: rule.name.clone(),
        threshold: rule.threshold,
        count: matches.len(),
        matches,
        share_pct: share,
    }
}
