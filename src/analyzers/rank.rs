use crate::analyzers::types::{Group, GroupAggregate, RankedGroup, RankingResult};
use crate::analyzers::utility::share_pct;

/// Size of the top and bottom slices.
pub const TOP_N: usize = 5;

/// Ranks `aggregate` with [`TOP_N`]-sized slices.
pub fn rank(aggregate: &GroupAggregate) -> RankingResult {
    rank_n(aggregate, TOP_N)
}

/// Orders groups by value and picks the extremes.
///
/// Sorting is stable, so equal values keep first-seen order: the top is the
/// earliest of the maximal groups and the bottom the earliest of the minimal
/// ones. Shares are taken against the total over all groups.
pub fn rank_n(aggregate: &GroupAggregate, n: usize) -> RankingResult {
    let total = aggregate.total();

    let mut descending: Vec<&Group> = aggregate.groups.iter().collect();
    descending.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut ascending: Vec<&Group> = aggregate.groups.iter().collect();
    ascending.sort_by(|a, b| a.value.total_cmp(&b.value));

    let ranked = |g: &&Group| RankedGroup {
        key: g.key.clone(),
        value: g.value,
        share_pct: share_pct(g.value, total),
    };
    let pair = |g: &&Group| (g.key.clone(), g.value);

    let tail_start = descending.len().saturating_sub(n);

    RankingResult {
        dimension: aggregate.dimension,
        total,
        top: descending.first().map(ranked),
        bottom: ascending.first().map(ranked),
        top_n: descending.iter().take(n).map(pair).collect(),
        bottom_n: descending[tail_start..].iter().map(pair).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Measure;
    use crate::schema::Field;

    fn states(values: &[(&str, f64)]) -> GroupAggregate {
        GroupAggregate {
            dimension: Field::State,
            measure: Measure::TeacherSum,
            groups: values
                .iter()
                .map(|(k, v)| Group {
                    key: k.to_string(),
                    value: *v,
                    rows: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_rank_extremes_and_shares() {
        let result = rank(&states(&[("Goa", 10.0), ("Kerala", 60.0), ("Assam", 30.0)]));

        let top = result.top.unwrap();
        let bottom = result.bottom.unwrap();
        assert_eq!(top.key, "Kerala");
        assert_eq!(top.share_pct, 60.0);
        assert_eq!(bottom.key, "Goa");
        assert_eq!(bottom.share_pct, 10.0);
        assert_eq!(result.total, 100.0);
    }

    #[test]
    fn test_rank_single_group_top_equals_bottom() {
        let result = rank(&states(&[("Goa", 7.0)]));
        assert_eq!(result.top, result.bottom);
        assert_eq!(result.top.unwrap().share_pct, 100.0);
    }

    #[test]
    fn test_rank_ties_keep_first_seen() {
        let result = rank(&states(&[("A", 5.0), ("B", 5.0), ("C", 1.0), ("D", 1.0)]));
        assert_eq!(result.top.unwrap().key, "A");
        assert_eq!(result.bottom.unwrap().key, "C");
    }

    #[test]
    fn test_rank_slices() {
        let values: Vec<(String, f64)> = (1..=8).map(|i| (format!("S{i}"), i as f64)).collect();
        let refs: Vec<(&str, f64)> = values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let result = rank(&states(&refs));

        let top: Vec<_> = result.top_n.iter().map(|(k, _)| k.as_str()).collect();
        let bottom: Vec<_> = result.bottom_n.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(top, vec!["S8", "S7", "S6", "S5", "S4"]);
        assert_eq!(bottom, vec!["S5", "S4", "S3", "S2", "S1"]);
    }

    #[test]
    fn test_rank_fewer_than_n_groups() {
        let result = rank(&states(&[("A", 2.0), ("B", 9.0)]));
        assert_eq!(result.top_n, vec![("B".to_string(), 9.0), ("A".to_string(), 2.0)]);
        assert_eq!(result.bottom_n, result.top_n);
    }

    #[test]
    fn test_rank_empty_and_zero_total() {
        let empty = rank(&states(&[]));
        assert!(empty.top.is_none());
        assert!(empty.bottom.is_none());
        assert!(empty.top_n.is_empty());

        let zeros = rank(&states(&[("A", 0.0), ("B", 0.0)]));
        assert_eq!(zeros.top.unwrap().share_pct, 0.0);
    }

    #[test]
    fn test_top_never_below_bottom() {
        let result = rank(&states(&[("A", 3.0), ("B", 0.0), ("C", 12.5), ("D", 3.0)]));
        assert!(result.top.unwrap().value >= result.bottom.unwrap().value);
    }
}
