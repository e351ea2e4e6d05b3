//! Filter-to-SQL composition
//!
//! Each domain owns an ordered list of transforms. A transform inspects one
//! filter field and yields a predicate, or nothing when the field is at its
//! zero value. [`compose`] applies them in order and caps the result size.

mod activity;
mod wod;

pub use activity::{ACTIVITY_TRANSFORMS, list_activities_query};
pub use wod::{WOD_TRANSFORMS, list_wods_query, wod_activities_query, wod_by_id_query};

use crate::data::sql::{Predicate, SelectQuery};
use crate::domain::filters::DateRange;

/// Row cap for every list query
pub const LIST_LIMIT: u32 = 10;

/// Per-field filter transform
pub type Transform<F> = fn(&F) -> Option<Predicate>;

/// Apply transforms to a base query in order and cap at [`LIST_LIMIT`] rows
pub fn compose<F>(base: SelectQuery, filter: &F, transforms: &[Transform<F>]) -> SelectQuery {
    transforms
        .iter()
        .filter_map(|transform| transform(filter))
        .fold(base, SelectQuery::filter)
        .limit(LIST_LIMIT)
}

/// Inclusive bounds on a Unix-seconds column
pub(crate) fn date_bounds(column: &str, range: &DateRange) -> Option<Predicate> {
    let mut bounds = Vec::with_capacity(2);
    if let Some(start) = range.start_secs() {
        bounds.push(Predicate::gte(column, start));
    }
    if let Some(end) = range.end_secs() {
        bounds.push(Predicate::lte(column, end));
    }
    Predicate::all(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::SqlArg;
    use chrono::DateTime;

    #[test]
    fn test_compose_without_transforms_only_limits() {
        let query = compose(SelectQuery::from("wod"), &(), &[]);
        assert!(query.predicates().is_empty());
        assert_eq!(query.limit_value(), Some(LIST_LIMIT));
    }

    #[test]
    fn test_compose_skips_noop_transforms() {
        let transforms: &[Transform<i64>] = &[
            |_| None,
            |v| Some(Predicate::eq("a", *v)),
            |_| None,
        ];
        let query = compose(SelectQuery::from("t"), &5, transforms);
        assert_eq!(query.predicates(), &[Predicate::eq("a", 5_i64)]);
    }

    #[test]
    fn test_date_bounds() {
        let empty = DateRange::default();
        assert_eq!(date_bounds("d", &empty), None);

        let start_only = DateRange {
            start_date: DateTime::from_timestamp(1_672_531_200, 0),
            end_date: None,
        };
        assert_eq!(
            date_bounds("d", &start_only),
            Some(Predicate::expr("d >= ?", vec![SqlArg::Int(1_672_531_200)]))
        );

        let both = DateRange {
            start_date: DateTime::from_timestamp(1, 0),
            end_date: DateTime::from_timestamp(2, 0),
        };
        assert_eq!(
            date_bounds("d", &both),
            Some(Predicate::And(vec![
                Predicate::gte("d", 1),
                Predicate::lte("d", 2)
            ]))
        );
    }
}
